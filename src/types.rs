//! Shared types for the TRADEUP scanner.
//!
//! These types form the data model used across all modules: catalog
//! records coming in, opportunity records going out. Catalog records are
//! deserialized leniently so a single malformed row degrades to "no
//! prices" instead of failing the whole snapshot.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Wear grades
// ---------------------------------------------------------------------------

/// Discrete cosmetic-condition bucket, ordered best (FN) to worst (BS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WearGrade {
    #[serde(rename = "FN", alias = "Factory New")]
    FactoryNew,
    #[serde(rename = "MW", alias = "Minimal Wear")]
    MinimalWear,
    #[serde(rename = "FT", alias = "Field-Tested")]
    FieldTested,
    #[serde(rename = "WW", alias = "Well-Worn")]
    WellWorn,
    #[serde(rename = "BS", alias = "Battle-Scarred")]
    BattleScarred,
}

impl WearGrade {
    /// All wear grades in float order (useful for iteration).
    pub const ALL: &'static [WearGrade] = &[
        WearGrade::FactoryNew,
        WearGrade::MinimalWear,
        WearGrade::FieldTested,
        WearGrade::WellWorn,
        WearGrade::BattleScarred,
    ];

    /// Position in `ALL`.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Every grade strictly worse than this one, nearest first.
    pub fn worse_grades(self) -> &'static [WearGrade] {
        &Self::ALL[self.index() + 1..]
    }

    /// Short market code ("FN", "MW", ...).
    pub fn code(self) -> &'static str {
        match self {
            WearGrade::FactoryNew => "FN",
            WearGrade::MinimalWear => "MW",
            WearGrade::FieldTested => "FT",
            WearGrade::WellWorn => "WW",
            WearGrade::BattleScarred => "BS",
        }
    }

    pub fn full_name(self) -> &'static str {
        match self {
            WearGrade::FactoryNew => "Factory New",
            WearGrade::MinimalWear => "Minimal Wear",
            WearGrade::FieldTested => "Field-Tested",
            WearGrade::WellWorn => "Well-Worn",
            WearGrade::BattleScarred => "Battle-Scarred",
        }
    }
}

impl fmt::Display for WearGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Parse a wear grade from its code or full name (case-insensitive).
impl std::str::FromStr for WearGrade {
    type Err = TradeUpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fn" | "factory new" => Ok(WearGrade::FactoryNew),
            "mw" | "minimal wear" => Ok(WearGrade::MinimalWear),
            "ft" | "field-tested" | "field tested" => Ok(WearGrade::FieldTested),
            "ww" | "well-worn" | "well worn" => Ok(WearGrade::WellWorn),
            "bs" | "battle-scarred" | "battle scarred" => Ok(WearGrade::BattleScarred),
            _ => Err(TradeUpError::UnknownWearGrade(s.to_string())),
        }
    }
}

/// Price listing variant. Only `Normal` takes part in trade-up math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceVariant {
    #[default]
    Normal,
    #[serde(alias = "StatTrak", alias = "stat_trak")]
    Stattrak,
    #[serde(alias = "Souvenir")]
    Souvenir,
}

impl fmt::Display for PriceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceVariant::Normal => write!(f, "normal"),
            PriceVariant::Stattrak => write!(f, "StatTrak™"),
            PriceVariant::Souvenir => write!(f, "souvenir"),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog records
// ---------------------------------------------------------------------------

/// One market price for an item at a given wear grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    #[serde(alias = "wear", alias = "wear_grade")]
    pub wear_grade: WearGrade,
    pub price: Decimal,
    /// Whether the entry is a published price. Absent means published.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub variant: PriceVariant,
}

fn default_enabled() -> bool {
    true
}

impl PriceEntry {
    /// Whether this entry may be read by trade-up pricing:
    /// published, normal variant, and a non-zero price.
    pub fn is_tradeable(&self) -> bool {
        self.enabled && self.variant == PriceVariant::Normal && self.price > Decimal::ZERO
    }
}

/// A catalog item as loaded from the data store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub weapon: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default, alias = "prices", alias = "price_entries", deserialize_with = "lenient_entries")]
    pub price_entries: Vec<PriceEntry>,
    #[serde(default, alias = "collections", alias = "collection_tags", deserialize_with = "lenient_tags")]
    pub collection_tags: Vec<String>,
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] ({})", self.name, self.rarity, self.id)
    }
}

/// Accept either a string or a numeric id.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid item id: {other}"))),
    }
}

/// Missing, `null`, non-array, or partially malformed price arrays keep
/// only the entries that parse.
fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<PriceEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|v| serde_json::from_value::<PriceEntry>(v).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(entries)
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = match Value::deserialize(deserializer)? {
        Value::Array(values) => values
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(tags)
}

/// Lightweight reference to a catalog item carried on output records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    pub name: String,
    pub weapon: String,
}

impl From<&Item> for ItemRef {
    fn from(item: &Item) -> Self {
        ItemRef {
            id: item.id.clone(),
            name: item.name.clone(),
            weapon: item.weapon.clone(),
        }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weapon.is_empty() || self.name.starts_with(&self.weapon) {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} | {}", self.weapon, self.name)
        }
    }
}

// ---------------------------------------------------------------------------
// Opportunity
// ---------------------------------------------------------------------------

/// A profitable trade-up contract for one (collection, tier, wear)
/// combination. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub collection_name: String,
    /// Wear grade the contract was evaluated at.
    pub wear_grade: WearGrade,
    pub lower_rarity: String,
    pub higher_rarity: String,
    /// Number of input items the contract consumes.
    #[serde(default = "default_contract_size")]
    pub contract_size: u32,
    pub cheapest_lower_item: ItemRef,
    pub unit_price: Decimal,
    /// First higher-tier item whose resolved price beat the bundle cost.
    pub representative_higher_item: ItemRef,
    pub representative_price: Decimal,
    /// Wear the representative price resolved at (fallback may degrade it).
    pub representative_wear: WearGrade,
    pub bundle_cost: Decimal,
    pub profit: Decimal,
    pub profit_percent: Decimal,
    pub total_higher_tier_item_count: usize,
    pub profitable_outcome_count: usize,
    pub hit_probability_percent: Decimal,
    /// Sum of positive outcomes divided by the full higher-tier count.
    pub expected_profit: Decimal,
}

fn default_contract_size() -> u32 {
    crate::strategy::tradeup::DEFAULT_CONTRACT_SIZE
}

impl fmt::Display for Opportunity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} → {} | {}× {} @ ${:.2} = ${:.2} | best-first {} ${:.2} ({}) | hit {}/{} ({:.1}%) | EV ${:.2}",
            self.collection_name,
            self.wear_grade,
            self.lower_rarity,
            self.higher_rarity,
            self.contract_size,
            self.cheapest_lower_item,
            self.unit_price,
            self.bundle_cost,
            self.representative_higher_item,
            self.representative_price,
            self.representative_wear,
            self.profitable_outcome_count,
            self.total_higher_tier_item_count,
            self.hit_probability_percent,
            self.expected_profit,
        )
    }
}

impl Opportunity {
    /// Whether the representative item only resolved via wear fallback.
    pub fn used_wear_fallback(&self) -> bool {
        self.representative_wear != self.wear_grade
    }
}

// ---------------------------------------------------------------------------
// Scan report
// ---------------------------------------------------------------------------

/// Summary of one catalog scan, as produced by the runner and persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: uuid::Uuid,
    pub generated_at: DateTime<Utc>,
    /// Catalog source name ("file", "rest", ...).
    pub source: String,
    pub items_scanned: usize,
    pub items_excluded: usize,
    pub collections: usize,
    pub opportunities: Vec<Opportunity>,
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scan {} @ {}: source={} items={} excluded={} collections={} opportunities={}",
            self.scan_id,
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.source,
            self.items_scanned,
            self.items_excluded,
            self.collections,
            self.opportunities.len(),
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for TRADEUP.
#[derive(Debug, thiserror::Error)]
pub enum TradeUpError {
    #[error("Catalog source error ({source_name}): {message}")]
    Catalog { source_name: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown wear grade: {0}")]
    UnknownWearGrade(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
