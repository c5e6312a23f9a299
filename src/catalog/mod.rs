//! Catalog sources and normalization.
//!
//! Defines the `CatalogSource` trait used by the runner to obtain a
//! snapshot of the item catalog, plus implementations for:
//! - JSON snapshot files on disk
//! - a hosted REST table (backend-as-a-service)
//!
//! The engine itself never touches a source; it receives the fetched
//! snapshot as a plain slice.

pub mod file;
pub mod groups;
pub mod rest;

use anyhow::Result;
use async_trait::async_trait;

use crate::strategy::ladder::EXTRAORDINARY;
use crate::types::Item;

/// Abstraction over catalog stores.
///
/// Implementors return the full, already-priced item list. Sources should
/// skip rows they cannot parse rather than fail the whole snapshot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every catalog item.
    async fn fetch_items(&self) -> Result<Vec<Item>>;

    /// Source name for logging and reports.
    fn name(&self) -> &str;
}

/// Weapon tags excluded by default: knives and gloves sit in the
/// Extraordinary tier and cannot be traded up into.
pub const DEFAULT_EXCLUDED_WEAPONS: &[&str] = &["Knife", "Gloves", "Hand Wraps"];

/// Whether an item may take part in a trade-up scan.
///
/// `excluded_weapons` entries match case-insensitively as substrings of the
/// weapon tag, so "Knife" also excludes "Bowie Knife".
pub fn is_trade_up_eligible(item: &Item, excluded_weapons: &[String]) -> bool {
    if item.rarity == EXTRAORDINARY {
        return false;
    }
    let weapon = item.weapon.to_lowercase();
    !excluded_weapons
        .iter()
        .any(|w| !w.is_empty() && weapon.contains(&w.to_lowercase()))
}

/// Split a catalog into eligible items and the number excluded.
pub fn filter_eligible(items: Vec<Item>, excluded_weapons: &[String]) -> (Vec<Item>, usize) {
    let before = items.len();
    let eligible: Vec<Item> = items
        .into_iter()
        .filter(|i| is_trade_up_eligible(i, excluded_weapons))
        .collect();
    let excluded = before - eligible.len();
    (eligible, excluded)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
