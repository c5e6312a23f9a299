//! Mock catalog for integration testing.
//!
//! Provides a deterministic `CatalogSource` implementation backed by an
//! in-memory item list, plus small builders for catalog records.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex};

use tradeup::catalog::CatalogSource;
use tradeup::types::{Item, PriceEntry, PriceVariant, WearGrade};

/// An in-memory catalog source.
///
/// Items, forced errors, and the fetch counter are controllable from
/// test code.
pub struct MockCatalog {
    name: String,
    items: Vec<Item>,
    fetches: Arc<Mutex<u32>>,
    /// If set, `fetch_items` returns this error.
    force_error: Arc<Mutex<Option<String>>>,
}

impl MockCatalog {
    pub fn with_items(name: &str, items: Vec<Item>) -> Self {
        Self {
            name: name.to_string(),
            items,
            fetches: Arc::new(Mutex::new(0)),
            force_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Force all subsequent fetches to return an error.
    pub fn set_error(&self, msg: &str) {
        *self.force_error.lock().unwrap() = Some(msg.to_string());
    }

    /// Clear any forced error.
    pub fn clear_error(&self) {
        *self.force_error.lock().unwrap() = None;
    }

    pub fn fetch_count(&self) -> u32 {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn fetch_items(&self) -> Result<Vec<Item>> {
        *self.fetches.lock().unwrap() += 1;
        if let Some(err) = self.force_error.lock().unwrap().as_ref() {
            return Err(anyhow!("{}", err));
        }
        Ok(self.items.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// A published, normal-variant price entry.
pub fn price(wear: WearGrade, amount: Decimal) -> PriceEntry {
    PriceEntry {
        wear_grade: wear,
        price: amount,
        enabled: true,
        variant: PriceVariant::Normal,
    }
}

/// A catalog item with the given rarity, collection tags, and prices.
pub fn item(id: &str, rarity: &str, tags: &[&str], prices: Vec<PriceEntry>) -> Item {
    Item {
        id: id.to_string(),
        name: format!("Skin {id}"),
        weapon: "M4A4".to_string(),
        rarity: rarity.to_string(),
        price_entries: prices,
        collection_tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
