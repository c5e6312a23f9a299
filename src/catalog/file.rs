//! JSON snapshot catalog.
//!
//! Reads a catalog export from disk: either a top-level array of items or
//! an object with an `items` array. Rows that fail to parse are skipped
//! with a warning.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::CatalogSource;
use crate::types::{Item, TradeUpError};

const SOURCE_NAME: &str = "file";

/// Catalog backed by a JSON file.
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for FileCatalog {
    async fn fetch_items(&self) -> Result<Vec<Item>> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read catalog snapshot: {}", self.path.display()))?;

        let items = parse_snapshot(&raw)
            .with_context(|| format!("Failed to parse catalog snapshot: {}", self.path.display()))?;

        debug!(path = %self.path.display(), count = items.len(), "Catalog snapshot loaded");
        Ok(items)
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

/// Parse a snapshot document, keeping every row that deserializes.
pub fn parse_snapshot(raw: &str) -> Result<Vec<Item>> {
    let doc: Value = serde_json::from_str(raw)?;

    let rows = match doc {
        Value::Array(rows) => rows,
        Value::Object(mut obj) => match obj.remove("items") {
            Some(Value::Array(rows)) => rows,
            _ => {
                return Err(TradeUpError::Catalog {
                    source_name: SOURCE_NAME.to_string(),
                    message: "snapshot object has no `items` array".to_string(),
                }
                .into())
            }
        },
        _ => {
            return Err(TradeUpError::Catalog {
                source_name: SOURCE_NAME.to_string(),
                message: "snapshot must be an array or an object".to_string(),
            }
            .into())
        }
    };

    Ok(rows_to_items(rows, SOURCE_NAME))
}

/// Deserialize rows one at a time, dropping the ones that fail.
pub(crate) fn rows_to_items(rows: Vec<Value>, source: &str) -> Vec<Item> {
    let total = rows.len();
    let items: Vec<Item> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(idx, row)| match serde_json::from_value::<Item>(row) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(source, row = idx, error = %e, "Skipping malformed catalog row");
                None
            }
        })
        .collect();

    if items.len() < total {
        warn!(source, kept = items.len(), total, "Some catalog rows were skipped");
    }
    items
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
