//! Catalog scanner.
//!
//! Fetches a snapshot from a `CatalogSource`, drops items that cannot take
//! part in a trade-up, runs the engine, and wraps the result in a
//! `ScanReport`.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::catalog::{filter_eligible, CatalogSource};
use crate::strategy::TradeUpScanner;
use crate::types::ScanReport;

/// Runs one fetch → filter → scan pass.
pub struct CatalogScanner {
    source: Box<dyn CatalogSource>,
    engine: TradeUpScanner,
    excluded_weapons: Vec<String>,
}

impl CatalogScanner {
    pub fn new(
        source: Box<dyn CatalogSource>,
        engine: TradeUpScanner,
        excluded_weapons: Vec<String>,
    ) -> Self {
        Self {
            source,
            engine,
            excluded_weapons,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetch the catalog and compute ranked opportunities.
    pub async fn run(&self) -> Result<ScanReport> {
        let name = self.source.name().to_string();
        info!(source = %name, "Fetching catalog");

        let items = self
            .source
            .fetch_items()
            .await
            .with_context(|| format!("Catalog fetch failed ({name})"))?;
        let fetched = items.len();

        let (eligible, excluded) = filter_eligible(items, &self.excluded_weapons);
        info!(fetched, eligible = eligible.len(), excluded, "Catalog filtered");

        let outcome = self.engine.scan_detailed(&eligible);

        Ok(ScanReport {
            scan_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            source: name,
            items_scanned: eligible.len(),
            items_excluded: excluded,
            collections: outcome.collections,
            opportunities: outcome.opportunities,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
