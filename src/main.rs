//! TRADEUP — trade-up contract opportunity scanner
//!
//! Entry point. Loads configuration, initialises structured logging,
//! fetches the catalog from the configured source, runs one scan, prints
//! the top opportunities, and saves the report, showing what changed since
//! the previous one.

use anyhow::Result;
use std::path::Path;
use secrecy::SecretString;
use tracing::{info, warn};

use tradeup::catalog::file::FileCatalog;
use tradeup::catalog::rest::RestCatalog;
use tradeup::catalog::CatalogSource;
use tradeup::config::{self, AppConfig, SourceKind};
use tradeup::engine::report::{render_table, OpportunityFilter, ScanDelta};
use tradeup::engine::scanner::CatalogScanner;
use tradeup::storage;
use tradeup::strategy::tradeup::ContractConfig;
use tradeup::strategy::TradeUpScanner;
use tradeup::types::TradeUpError;

const BANNER: &str = r#"
 _____ ____      _    ____  _____ _   _ ____
|_   _|  _ \    / \  |  _ \| ____| | | |  _ \
  | | | |_) |  / _ \ | | | |  _| | | | | |_) |
  | | |  _ <  / ___ \| |_| | |___| |_| |  __/
  |_| |_| \_\/_/   \_\____/|_____|\___/|_|

  Trade-up contract opportunity scanner
  v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let cfg = config::AppConfig::load(&config_path)?;

    init_logging();

    println!("{BANNER}");
    info!(
        config = %config_path,
        source = ?cfg.catalog.source,
        contract_size = cfg.scanner.contract_size,
        "TRADEUP starting up"
    );

    let source = build_source(&cfg)?;
    let engine = TradeUpScanner::new(ContractConfig::new(cfg.scanner.contract_size)?);
    let scanner = CatalogScanner::new(source, engine, cfg.catalog.exclude_weapons.clone());

    let report = scanner.run().await?;
    info!(
        scan_id = %report.scan_id,
        items = report.items_scanned,
        excluded = report.items_excluded,
        collections = report.collections,
        opportunities = report.opportunities.len(),
        "Scan complete"
    );

    let filter = OpportunityFilter::from_config(&cfg.report);
    let rows = filter.apply(&report.opportunities);
    println!("{report}\n");
    println!("{}", render_table(&rows, &cfg.report.currency));

    if let Some(path) = cfg.report.output_path.as_deref() {
        let previous = storage::replace_report(&report, Path::new(path))?;
        info!(path, "Report saved");
        if let Some(previous) = previous {
            println!("{}", ScanDelta::between(&previous, &report));
        }
    }

    Ok(())
}

/// Build the catalog source named in the config.
fn build_source(cfg: &AppConfig) -> Result<Box<dyn CatalogSource>> {
    let catalog = &cfg.catalog;
    match catalog.source {
        SourceKind::File => {
            let path = catalog
                .path
                .as_deref()
                .ok_or_else(|| TradeUpError::Config("catalog.path missing".into()))?;
            Ok(Box::new(FileCatalog::new(path)))
        }
        SourceKind::Rest => {
            let base_url = catalog
                .base_url
                .as_deref()
                .ok_or_else(|| TradeUpError::Config("catalog.base_url missing".into()))?;
            let table = catalog
                .table
                .as_deref()
                .ok_or_else(|| TradeUpError::Config("catalog.table missing".into()))?;

            let api_key = match catalog.api_key_env.as_deref() {
                Some(env) => match AppConfig::resolve_env(env) {
                    Ok(key) => Some(SecretString::new(key)),
                    Err(e) => {
                        warn!(error = %e, "Catalog API key not found, using anonymous access");
                        None
                    }
                },
                None => None,
            };

            Ok(Box::new(RestCatalog::new(base_url, table, api_key, catalog.page_size)?))
        }
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tradeup=info"));

    let json_logging = std::env::var("TRADEUP_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
