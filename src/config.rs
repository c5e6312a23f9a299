//! Configuration loading from TOML with environment variable resolution.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Secrets (the catalog API key) are referenced by env-var name in the
//! config and resolved at runtime via `std::env::var`.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;

use crate::catalog::DEFAULT_EXCLUDED_WEAPONS;
use crate::strategy::tradeup::DEFAULT_CONTRACT_SIZE;
use crate::types::TradeUpError;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub scanner: ScannerConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScannerConfig {
    /// Items consumed per contract.
    #[serde(default = "default_contract_size")]
    pub contract_size: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            contract_size: DEFAULT_CONTRACT_SIZE,
        }
    }
}

fn default_contract_size() -> u32 {
    DEFAULT_CONTRACT_SIZE
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    File,
    Rest,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub source: SourceKind,
    /// Snapshot path (file source).
    #[serde(default)]
    pub path: Option<String>,
    /// REST root URL (rest source).
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
    /// Name of the env var holding the REST API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Weapon tags filtered out before scanning (knives, gloves).
    #[serde(default = "default_excluded_weapons")]
    pub exclude_weapons: Vec<String>,
}

fn default_excluded_weapons() -> Vec<String> {
    DEFAULT_EXCLUDED_WEAPONS.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Rows printed to the console.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub min_expected_profit: Option<Decimal>,
    /// Minimum hit probability in percent (0–100).
    #[serde(default)]
    pub min_hit_probability: Option<Decimal>,
    /// Where the JSON report is written. `None` skips saving.
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            min_expected_profit: None,
            min_hit_probability: None,
            output_path: None,
            currency: default_currency(),
        }
    }
}

fn default_top_n() -> usize {
    25
}

fn default_currency() -> String {
    "USD".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid config file: {path}"))
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(contents).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the runner cannot act on.
    pub fn validate(&self) -> Result<()> {
        if self.scanner.contract_size == 0 {
            return Err(TradeUpError::Config("scanner.contract_size must be > 0".into()).into());
        }

        match self.catalog.source {
            SourceKind::File if self.catalog.path.is_none() => {
                return Err(TradeUpError::Config("catalog.path is required for the file source".into()).into());
            }
            SourceKind::Rest if self.catalog.base_url.is_none() || self.catalog.table.is_none() => {
                return Err(TradeUpError::Config(
                    "catalog.base_url and catalog.table are required for the rest source".into(),
                )
                .into());
            }
            _ => {}
        }

        if let Some(p) = self.report.min_hit_probability {
            if p < Decimal::ZERO || p > Decimal::ONE_HUNDRED {
                return Err(TradeUpError::Config(
                    "report.min_hit_probability must be within 0–100".into(),
                )
                .into());
            }
        }

        Ok(())
    }

    /// Resolve an environment variable name to its value.
    /// Useful for loading secrets referenced in the config.
    pub fn resolve_env(env_name: &str) -> Result<String> {
        std::env::var(env_name)
            .with_context(|| format!("Environment variable not set: {env_name}"))
    }
}
