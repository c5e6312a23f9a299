//! Hosted REST catalog.
//!
//! Pages through a PostgREST-style table exposed by the backend-as-a-service
//! the storefront uses. Each row is one item with its price entries and
//! collection tags embedded as JSON columns.
//!
//! Auth: optional API key sent as both `apikey` and `Authorization: Bearer`.
//! Paging: `offset` / `limit` query parameters until a short page arrives.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info};

use super::file::rows_to_items;
use super::CatalogSource;
use crate::types::{Item, TradeUpError};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

const SOURCE_NAME: &str = "rest";

/// Rows requested per page when the config doesn't say.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Hard stop on paging so a misbehaving backend can't loop forever.
const MAX_PAGES: u32 = 500;

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Catalog client for a hosted REST table.
pub struct RestCatalog {
    http: Client,
    base_url: String,
    table: String,
    api_key: Option<SecretString>,
    page_size: u32,
}

impl RestCatalog {
    /// Create a new REST catalog client.
    ///
    /// `base_url` is the REST root (e.g. `https://<project>/rest/v1`).
    pub fn new(
        base_url: &str,
        table: &str,
        api_key: Option<SecretString>,
        page_size: Option<u32>,
    ) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() || table.trim().is_empty() {
            return Err(TradeUpError::Config(
                "REST catalog needs a base_url and a table".to_string(),
            )
            .into());
        }

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("TRADEUP/0.1.0 (trade-up-scanner)")
            .build()
            .context("Failed to build HTTP client for REST catalog")?;

        Ok(Self {
            http,
            base_url,
            table: table.trim().to_string(),
            api_key,
            page_size: page_size.filter(|&n| n > 0).unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }

    /// URL of one page of rows.
    fn page_url(&self, offset: u64) -> String {
        format!(
            "{}/{}?select=*&offset={}&limit={}",
            self.base_url,
            urlencoding::encode(&self.table),
            offset,
            self.page_size,
        )
    }

    async fn fetch_page(&self, offset: u64) -> Result<Vec<Value>> {
        let url = self.page_url(offset);
        debug!(url = %url, "Fetching catalog page");

        let mut req = self.http.get(&url);
        if let Some(key) = &self.api_key {
            let key = key.expose_secret();
            req = req.header("apikey", key.as_str()).bearer_auth(key);
        }

        let resp = req.send().await.context("REST catalog request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(TradeUpError::Catalog {
                source_name: SOURCE_NAME.to_string(),
                message: format!("HTTP {status}: {body}"),
            }
            .into());
        }

        let rows: Vec<Value> = resp
            .json()
            .await
            .context("Failed to parse REST catalog page")?;
        Ok(rows)
    }
}

#[async_trait]
impl CatalogSource for RestCatalog {
    async fn fetch_items(&self) -> Result<Vec<Item>> {
        let mut rows: Vec<Value> = Vec::new();
        let mut offset: u64 = 0;

        for _ in 0..MAX_PAGES {
            let page = self.fetch_page(offset).await?;
            let len = page.len();
            rows.extend(page);
            if len < self.page_size as usize {
                break;
            }
            offset += len as u64;
        }

        let items = rows_to_items(rows, SOURCE_NAME);
        info!(table = %self.table, count = items.len(), "REST catalog fetched");
        Ok(items)
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
