//! Strategy engine — rarity ladder, price resolution, and trade-up
//! contract evaluation.
//!
//! The whole engine is a pure function of a catalog snapshot: no I/O, no
//! caching, no shared state. [`compute_trade_up_opportunities`] is the
//! single entry point callers need.

pub mod ladder;
pub mod pricing;
pub mod tradeup;

use tracing::info;

use crate::catalog::groups::group_by_collection;
use crate::types::{Item, Opportunity};
use self::tradeup::{rank, ContractConfig, TradeUpCalculator};

/// Result of one engine pass, with the counters the runner reports.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub collections: usize,
    pub opportunities: Vec<Opportunity>,
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Pipelines catalog normalization → contract evaluation → ranking.
pub struct TradeUpScanner {
    calculator: TradeUpCalculator,
}

impl Default for TradeUpScanner {
    fn default() -> Self {
        Self::new(ContractConfig::default())
    }
}

impl TradeUpScanner {
    pub fn new(config: ContractConfig) -> Self {
        Self {
            calculator: TradeUpCalculator::new(config),
        }
    }

    pub fn config(&self) -> &ContractConfig {
        self.calculator.config()
    }

    /// Ranked opportunities for a catalog snapshot.
    pub fn scan(&self, items: &[Item]) -> Vec<Opportunity> {
        self.scan_detailed(items).opportunities
    }

    /// Same as [`scan`](Self::scan), also returning the collection count.
    pub fn scan_detailed(&self, items: &[Item]) -> ScanOutcome {
        let groups = group_by_collection(items);
        let mut opportunities = self.calculator.find_opportunities(&groups);
        rank(&mut opportunities);

        info!(
            items_in = items.len(),
            collections = groups.len(),
            opportunities = opportunities.len(),
            contract_size = self.config().contract_size(),
            "Trade-up scan complete"
        );

        ScanOutcome {
            collections: groups.len(),
            opportunities,
        }
    }
}

/// Ranked profitable ten-item trade-up contracts for a catalog snapshot.
///
/// Callers filter out knives and gloves beforehand. An empty result means
/// no profitable contract exists.
pub fn compute_trade_up_opportunities(items: &[Item]) -> Vec<Opportunity> {
    TradeUpScanner::default().scan(items)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
