//! Report filtering and console rendering.
//!
//! Filters never reorder: they drop rows from an already-ranked list.
//! Currency is rounded to 2 decimals and percentages to 1 for display.

use rust_decimal::Decimal;
use std::collections::HashSet;
use std::fmt;

use crate::config::ReportConfig;
use crate::types::{Opportunity, ScanReport, WearGrade};

/// Post-ranking filter for display and export.
#[derive(Debug, Clone, Default)]
pub struct OpportunityFilter {
    pub min_expected_profit: Option<Decimal>,
    pub min_hit_probability: Option<Decimal>,
    /// Case-insensitive substring of the collection name.
    pub collection: Option<String>,
    pub limit: Option<usize>,
}

impl OpportunityFilter {
    pub fn from_config(cfg: &ReportConfig) -> Self {
        Self {
            min_expected_profit: cfg.min_expected_profit,
            min_hit_probability: cfg.min_hit_probability,
            collection: None,
            limit: Some(cfg.top_n),
        }
    }

    fn accepts(&self, opp: &Opportunity) -> bool {
        if self.min_expected_profit.is_some_and(|min| opp.expected_profit < min) {
            return false;
        }
        if self.min_hit_probability.is_some_and(|min| opp.hit_probability_percent < min) {
            return false;
        }
        if let Some(needle) = &self.collection {
            if !opp.collection_name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Matching rows in their original order, truncated to `limit`.
    pub fn apply<'a>(&self, opportunities: &'a [Opportunity]) -> Vec<&'a Opportunity> {
        opportunities
            .iter()
            .filter(|o| self.accepts(o))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

/// Plain-text table of opportunities.
pub fn render_table(rows: &[&Opportunity], currency: &str) -> String {
    if rows.is_empty() {
        return "No profitable trade-ups found.".to_string();
    }

    let mut out = format!(
        "{:>3}  {:<28} {:<4} {:<34} {:>10} {:>10} {:>9} {:>10}\n",
        "#", "Collection", "Wear", "Contract", "Bundle", "Hit", "Hits", "EV"
    );
    for (i, o) in rows.iter().enumerate() {
        let contract = format!("{} → {}", o.lower_rarity, o.higher_rarity);
        out.push_str(&format!(
            "{:>3}  {:<28} {:<4} {:<34} {:>10} {:>9.1}% {:>9} {:>10}\n",
            i + 1,
            truncate(&o.collection_name, 28),
            o.wear_grade,
            truncate(&contract, 34),
            format!("{:.2} {currency}", o.bundle_cost),
            o.hit_probability_percent,
            format!("{}/{}", o.profitable_outcome_count, o.total_higher_tier_item_count),
            format!("{:.2}", o.expected_profit),
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Scan-to-scan change
// ---------------------------------------------------------------------------

/// How the opportunity set moved between two scans. Combinations are
/// matched on (collection, lower tier, wear).
#[derive(Debug, Clone, PartialEq)]
pub struct ScanDelta {
    pub appeared: usize,
    pub disappeared: usize,
    pub persisted: usize,
    pub best_before: Option<Decimal>,
    pub best_after: Option<Decimal>,
}

type Combination<'a> = (&'a str, &'a str, WearGrade);

fn combinations(report: &ScanReport) -> HashSet<Combination<'_>> {
    report
        .opportunities
        .iter()
        .map(|o| (o.collection_name.as_str(), o.lower_rarity.as_str(), o.wear_grade))
        .collect()
}

fn best_expected_profit(report: &ScanReport) -> Option<Decimal> {
    report.opportunities.iter().map(|o| o.expected_profit).max()
}

impl ScanDelta {
    pub fn between(previous: &ScanReport, current: &ScanReport) -> Self {
        let before = combinations(previous);
        let after = combinations(current);
        let persisted = before.intersection(&after).count();

        Self {
            appeared: after.len() - persisted,
            disappeared: before.len() - persisted,
            persisted,
            best_before: best_expected_profit(previous),
            best_after: best_expected_profit(current),
        }
    }
}

impl fmt::Display for ScanDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Since last scan: +{} new, -{} gone, {} unchanged",
            self.appeared, self.disappeared, self.persisted
        )?;
        match (self.best_before, self.best_after) {
            (Some(b), Some(a)) => write!(f, " | best EV {:.2} → {:.2}", b, a),
            (None, Some(a)) => write!(f, " | best EV {:.2}", a),
            _ => Ok(()),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
