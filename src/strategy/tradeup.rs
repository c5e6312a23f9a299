//! Trade-up contract evaluation.
//!
//! For every (collection, rarity tier, wear grade) combination, prices a
//! bundle of the cheapest lower-tier item and compares it against every
//! possible output of the next tier up. Outputs are drawn uniformly, so
//! the expected profit is the sum of winning margins divided by the full
//! size of the output pool.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::cmp::Ordering;
use tracing::debug;

use super::ladder::next_tier;
use super::pricing::{exact_price, resolve_price, ResolvedPrice};
use crate::catalog::groups::CollectionGroup;
use crate::types::{Item, ItemRef, Opportunity, TradeUpError, WearGrade};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Number of input items a contract consumes.
pub const DEFAULT_CONTRACT_SIZE: u32 = 10;

/// Contract parameters. The size is always at least one item.
#[derive(Debug, Clone)]
pub struct ContractConfig {
    contract_size: u32,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            contract_size: DEFAULT_CONTRACT_SIZE,
        }
    }
}

impl ContractConfig {
    pub fn new(contract_size: u32) -> Result<Self, TradeUpError> {
        if contract_size == 0 {
            return Err(TradeUpError::Config(
                "contract size must be at least 1".to_string(),
            ));
        }
        Ok(Self { contract_size })
    }

    pub fn contract_size(&self) -> u32 {
        self.contract_size
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Evaluates trade-up contracts over normalized collection groups.
pub struct TradeUpCalculator {
    config: ContractConfig,
}

impl TradeUpCalculator {
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Every profitable combination across all groups, in evaluation order
    /// (groups, then tiers, then wears). Unranked.
    pub fn find_opportunities(&self, groups: &[CollectionGroup<'_>]) -> Vec<Opportunity> {
        let mut found = Vec::new();

        for group in groups {
            for lower in group.rarities() {
                for &wear in WearGrade::ALL {
                    if let Some(opp) = self.evaluate(group, lower, wear) {
                        found.push(opp);
                    }
                }
            }
        }

        found
    }

    /// Evaluate one (group, tier, wear) combination.
    fn evaluate(
        &self,
        group: &CollectionGroup<'_>,
        lower: &str,
        wear: WearGrade,
    ) -> Option<Opportunity> {
        let higher = next_tier(lower)?;
        let outputs = group.items_in(higher)?;
        let inputs = group.items_in(lower)?;

        let Some((cheapest, unit_price)) = cheapest_at(inputs, wear) else {
            debug!(
                collection = %group.name,
                tier = lower,
                wear = %wear,
                "No exact-wear input price"
            );
            return None;
        };

        let Some(bundle_cost) = unit_price.checked_mul(Decimal::from(self.config.contract_size))
        else {
            debug!(
                collection = %group.name,
                tier = lower,
                wear = %wear,
                unit_price = %unit_price,
                "Bundle cost out of range"
            );
            return None;
        };

        let mut profitable = 0usize;
        let mut winnings = Decimal::ZERO;
        let mut representative: Option<(&Item, ResolvedPrice)> = None;

        for &item in outputs {
            let Some(resolved) = resolve_price(item, wear) else {
                continue;
            };
            if resolved.price <= bundle_cost {
                continue;
            }
            let Some(sum) = resolved
                .price
                .checked_sub(bundle_cost)
                .and_then(|margin| winnings.checked_add(margin))
            else {
                debug!(
                    collection = %group.name,
                    tier = lower,
                    wear = %wear,
                    "Winnings out of range"
                );
                return None;
            };
            winnings = sum;
            profitable += 1;
            if representative.is_none() {
                representative = Some((item, resolved));
            }
        }

        let Some((rep_item, rep)) = representative else {
            debug!(
                collection = %group.name,
                tier = lower,
                wear = %wear,
                bundle_cost = %bundle_cost,
                "No profitable outcome"
            );
            return None;
        };

        let total = outputs.len();
        let Some(figures) = contract_figures(rep.price, bundle_cost, winnings, profitable, total)
        else {
            debug!(
                collection = %group.name,
                tier = lower,
                wear = %wear,
                bundle_cost = %bundle_cost,
                "Contract figures out of range"
            );
            return None;
        };

        let opp = Opportunity {
            collection_name: group.name.clone(),
            wear_grade: wear,
            lower_rarity: lower.to_string(),
            higher_rarity: higher.to_string(),
            contract_size: self.config.contract_size,
            cheapest_lower_item: ItemRef::from(cheapest),
            unit_price,
            representative_higher_item: ItemRef::from(rep_item),
            representative_price: rep.price,
            representative_wear: rep.actual_wear,
            bundle_cost,
            profit: figures.profit,
            profit_percent: figures.profit_percent,
            total_higher_tier_item_count: total,
            profitable_outcome_count: profitable,
            hit_probability_percent: figures.hit_probability_percent,
            expected_profit: figures.expected_profit,
        };

        debug!(
            collection = %opp.collection_name,
            tier = lower,
            wear = %wear,
            bundle_cost = %opp.bundle_cost,
            hits = profitable,
            outcomes = total,
            expected_profit = %opp.expected_profit.round_dp(2),
            "Opportunity found"
        );

        Some(opp)
    }
}

/// Derived money figures of one contract.
struct ContractFigures {
    profit: Decimal,
    profit_percent: Decimal,
    hit_probability_percent: Decimal,
    expected_profit: Decimal,
}

/// `None` when a figure leaves the `Decimal` range or a divisor is zero.
fn contract_figures(
    representative_price: Decimal,
    bundle_cost: Decimal,
    winnings: Decimal,
    profitable: usize,
    total: usize,
) -> Option<ContractFigures> {
    let total = Decimal::from(total as u64);
    let profit = representative_price.checked_sub(bundle_cost)?;
    Some(ContractFigures {
        profit,
        profit_percent: profit.checked_div(bundle_cost)?.checked_mul(dec!(100))?,
        hit_probability_percent: Decimal::from(profitable as u64)
            .checked_mul(dec!(100))?
            .checked_div(total)?,
        expected_profit: winnings.checked_div(total)?,
    })
}

/// Cheapest item at exactly `wear`. Ties keep the first item seen.
fn cheapest_at<'a>(items: &[&'a Item], wear: WearGrade) -> Option<(&'a Item, Decimal)> {
    let mut best: Option<(&'a Item, Decimal)> = None;
    for &item in items {
        if let Some(price) = exact_price(item, wear) {
            if best.map_or(true, |(_, p)| price < p) {
                best = Some((item, price));
            }
        }
    }
    best
}

/// Descending expected profit, then descending hit probability. Stable, so
/// full ties keep evaluation order.
pub fn rank(opportunities: &mut [Opportunity]) {
    opportunities.sort_by(compare);
}

fn compare(a: &Opportunity, b: &Opportunity) -> Ordering {
    b.expected_profit
        .cmp(&a.expected_profit)
        .then_with(|| b.hit_probability_percent.cmp(&a.hit_probability_percent))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
