//! Price resolution.
//!
//! Looks up the market price of an item at a requested wear grade. Input
//! items of a contract are priced at the exact wear only; output items may
//! degrade to a worse wear when the exact grade is unlisted, never to a
//! better one.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{Item, WearGrade};

/// A price together with the wear grade it was actually listed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedPrice {
    pub price: Decimal,
    pub actual_wear: WearGrade,
}

/// Exact-wear price: first published, normal, non-zero entry at `wear`.
pub fn exact_price(item: &Item, wear: WearGrade) -> Option<Decimal> {
    item.price_entries
        .iter()
        .find(|e| e.wear_grade == wear && e.is_tradeable())
        .map(|e| e.price)
}

/// Exact price at `wear`, otherwise the first priced wear strictly worse
/// than `wear`.
pub fn resolve_price(item: &Item, wear: WearGrade) -> Option<ResolvedPrice> {
    std::iter::once(wear)
        .chain(wear.worse_grades().iter().copied())
        .find_map(|w| {
            exact_price(item, w).map(|price| ResolvedPrice {
                price,
                actual_wear: w,
            })
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
