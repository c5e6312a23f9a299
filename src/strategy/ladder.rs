//! Rarity ladder.
//!
//! Ordered hierarchy of rarity tiers with a "next tier up" lookup used to
//! pick the target tier of a trade-up contract. The catalog carries two
//! spellings of the Mil-Spec rung; both step to the same next tier.

/// Rarity labels in ascending order. "Mil-Spec" and "Mil-Spec Grade" are
/// the same rung listed twice.
pub const LADDER: &[&str] = &[
    "Consumer Grade",
    "Industrial Grade",
    "Mil-Spec",
    "Mil-Spec Grade",
    "Restricted",
    "Classified",
    "Covert",
];

/// Tier for knives and gloves. Never originates or receives a contract.
pub const EXTRAORDINARY: &str = "Extraordinary";

/// Whether two labels name the same Mil-Spec rung.
fn is_mil_spec(label: &str) -> bool {
    label == "Mil-Spec" || label == "Mil-Spec Grade"
}

/// The tier a ten-item contract of `current` produces.
///
/// Returns `None` for unknown labels, for Covert, and for anything outside
/// the ladder (Extraordinary).
pub fn next_tier(current: &str) -> Option<&'static str> {
    let pos = LADDER.iter().position(|t| *t == current)?;
    let mut next = pos + 1;

    // Skip the alias of the current rung.
    if is_mil_spec(current) {
        while LADDER.get(next).is_some_and(|t| is_mil_spec(t)) {
            next += 1;
        }
    }

    LADDER.get(next).copied()
}

/// Whether a label is on the ladder at all.
pub fn is_known_tier(label: &str) -> bool {
    LADDER.contains(&label)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
