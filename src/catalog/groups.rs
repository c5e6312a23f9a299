//! Catalog normalization.
//!
//! Groups a flat item list into collection → rarity tier → items. Group
//! membership follows each item's collection tags, so an item tagged with
//! several collections fans out into several groups. Groups and tiers keep
//! first-encounter order so results are deterministic for a given input
//! order.

use std::collections::HashMap;

use crate::types::Item;

/// Group name for items that carry no collection tag.
pub const OTHER_COLLECTION: &str = "Other";

/// Items of one rarity label inside a collection.
#[derive(Debug, Clone)]
pub struct RarityBucket<'a> {
    pub rarity: String,
    pub items: Vec<&'a Item>,
}

/// One collection and its rarity buckets.
#[derive(Debug, Clone)]
pub struct CollectionGroup<'a> {
    pub name: String,
    pub tiers: Vec<RarityBucket<'a>>,
}

impl<'a> CollectionGroup<'a> {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tiers: Vec::new(),
        }
    }

    /// Items with exactly this rarity label, if any.
    pub fn items_in(&self, rarity: &str) -> Option<&[&'a Item]> {
        self.tiers
            .iter()
            .find(|b| b.rarity == rarity)
            .map(|b| b.items.as_slice())
    }

    /// Rarity labels present in this group, in first-seen order.
    pub fn rarities(&self) -> impl Iterator<Item = &str> {
        self.tiers.iter().map(|b| b.rarity.as_str())
    }

    pub fn item_count(&self) -> usize {
        self.tiers.iter().map(|b| b.items.len()).sum()
    }

    fn insert(&mut self, item: &'a Item) {
        match self.tiers.iter_mut().find(|b| b.rarity == item.rarity) {
            Some(bucket) => bucket.items.push(item),
            None => self.tiers.push(RarityBucket {
                rarity: item.rarity.clone(),
                items: vec![item],
            }),
        }
    }
}

/// Build collection groups from a flat catalog.
///
/// Untagged items land in the `"Other"` group. A tag repeated on the same
/// item inserts it once.
pub fn group_by_collection(items: &[Item]) -> Vec<CollectionGroup<'_>> {
    let mut groups: Vec<CollectionGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let mut tags: Vec<&str> = item.collection_tags.iter().map(String::as_str).collect();
        if tags.is_empty() {
            tags.push(OTHER_COLLECTION);
        }

        let mut seen: Vec<&str> = Vec::with_capacity(tags.len());
        for tag in tags {
            if seen.contains(&tag) {
                continue;
            }
            seen.push(tag);

            let idx = *index.entry(tag).or_insert_with(|| {
                groups.push(CollectionGroup::new(tag));
                groups.len() - 1
            });
            groups[idx].insert(item);
        }
    }

    groups
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
