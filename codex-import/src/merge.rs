//! Merge freshly parsed legacy item rows into the canonical item set.
//!
//! The canonical record (loaded from `db/item/`) carries curated reference
//! lists the legacy export knows nothing about, so a known ID only takes the
//! legacy name. Unknown IDs start from [`Item::placeholder`].

use std::collections::BTreeMap;

use codex_catalog::Item;

use crate::legacy::LegacyItem;

/// How many rows matched an existing record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub merged: usize,
    pub created: usize,
}

/// Build the output record for one legacy row.
pub fn merge_item(row: &LegacyItem, known: &BTreeMap<u32, Item>) -> Item {
    let mut item = known
        .get(&row.id)
        .cloned()
        .unwrap_or_else(|| Item::placeholder(row.id));
    item.name = row.name.clone();
    item
}

/// Merge every row, keeping input order.
pub fn merge_items(rows: &[LegacyItem], known: &BTreeMap<u32, Item>) -> (Vec<Item>, MergeStats) {
    let mut stats = MergeStats::default();
    let items = rows
        .iter()
        .map(|row| {
            if known.contains_key(&row.id) {
                stats.merged += 1;
            } else {
                stats.created += 1;
            }
            merge_item(row, known)
        })
        .collect();
    (items, stats)
}
