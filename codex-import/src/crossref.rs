//! Cross-reference pass: resolve every item reference against the loaded maps.
//!
//! Items are walked in ascending ID order. For each item the seller list is
//! resolved first (linking the item into the merchant's inventory), then quest
//! rewards, quest reagents, and droppers. The first dangling reference aborts
//! the pass; merchants touched before that point keep their partial lists.

use std::collections::HashSet;
use std::fmt;

use codex_catalog::{Catalog, is_sentinel, normalize_name};

use crate::error::ImportError;

/// The kind of entity a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefTarget {
    Merchant,
    Quest,
    Npc,
    Recipe,
}

impl fmt::Display for RefTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RefTarget::Merchant => "merchant",
            RefTarget::Quest => "quest",
            RefTarget::Npc => "npc",
            RefTarget::Recipe => "recipe",
        })
    }
}

/// Knobs for [`cross_reference`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrossRefOptions {
    /// Also resolve `recipe_rewarded` / `recipe_reagent` entries, by recipe
    /// ID or by normalized recipe name.
    pub check_recipes: bool,
}

/// Counts from a successful pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrossRefStats {
    pub items: usize,
    pub resolved: usize,
    pub sentinels: usize,
    /// Item IDs appended to merchant inventories.
    pub merchant_links: usize,
}

/// Validate all item references and back-fill merchant inventories.
pub fn cross_reference(
    catalog: &mut Catalog,
    options: &CrossRefOptions,
) -> Result<CrossRefStats, ImportError> {
    let Catalog {
        items,
        merchants,
        npcs,
        quests,
        recipes,
    } = catalog;

    let recipe_names: HashSet<String> = if options.check_recipes {
        recipes.values().map(|r| normalize_name(&r.name)).collect()
    } else {
        HashSet::new()
    };

    let mut stats = CrossRefStats::default();

    for item in items.values() {
        stats.items += 1;
        let missing = |target: RefTarget, name: &str| ImportError::NotFound {
            target,
            name: name.to_string(),
            item: item.id,
        };

        for name in &item.sold_by {
            if is_sentinel(name) {
                stats.sentinels += 1;
                continue;
            }
            let merchant = merchants
                .get_mut(name)
                .ok_or_else(|| missing(RefTarget::Merchant, name))?;
            merchant.items.push(item.id);
            stats.merchant_links += 1;
            stats.resolved += 1;
        }

        for name in item.quest_rewarded.iter().chain(&item.quest_reagent) {
            if is_sentinel(name) {
                stats.sentinels += 1;
                continue;
            }
            if !quests.contains_key(name) {
                return Err(missing(RefTarget::Quest, name));
            }
            stats.resolved += 1;
        }

        for name in &item.dropped_by {
            if is_sentinel(name) {
                stats.sentinels += 1;
                continue;
            }
            if !npcs.contains_key(name) {
                return Err(missing(RefTarget::Npc, name));
            }
            stats.resolved += 1;
        }

        if options.check_recipes {
            for name in item.recipe_rewarded.iter().chain(&item.recipe_reagent) {
                if is_sentinel(name) {
                    stats.sentinels += 1;
                    continue;
                }
                let by_id = name
                    .parse::<u32>()
                    .is_ok_and(|id| recipes.contains_key(&id));
                if !by_id && !recipe_names.contains(name) {
                    return Err(missing(RefTarget::Recipe, name));
                }
                stats.resolved += 1;
            }
        }
    }

    log::debug!(
        "Cross-referenced {} items: {} resolved, {} sentinels",
        stats.items,
        stats.resolved,
        stats.sentinels
    );
    Ok(stats)
}
