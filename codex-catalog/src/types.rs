//! Data model types for the game-content database.
//!
//! These types mirror the YAML documents under `db/`: items, merchants, NPCs,
//! quests, and crafting recipes. Every field defaults when absent so curated
//! shards can stay terse.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder meaning "explicitly no reference".
pub const SENTINEL_NONE: &str = "none";

/// Placeholder meaning "reference not yet known".
pub const SENTINEL_UNKNOWN: &str = "unknown";

/// Returns true for reference-list placeholders that are never looked up.
pub fn is_sentinel(value: &str) -> bool {
    value == SENTINEL_NONE || value == SENTINEL_UNKNOWN
}

// ── Item ────────────────────────────────────────────────────────────────────

/// An item record, identified by its source-assigned integer ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    /// External reference (informational, never validated).
    #[serde(default)]
    pub eqtc: i32,
    /// External reference (informational, never validated).
    #[serde(default)]
    pub alla: i32,
    /// Composite merchant keys (`Name#zone`) of merchants selling this item.
    #[serde(default)]
    pub sold_by: Vec<String>,
    /// Composite quest keys rewarding this item.
    #[serde(default)]
    pub quest_rewarded: Vec<String>,
    /// Composite quest keys consuming this item.
    #[serde(default)]
    pub quest_reagent: Vec<String>,
    /// Composite NPC keys dropping this item.
    #[serde(default)]
    pub dropped_by: Vec<String>,
    #[serde(default)]
    pub recipe_rewarded: Vec<String>,
    #[serde(default)]
    pub recipe_reagent: Vec<String>,
}

impl Item {
    /// A fresh record whose name and reference lists are all `unknown`.
    pub fn placeholder(id: u32) -> Self {
        let unknown = || vec![SENTINEL_UNKNOWN.to_string()];
        Self {
            id,
            name: SENTINEL_UNKNOWN.to_string(),
            eqtc: 0,
            alla: 0,
            sold_by: unknown(),
            quest_rewarded: unknown(),
            quest_reagent: unknown(),
            dropped_by: unknown(),
            recipe_rewarded: unknown(),
            recipe_reagent: unknown(),
        }
    }

    /// Replace spaces with underscores in every reference-list entry.
    ///
    /// No shard suffix is appended: items are not shard-scoped, and their
    /// references are expected to already carry the `#zone` part.
    pub fn normalize_references(&mut self) {
        for list in [
            &mut self.sold_by,
            &mut self.quest_rewarded,
            &mut self.quest_reagent,
            &mut self.dropped_by,
            &mut self.recipe_rewarded,
            &mut self.recipe_reagent,
        ] {
            for entry in list.iter_mut() {
                if entry.contains(' ') {
                    *entry = entry.replace(' ', "_");
                }
            }
        }
    }
}

// ── Merchant ────────────────────────────────────────────────────────────────

/// A merchant, keyed by `normalized name + "#" + shard` once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    pub name: String,
    #[serde(default)]
    pub loc: String,
    /// Item IDs sold here. Filled in by cross-referencing, never curated.
    #[serde(default)]
    pub items: Vec<u32>,
}

impl fmt::Display for Merchant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "merchant {} loc={:?} items={:?}", self.name, self.loc, self.items)
    }
}

// ── NPC ─────────────────────────────────────────────────────────────────────

/// A non-player character, keyed like merchants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub name: String,
    #[serde(default)]
    pub min: i32,
    #[serde(default)]
    pub max: i32,
    #[serde(default)]
    pub alla: i32,
}

impl fmt::Display for Npc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "npc {} min={} max={} alla={}",
            self.name, self.min, self.max, self.alla
        )
    }
}

// ── Quest ───────────────────────────────────────────────────────────────────

/// A quest. The `id` field holds the composite key; `name` is display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub alla: i32,
    #[serde(default)]
    pub min: i32,
    #[serde(default)]
    pub max: i32,
}

impl fmt::Display for Quest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "quest {} name={:?} alla={} min={} max={}",
            self.id, self.name, self.alla, self.min, self.max
        )
    }
}

// ── Recipe ──────────────────────────────────────────────────────────────────

/// A crafting recipe with its ordered components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    /// Skill level at which the combine becomes trivial.
    #[serde(default)]
    pub trivial: i32,
    #[serde(default)]
    pub recipe_type: String,
    #[serde(default)]
    pub other_id: i32,
    #[serde(default)]
    pub result_id: u32,
    #[serde(default)]
    pub components: Vec<RecipeComponent>,
}

/// One slot of a recipe. Owned by its recipe, never addressed on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeComponent {
    pub component_id: i32,
    pub item_id: u32,
    #[serde(default)]
    pub other_id: i32,
    #[serde(default)]
    pub other_type: i32,
}

// ── Documents ───────────────────────────────────────────────────────────────

/// Top-level shape of an item shard file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Top-level shape of a merchant shard file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantDocument {
    #[serde(default)]
    pub merchants: Vec<Merchant>,
}

/// Top-level shape of an NPC shard file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcDocument {
    #[serde(default)]
    pub npcs: Vec<Npc>,
}

/// Top-level shape of a quest shard file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDocument {
    #[serde(default)]
    pub quests: Vec<Quest>,
}

/// The single recipe document (`db/recipe.yaml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDocument {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}
