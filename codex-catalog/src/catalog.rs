//! The in-memory database assembled by the loader.
//!
//! A [`Catalog`] is an explicit pipeline context: each loader stage inserts
//! into it, the cross-referencer mutates it, and nothing lives in process-wide
//! state. All maps are ordered by key so iteration is reproducible.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;

use crate::error::CatalogError;
use crate::layout::{Category, RECIPE_DOCUMENT, ShardDoc, composite_key, shard_docs};
use crate::types::*;
use crate::yaml::read_document;

/// Every entity loaded for one run, keyed by identity.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub items: BTreeMap<u32, Item>,
    /// Keyed by composite key (`Name#zone`).
    pub merchants: BTreeMap<String, Merchant>,
    /// Keyed by composite key (`Name#zone`).
    pub npcs: BTreeMap<String, Npc>,
    /// Keyed by composite key stored in the quest's `id`.
    pub quests: BTreeMap<String, Quest>,
    pub recipes: BTreeMap<u32, Recipe>,
}

/// Counts from a full [`Catalog::load`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub items: usize,
    pub merchants: usize,
    pub npcs: usize,
    pub quests: usize,
    pub recipes: usize,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every category plus the recipe document from the standard layout
    /// under `db_root`.
    ///
    /// Items load first, then merchants, NPCs, quests, and finally recipes.
    /// The first failure aborts the load.
    pub fn load(db_root: &Path) -> Result<(Self, LoadStats), CatalogError> {
        let mut catalog = Self::new();
        let stats = LoadStats {
            items: catalog.load_items(shard_docs(db_root, Category::Item))?,
            merchants: catalog.load_merchants(shard_docs(db_root, Category::Merchant))?,
            npcs: catalog.load_npcs(shard_docs(db_root, Category::Npc))?,
            quests: catalog.load_quests(shard_docs(db_root, Category::Quest))?,
            recipes: catalog.load_recipe_file(&db_root.join(RECIPE_DOCUMENT))?,
        };
        Ok((catalog, stats))
    }

    /// Insert items from item shards. Reference lists are normalized; IDs
    /// must be unique across all shards.
    pub fn load_items<I>(&mut self, docs: I) -> Result<usize, CatalogError>
    where
        I: IntoIterator<Item = Result<ShardDoc, CatalogError>>,
    {
        let mut count = 0;
        for doc in docs {
            let doc = doc?;
            let parsed: ItemDocument = doc.parse()?;
            log::debug!("{}: {} items", doc.origin, parsed.items.len());
            for mut item in parsed.items {
                item.normalize_references();
                match self.items.entry(item.id) {
                    Entry::Occupied(_) => {
                        return Err(CatalogError::DuplicateItem {
                            id: item.id,
                            path: doc.origin,
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(item);
                    }
                }
                count += 1;
            }
        }
        Ok(count)
    }

    /// Insert merchants, rekeying each by `name#shard`.
    pub fn load_merchants<I>(&mut self, docs: I) -> Result<usize, CatalogError>
    where
        I: IntoIterator<Item = Result<ShardDoc, CatalogError>>,
    {
        let mut count = 0;
        for doc in docs {
            let doc = doc?;
            let parsed: MerchantDocument = doc.parse()?;
            for mut merchant in parsed.merchants {
                merchant.name = composite_key(&merchant.name, &doc.shard);
                insert_keyed(
                    &mut self.merchants,
                    Category::Merchant,
                    merchant.name.clone(),
                    merchant,
                    &doc.origin,
                )?;
                count += 1;
            }
        }
        Ok(count)
    }

    /// Insert NPCs, rekeying each by `name#shard`.
    pub fn load_npcs<I>(&mut self, docs: I) -> Result<usize, CatalogError>
    where
        I: IntoIterator<Item = Result<ShardDoc, CatalogError>>,
    {
        let mut count = 0;
        for doc in docs {
            let doc = doc?;
            let parsed: NpcDocument = doc.parse()?;
            for mut npc in parsed.npcs {
                npc.name = composite_key(&npc.name, &doc.shard);
                insert_keyed(&mut self.npcs, Category::Npc, npc.name.clone(), npc, &doc.origin)?;
                count += 1;
            }
        }
        Ok(count)
    }

    /// Insert quests, rekeying the `id` field (not the display name) by
    /// `id#shard`.
    pub fn load_quests<I>(&mut self, docs: I) -> Result<usize, CatalogError>
    where
        I: IntoIterator<Item = Result<ShardDoc, CatalogError>>,
    {
        let mut count = 0;
        for doc in docs {
            let doc = doc?;
            let parsed: QuestDocument = doc.parse()?;
            for mut quest in parsed.quests {
                quest.id = composite_key(&quest.id, &doc.shard);
                insert_keyed(&mut self.quests, Category::Quest, quest.id.clone(), quest, &doc.origin)?;
                count += 1;
            }
        }
        Ok(count)
    }

    /// Insert recipes from an already-parsed recipe document.
    pub fn load_recipes(&mut self, doc: RecipeDocument, origin: &str) -> Result<usize, CatalogError> {
        let count = doc.recipes.len();
        for recipe in doc.recipes {
            match self.recipes.entry(recipe.id) {
                Entry::Occupied(_) => {
                    return Err(CatalogError::DuplicateRecipe {
                        id: recipe.id,
                        path: origin.to_string(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(recipe);
                }
            }
        }
        Ok(count)
    }

    /// Read `path` as the recipe document and insert its recipes.
    pub fn load_recipe_file(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let doc: RecipeDocument = read_document(path)?;
        self.load_recipes(doc, &path.display().to_string())
    }
}

/// Insert under a composite key, failing if the key is already taken.
fn insert_keyed<V>(
    map: &mut BTreeMap<String, V>,
    category: Category,
    key: String,
    value: V,
    origin: &str,
) -> Result<(), CatalogError> {
    match map.entry(key) {
        Entry::Occupied(slot) => Err(CatalogError::DuplicateKey {
            category,
            key: slot.key().clone(),
            path: origin.to_string(),
        }),
        Entry::Vacant(slot) => {
            slot.insert(value);
            Ok(())
        }
    }
}
