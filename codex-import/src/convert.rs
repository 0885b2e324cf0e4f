//! Output stages of the legacy converter.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use codex_catalog::layout::RECIPE_DOCUMENT;
use codex_catalog::{Category, Item, Recipe, RecipeDocument, write_document};

use crate::error::ImportError;
use crate::legacy::LegacyItem;
use crate::merge::{MergeStats, merge_items};
use crate::partition::{PartitionRules, plan_shards, write_shards};
use crate::progress::ConvertProgress;

/// Statistics from [`convert_items`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ItemConvertStats {
    pub rows: usize,
    pub merge: MergeStats,
    /// Items that landed in a written shard.
    pub written_items: usize,
    pub shards: Vec<PathBuf>,
}

/// Write `recipes` as the single recipe document under `db_dir`.
pub fn write_recipes(db_dir: &Path, recipes: Vec<Recipe>) -> Result<PathBuf, ImportError> {
    let path = db_dir.join(RECIPE_DOCUMENT);
    write_document(&path, &RecipeDocument { recipes })?;
    Ok(path)
}

/// Merge legacy item rows into `known`, partition them, and write the shards
/// into the item directory under `db_dir`.
pub fn convert_items(
    rows: &[LegacyItem],
    known: &BTreeMap<u32, Item>,
    rules: &PartitionRules,
    db_dir: &Path,
    progress: &dyn ConvertProgress,
) -> Result<ItemConvertStats, ImportError> {
    let (items, merge) = merge_items(rows, known);
    let shards = plan_shards(items, rules);
    let written_items = shards.iter().map(|s| s.items.len()).sum();
    let shard_paths = write_shards(&shards, &Category::Item.root(db_dir), progress)?;

    Ok(ItemConvertStats {
        rows: rows.len(),
        merge,
        written_items,
        shards: shard_paths,
    })
}
