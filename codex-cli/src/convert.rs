//! `soda-convert`: legacy pipe tables -> recipe document + item shards.

use std::path::PathBuf;

use clap::Parser;
use codex_catalog::{Catalog, Category, shard_docs};
use codex_import::legacy::{COMPONENT_TABLE, ITEM_TABLE, RECIPE_TABLE};
use codex_import::{
    ConvertProgress, ItemConvertStats, LogProgress, attach_components, convert_items,
    parse_items, parse_recipes, read_table, write_recipes,
};

use crate::args::CommonArgs;
use crate::error::CliError;

#[derive(Parser, Debug, Default)]
#[command(name = "soda-convert")]
#[command(about = "Convert legacy pipe-delimited exports into YAML documents", long_about = None)]
pub struct ConvertArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory holding recipes.txt, recipecomp.txt and items.txt
    /// (overrides [paths] legacy)
    #[arg(long)]
    pub legacy: Option<PathBuf>,

    /// Do not write the last item shard, matching the legacy converter output
    #[arg(long)]
    pub legacy_trailing_shard: bool,
}

/// Counts from a successful conversion.
#[derive(Debug)]
pub struct ConvertReport {
    pub recipes: usize,
    pub components: usize,
    pub items: ItemConvertStats,
}

pub fn run(args: &ConvertArgs, progress: &dyn ConvertProgress) -> Result<ConvertReport, CliError> {
    let mut settings = args.common.settings()?;
    if let Some(legacy) = &args.legacy {
        settings.paths.legacy = legacy.clone();
    }
    settings.partition.legacy_trailing_shard |= args.legacy_trailing_shard;
    let db = &settings.paths.db;
    let legacy = &settings.paths.legacy;

    progress.on_phase("Converting recipes");
    let mut recipes = read_table(&legacy.join(RECIPE_TABLE))
        .and_then(|text| parse_recipes(&text))
        .map_err(CliError::import("convert recipe"))?;
    let components = read_table(&legacy.join(COMPONENT_TABLE))
        .and_then(|text| attach_components(&mut recipes, &text))
        .map_err(CliError::import("convert recipe components"))?;
    let recipe_count = recipes.len();
    let recipe_path = write_recipes(db, recipes).map_err(CliError::import("encode recipe"))?;
    progress.on_complete(&format!(
        "Converted {} recipes ({} components) into {}",
        recipe_count,
        components,
        recipe_path.display()
    ));

    progress.on_phase("Converting items");
    let mut canonical = Catalog::new();
    canonical
        .load_items(shard_docs(db, Category::Item))
        .map_err(CliError::catalog("parse items"))?;
    let rows = read_table(&legacy.join(ITEM_TABLE))
        .and_then(|text| parse_items(&text))
        .map_err(CliError::import("convert items"))?;
    let items = convert_items(
        &rows,
        &canonical.items,
        &settings.partition_rules(),
        db,
        progress,
    )
    .map_err(CliError::import("convert items"))?;
    progress.on_complete(&format!(
        "Converted {} items ({} merged, {} new) into {} shards, {} items written",
        items.rows,
        items.merge.merged,
        items.merge.created,
        items.shards.len(),
        items.written_items
    ));

    Ok(ConvertReport {
        recipes: recipe_count,
        components,
        items,
    })
}

/// Entry point used by the binary.
pub fn main_with(args: &ConvertArgs) -> Result<(), CliError> {
    run(args, &LogProgress).map(|_| ())
}
