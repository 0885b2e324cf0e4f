//! `codex-gen`: load every category, cross-reference, print the result.

use std::io::Write;

use clap::Parser;
use codex_catalog::{Catalog, Category, layout::RECIPE_DOCUMENT, shard_docs};
use codex_import::{CrossRefOptions, cross_reference};

use crate::args::CommonArgs;
use crate::error::CliError;

#[derive(Parser, Debug, Default)]
#[command(name = "codex-gen")]
#[command(about = "Load and cross-reference the item/merchant/NPC/quest database", long_about = None)]
pub struct GenArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Also resolve recipe_rewarded / recipe_reagent entries
    #[arg(long)]
    pub check_recipes: bool,
}

/// Load the database under the resolved root into a fresh catalog.
pub fn load(args: &GenArgs) -> Result<(Catalog, CrossRefOptions), CliError> {
    let settings = args.common.settings()?;
    let db = &settings.paths.db;
    let mut options = settings.crossref_options();
    options.check_recipes |= args.check_recipes;

    let mut catalog = Catalog::new();
    let items = catalog
        .load_items(shard_docs(db, Category::Item))
        .map_err(CliError::catalog("parse items"))?;
    let merchants = catalog
        .load_merchants(shard_docs(db, Category::Merchant))
        .map_err(CliError::catalog("parse merchants"))?;
    let npcs = catalog
        .load_npcs(shard_docs(db, Category::Npc))
        .map_err(CliError::catalog("parse npcs"))?;
    let quests = catalog
        .load_quests(shard_docs(db, Category::Quest))
        .map_err(CliError::catalog("parse quests"))?;
    let recipes = catalog
        .load_recipe_file(&db.join(RECIPE_DOCUMENT))
        .map_err(CliError::catalog("parse recipes"))?;

    log::info!(
        "Loaded {} items, {} merchants, {} npcs, {} quests, {} recipes from {}",
        items,
        merchants,
        npcs,
        quests,
        recipes,
        db.display()
    );
    Ok((catalog, options))
}

/// Run the full load + cross-reference pass and print the summary to `out`.
pub fn run(args: &GenArgs, out: &mut dyn Write) -> Result<Catalog, CliError> {
    let (mut catalog, options) = load(args)?;

    let stats =
        cross_reference(&mut catalog, &options).map_err(CliError::import("cross-reference"))?;
    log::info!(
        "Resolved {} references across {} items ({} merchant links, {} placeholders)",
        stats.resolved,
        stats.items,
        stats.merchant_links,
        stats.sentinels
    );

    print_summary(&catalog, out)?;
    Ok(catalog)
}

/// Merchants, then quests, then NPCs, each in key order.
pub fn print_summary(catalog: &Catalog, out: &mut dyn Write) -> std::io::Result<()> {
    for merchant in catalog.merchants.values() {
        writeln!(out, "{merchant}")?;
    }
    for quest in catalog.quests.values() {
        writeln!(out, "{quest}")?;
    }
    for npc in catalog.npcs.values() {
        writeln!(out, "{npc}")?;
    }
    Ok(())
}
