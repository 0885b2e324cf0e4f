use std::fs;
use std::path::Path;

use codex_catalog::{ItemDocument, read_document};
use codex_cli::CliError;
use codex_cli::args::CommonArgs;
use codex_cli::convert::{self, ConvertArgs};
use codex_cli::generate::{self, GenArgs};
use codex_import::SilentProgress;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A root with an explicit (empty) codex.toml so user settings never leak in.
fn root() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(&tmp.path().join("codex.toml"), "");
    tmp
}

fn common(root: &TempDir) -> CommonArgs {
    CommonArgs {
        root: Some(root.path().to_path_buf()),
        db: None,
    }
}

fn seed_database(root: &Path) {
    let db = root.join("db");
    write(
        &db.join("item/0-4999.yaml"),
        r#"
items:
  - id: 1001
    name: Cloth Cap
    sold_by: ["Merchant Bob#qeynos"]
    dropped_by: ["a rat#qeynos"]
    quest_rewarded: [none]
  - id: 1002
    name: Rat Whisker
    sold_by: ["Merchant Bob#qeynos"]
    quest_reagent: ["Rat Whiskers#qeynos"]
"#,
    );
    write(&db.join("item/_base.yaml"), "this is: [not, loaded");
    write(
        &db.join("merchant/qeynos.yaml"),
        "merchants:\n  - name: Merchant Bob\n    loc: \"1, 2, 3\"\n",
    );
    write(&db.join("npc/qeynos.yaml"), "npcs:\n  - name: a rat\n    min: 1\n    max: 2\n");
    write(
        &db.join("quest/qeynos.yaml"),
        "quests:\n  - id: Rat Whiskers\n    name: Rat Whiskers\n",
    );
    write(&db.join("recipe.yaml"), "recipes: []\n");
}

#[test]
fn gen_prints_cross_referenced_summary() {
    let tmp = root();
    seed_database(tmp.path());
    let args = GenArgs {
        common: common(&tmp),
        check_recipes: false,
    };

    let mut out = Vec::new();
    let catalog = generate::run(&args, &mut out).unwrap();

    assert_eq!(catalog.merchants["Merchant_Bob#qeynos"].items, vec![1001, 1002]);
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("merchant Merchant_Bob#qeynos"));
    assert!(lines[0].contains("[1001, 1002]"));
    assert!(lines[1].starts_with("quest Rat_Whiskers#qeynos"));
    assert!(lines[2].starts_with("npc a_rat#qeynos"));
}

#[test]
fn gen_reports_stage_of_dangling_reference() {
    let tmp = root();
    seed_database(tmp.path());
    write(
        &tmp.path().join("db/item/5000-9999.yaml"),
        "items:\n  - id: 5001\n    sold_by: [\"Nobody#qeynos\"]\n",
    );
    let args = GenArgs {
        common: common(&tmp),
        check_recipes: false,
    };

    let err = generate::run(&args, &mut Vec::new()).unwrap_err();
    assert!(matches!(err, CliError::Import { stage: "cross-reference", .. }));
    assert_eq!(
        err.to_string(),
        "cross-reference: merchant Nobody#qeynos not found (referenced by item 5001)"
    );
}

#[test]
fn gen_reports_duplicate_item_while_parsing() {
    let tmp = root();
    seed_database(tmp.path());
    write(
        &tmp.path().join("db/item/extra.yaml"),
        "items:\n  - id: 1001\n    name: Clone\n",
    );
    let args = GenArgs {
        common: common(&tmp),
        check_recipes: false,
    };

    let err = generate::run(&args, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().starts_with("parse items: duplicate item id: 1001"));
}

fn legacy_item_row(id: u32, name: &str) -> String {
    let mut fields = vec![String::new(); 315];
    fields[1] = name.to_string();
    fields[5] = id.to_string();
    fields.join("|")
}

fn seed_legacy(root: &Path) {
    let soda = root.join("soda");
    write(
        &soda.join("recipes.txt"),
        "id|name|trivial|x|type|other|result|a|b|c|d|e|f\n\
         7|Cap|10|0|tailoring|0|1001|0|0|0|0|0|0\n",
    );
    write(
        &soda.join("recipecomp.txt"),
        "recipe|slot|x|item|other|type|a|b|c|d|e|f\n\
         7|1|x|1002|0|0|0|0|0|0|0|0\n\
         7|2|x|1002|0|0|0|0|0|0|0|0\n",
    );
    let rows = [
        legacy_item_row(0, "header"),
        legacy_item_row(1001, "Cloth Cap (Legacy)"),
        legacy_item_row(1003, "New Thing"),
        legacy_item_row(6000, "Far Away"),
    ];
    write(&soda.join("items.txt"), &(rows.join("\n") + "\n"));
}

#[test]
fn convert_writes_recipes_and_merged_shards() {
    let tmp = root();
    seed_database(tmp.path());
    seed_legacy(tmp.path());
    let args = ConvertArgs {
        common: common(&tmp),
        legacy: None,
        legacy_trailing_shard: false,
    };

    let report = convert::run(&args, &SilentProgress).unwrap();
    assert_eq!(report.recipes, 1);
    assert_eq!(report.components, 2);
    assert_eq!(report.items.merge.merged, 1);
    assert_eq!(report.items.merge.created, 2);

    let first: ItemDocument = read_document(&tmp.path().join("db/item/0-5999.yaml")).unwrap();
    assert_eq!(first.items.len(), 2);
    let cap = &first.items[0];
    assert_eq!(cap.name, "Cloth Cap (Legacy)");
    assert_eq!(cap.sold_by, vec!["Merchant_Bob#qeynos"]);
    assert_eq!(first.items[1].sold_by, vec!["unknown"]);

    let last: ItemDocument = read_document(&tmp.path().join("db/item/6000-6999.yaml")).unwrap();
    assert_eq!(last.items[0].id, 6000);
}

#[test]
fn convert_legacy_flag_drops_trailing_shard() {
    let tmp = root();
    seed_database(tmp.path());
    seed_legacy(tmp.path());
    let args = ConvertArgs {
        common: common(&tmp),
        legacy: None,
        legacy_trailing_shard: true,
    };

    let report = convert::run(&args, &SilentProgress).unwrap();
    assert_eq!(report.items.shards.len(), 1);
    assert!(!tmp.path().join("db/item/6000-6999.yaml").exists());
}

#[test]
fn convert_missing_table_names_the_stage() {
    let tmp = root();
    seed_database(tmp.path());
    let args = ConvertArgs {
        common: common(&tmp),
        legacy: None,
        legacy_trailing_shard: false,
    };

    let err = convert::run(&args, &SilentProgress).unwrap_err();
    assert!(matches!(err, CliError::Import { stage: "convert recipe", .. }));
}
