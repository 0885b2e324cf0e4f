use codex_catalog::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_yaml(dir: &Path, name: &str, content: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

fn docs(list: Vec<ShardDoc>) -> impl Iterator<Item = Result<ShardDoc, CatalogError>> {
    list.into_iter().map(Ok)
}

#[test]
fn merchants_are_keyed_by_name_and_shard() {
    let mut catalog = Catalog::new();
    let count = catalog
        .load_merchants(docs(vec![ShardDoc::inline(
            "qeynos",
            r#"
merchants:
  - name: Merchant Bob
    loc: "10, 20, 0"
  - name: Tailor
"#,
        )]))
        .unwrap();

    assert_eq!(count, 2);
    let bob = &catalog.merchants["Merchant_Bob#qeynos"];
    assert_eq!(bob.name, "Merchant_Bob#qeynos");
    assert_eq!(bob.loc, "10, 20, 0");
    assert!(bob.items.is_empty());
    assert!(catalog.merchants.contains_key("Tailor#qeynos"));
}

#[test]
fn same_name_in_different_shards_stays_distinct() {
    let mut catalog = Catalog::new();
    catalog
        .load_npcs(docs(vec![
            ShardDoc::inline("qeynos", "npcs:\n  - name: a rat\n    min: 1\n    max: 2\n"),
            ShardDoc::inline("freeport", "npcs:\n  - name: a rat\n    min: 3\n    max: 4\n"),
        ]))
        .unwrap();

    assert_eq!(catalog.npcs.len(), 2);
    assert_eq!(catalog.npcs["a_rat#qeynos"].max, 2);
    assert_eq!(catalog.npcs["a_rat#freeport"].min, 3);
}

#[test]
fn quests_rekey_id_not_display_name() {
    let mut catalog = Catalog::new();
    catalog
        .load_quests(docs(vec![ShardDoc::inline(
            "halas",
            "quests:\n  - id: Snow Job\n    name: The Snow Job\n    alla: 42\n",
        )]))
        .unwrap();

    let quest = &catalog.quests["Snow_Job#halas"];
    assert_eq!(quest.id, "Snow_Job#halas");
    assert_eq!(quest.name, "The Snow Job");
    assert_eq!(quest.alla, 42);
}

#[test]
fn duplicate_composite_key_is_fatal() {
    let mut catalog = Catalog::new();
    let err = catalog
        .load_merchants(docs(vec![ShardDoc::inline(
            "qeynos",
            "merchants:\n  - name: Bob\n  - name: Bob\n",
        )]))
        .unwrap_err();
    assert!(
        matches!(err, CatalogError::DuplicateKey { category: Category::Merchant, ref key, .. } if key == "Bob#qeynos")
    );
}

#[test]
fn item_references_are_normalized_without_shard_suffix() {
    let mut catalog = Catalog::new();
    catalog
        .load_items(docs(vec![ShardDoc::inline(
            "0-4999",
            r#"
items:
  - id: 1001
    name: Short Sword
    sold_by: ["Merchant Bob#qeynos", none]
    dropped_by: ["a rat#qeynos"]
    quest_rewarded: [unknown]
    quest_reagent: ["Snow Job#halas"]
"#,
        )]))
        .unwrap();

    let item = &catalog.items[&1001];
    assert_eq!(item.sold_by, vec!["Merchant_Bob#qeynos", "none"]);
    assert_eq!(item.dropped_by, vec!["a_rat#qeynos"]);
    assert_eq!(item.quest_reagent, vec!["Snow_Job#halas"]);
    assert!(item.recipe_rewarded.is_empty());
}

#[test]
fn duplicate_item_id_across_shards_is_fatal() {
    let mut catalog = Catalog::new();
    let err = catalog
        .load_items(docs(vec![
            ShardDoc::inline("a", "items:\n  - id: 7\n    name: One\n"),
            ShardDoc::inline("b", "items:\n  - id: 7\n    name: Two\n"),
        ]))
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateItem { id: 7, .. }));
    assert!(err.to_string().starts_with("duplicate item id: 7"));
}

#[test]
fn parse_failure_names_the_origin() {
    let mut catalog = Catalog::new();
    let err = catalog
        .load_items(docs(vec![ShardDoc::inline("broken", "items: [ {id: nope} ]")]))
        .unwrap_err();
    match err {
        CatalogError::Parse { path, .. } => assert_eq!(path, "<broken>"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn walker_visits_nested_documents_in_order_and_skips_base() {
    let tmp = TempDir::new().unwrap();
    let items = tmp.path().join("item");
    write_yaml(&items, "_base.yaml", "items: []\n");
    write_yaml(&items, "5000-9999.yaml", "items: []\n");
    write_yaml(&items, "0-4999.yaml", "items: []\n");
    write_yaml(&items.join("extra"), "custom.yml", "items: []\n");
    write_yaml(&items, "notes.txt", "not a document");

    let found: Vec<String> = ShardWalker::new(&items, Category::Item.skipped_files())
        .map(|p| {
            p.unwrap()
                .strip_prefix(&items)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(found, vec!["0-4999.yaml", "5000-9999.yaml", "extra/custom.yml"]);
}

#[test]
fn walker_reports_missing_root() {
    let tmp = TempDir::new().unwrap();
    let mut walker = ShardWalker::new(tmp.path().join("nope"), &[]);
    assert!(matches!(walker.next(), Some(Err(CatalogError::DirNotFound(_)))));
    assert!(walker.next().is_none());
}

#[test]
fn load_full_layout_from_disk() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path();
    write_yaml(
        &db.join("item"),
        "0-4999.yaml",
        "items:\n  - id: 1\n    name: Cloth Cap\n    sold_by: [\"Bob#qeynos\"]\n",
    );
    write_yaml(&db.join("merchant"), "qeynos.yaml", "merchants:\n  - name: Bob\n");
    write_yaml(&db.join("npc"), "qeynos.yaml", "npcs:\n  - name: Fippy Darkpaw\n");
    write_yaml(&db.join("quest"), "qeynos.yaml", "quests:\n  - id: Rat Whiskers\n");
    write_yaml(
        db,
        "recipe.yaml",
        "recipes:\n  - id: 10\n    name: Cap\n    components:\n      - component_id: 1\n        item_id: 1\n",
    );

    let (catalog, stats) = Catalog::load(db).unwrap();
    assert_eq!(
        stats,
        LoadStats {
            items: 1,
            merchants: 1,
            npcs: 1,
            quests: 1,
            recipes: 1,
        }
    );
    assert!(catalog.npcs.contains_key("Fippy_Darkpaw#qeynos"));
    assert!(catalog.quests.contains_key("Rat_Whiskers#qeynos"));
    assert_eq!(catalog.recipes[&10].components[0].item_id, 1);
}

#[test]
fn missing_category_directory_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write_yaml(&tmp.path().join("item"), "0-4999.yaml", "items: []\n");
    let err = Catalog::load(tmp.path()).unwrap_err();
    assert!(matches!(err, CatalogError::DirNotFound(ref p) if p.ends_with("merchant")));
}

#[test]
fn recipe_document_survives_write_and_read() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("recipe.yaml");
    let doc = RecipeDocument {
        recipes: vec![Recipe {
            id: 42,
            name: "Fish Fillet".to_string(),
            trivial: 18,
            recipe_type: "baking".to_string(),
            other_id: -1,
            result_id: 13035,
            components: vec![
                RecipeComponent {
                    component_id: 2,
                    item_id: 13019,
                    other_id: 0,
                    other_type: 1,
                },
                RecipeComponent {
                    component_id: 1,
                    item_id: 13010,
                    other_id: 0,
                    other_type: 0,
                },
            ],
        }],
    };

    write_document(&path, &doc).unwrap();
    let back: RecipeDocument = read_document(&path).unwrap();
    assert_eq!(back, doc);
}
