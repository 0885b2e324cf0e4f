//! Parsers for the pipe-delimited legacy exports (`soda/*.txt`).
//!
//! Each table starts with a header line that is discarded. Rows have a fixed
//! field count; only a handful of columns are used. Quote characters carry no
//! meaning and blank lines are ignored. Line numbers in diagnostics are the
//! 1-based physical line of the row (the header is line 1).

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use codex_catalog::{Recipe, RecipeComponent};

use crate::error::{Arity, ImportError};

/// Recipe table file name under the legacy directory.
pub const RECIPE_TABLE: &str = "recipes.txt";

/// Recipe-component table file name under the legacy directory.
pub const COMPONENT_TABLE: &str = "recipecomp.txt";

/// Item table file name under the legacy directory.
pub const ITEM_TABLE: &str = "items.txt";

/// Field count of a `recipes.txt` row.
pub const RECIPE_FIELDS: Arity = Arity::Exactly(13);

/// Field count of a `recipecomp.txt` row.
pub const COMPONENT_FIELDS: Arity = Arity::Exactly(12);

/// Minimum field count of an `items.txt` row; most columns are reserved.
pub const ITEM_FIELDS: Arity = Arity::AtLeast(315);

/// The two columns of `items.txt` the converter cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyItem {
    pub line: u64,
    pub id: u32,
    pub name: String,
}

/// Read a legacy table into memory.
pub fn read_table(path: &Path) -> Result<String, ImportError> {
    std::fs::read_to_string(path).map_err(|e| ImportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Parse `recipes.txt`.
///
/// Columns: 0 id, 1 name, 2 trivial, 4 recipe type, 5 other id, 6 result id.
/// Components are attached separately by [`attach_components`].
pub fn parse_recipes(content: &str) -> Result<Vec<Recipe>, ImportError> {
    let mut recipes = Vec::new();
    for record in table_reader(content).records() {
        let row = Row::new(record?, RECIPE_FIELDS)?;
        recipes.push(Recipe {
            id: row.int(0, "recipe id")?,
            name: row.text(1),
            trivial: row.int(2, "trivial")?,
            recipe_type: row.text(4),
            other_id: row.int(5, "other id")?,
            result_id: row.int(6, "result id")?,
            components: Vec::new(),
        });
    }
    Ok(recipes)
}

/// Parse `recipecomp.txt` and append each component to its owning recipe,
/// preserving line order. Returns the number of components attached.
///
/// Columns: 0 recipe id, 1 component id, 3 item id, 4 other id, 5 other type.
pub fn attach_components(recipes: &mut [Recipe], content: &str) -> Result<usize, ImportError> {
    let mut index: HashMap<u32, usize> = HashMap::with_capacity(recipes.len());
    for (i, recipe) in recipes.iter().enumerate() {
        index.entry(recipe.id).or_insert(i);
    }

    let mut attached = 0;
    for record in table_reader(content).records() {
        let row = Row::new(record?, COMPONENT_FIELDS)?;
        let recipe_id: u32 = row.int(0, "recipe id")?;
        let Some(&slot) = index.get(&recipe_id) else {
            return Err(ImportError::RecipeNotFound {
                line: row.line,
                id: recipe_id,
            });
        };

        recipes[slot].components.push(RecipeComponent {
            component_id: row.int(1, "component id")?,
            item_id: row.int(3, "item id")?,
            other_id: row.int(4, "other id")?,
            other_type: row.int(5, "other type")?,
        });
        attached += 1;
    }
    Ok(attached)
}

/// Parse `items.txt`. Columns: 1 name, 5 id.
pub fn parse_items(content: &str) -> Result<Vec<LegacyItem>, ImportError> {
    let mut items = Vec::new();
    for record in table_reader(content).records() {
        let row = Row::new(record?, ITEM_FIELDS)?;
        items.push(LegacyItem {
            line: row.line,
            id: row.int(5, "item id")?,
            name: row.text(1),
        });
    }
    Ok(items)
}

fn table_reader(content: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(content.as_bytes())
}

/// A row whose field count has been checked.
struct Row {
    record: csv::StringRecord,
    line: u64,
}

impl Row {
    fn new(record: csv::StringRecord, arity: Arity) -> Result<Self, ImportError> {
        let line = record.position().map_or(0, |p| p.line());
        if !arity.accepts(record.len()) {
            return Err(ImportError::FieldCount {
                line,
                expected: arity,
                found: record.len(),
            });
        }
        Ok(Self { record, line })
    }

    fn text(&self, i: usize) -> String {
        self.record.get(i).unwrap_or("").to_string()
    }

    fn int<T>(&self, i: usize, field: &'static str) -> Result<T, ImportError>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        let value = self.record.get(i).unwrap_or("");
        value.parse().map_err(|e| ImportError::Field {
            line: self.line,
            field,
            value: value.to_string(),
            source: e,
        })
    }
}
