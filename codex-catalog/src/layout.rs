//! On-disk layout of the database: category directories, shard naming, and
//! deterministic traversal.
//!
//! ```text
//! db/
//!   item/      <lower>-<upper>.yaml ... (_base.yaml is a template, skipped)
//!   merchant/  <zone>.yaml ...
//!   npc/       <zone>.yaml ...
//!   quest/     <zone>.yaml ...
//!   recipe.yaml
//! ```
//!
//! Traversal is exposed as a lazy sequence ([`ShardWalker`], [`shard_docs`])
//! so the loader never touches the file system directly and tests can feed it
//! in-memory [`ShardDoc`]s.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::CatalogError;
use crate::yaml::parse_document;

/// File name of the recipe document under the database root.
pub const RECIPE_DOCUMENT: &str = "recipe.yaml";

/// Entity categories stored as per-shard directory trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Item,
    Merchant,
    Npc,
    Quest,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Item,
        Category::Merchant,
        Category::Npc,
        Category::Quest,
    ];

    /// Directory name under the database root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Item => "item",
            Category::Merchant => "merchant",
            Category::Npc => "npc",
            Category::Quest => "quest",
        }
    }

    /// File names inside the category tree that are not data shards.
    pub fn skipped_files(self) -> &'static [&'static str] {
        match self {
            Category::Item => &["_base.yaml"],
            _ => &[],
        }
    }

    /// Root directory of this category under `db_root`.
    pub fn root(self, db_root: &Path) -> PathBuf {
        db_root.join(self.dir_name())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Whether `path` carries a recognized document extension.
pub fn is_document(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

/// The shard name of a document: its file name without the extension.
pub fn shard_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Replace spaces with underscores.
pub fn normalize_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// Build the composite key `normalize(name) + "#" + shard`.
///
/// ```
/// use codex_catalog::composite_key;
///
/// assert_eq!(composite_key("Merchant Bob", "qeynos"), "Merchant_Bob#qeynos");
/// ```
pub fn composite_key(name: &str, shard: &str) -> String {
    format!("{}#{}", normalize_name(name), shard)
}

// ── Traversal ───────────────────────────────────────────────────────────────

/// Depth-first walk over the document files beneath a category root.
///
/// Entries are visited in lexicographic order at every level, so the yielded
/// sequence is the same on every run. A missing root or unreadable directory
/// is yielded once as an error, after which the walk ends.
#[derive(Debug)]
pub struct ShardWalker {
    stack: Vec<PathBuf>,
    skipped: &'static [&'static str],
    started: bool,
    root: PathBuf,
}

impl ShardWalker {
    pub fn new(root: impl Into<PathBuf>, skipped: &'static [&'static str]) -> Self {
        Self {
            stack: Vec::new(),
            skipped,
            started: false,
            root: root.into(),
        }
    }

    fn is_skipped(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| self.skipped.contains(&n))
    }

    fn push_children(&mut self, dir: &Path) -> Result<(), CatalogError> {
        let mut children = fs::read_dir(dir)
            .map_err(|e| CatalogError::io(dir.display(), e))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::io(dir.display(), e))?;
        children.sort();
        // Reversed so the smallest name is popped first.
        self.stack.extend(children.into_iter().rev());
        Ok(())
    }

    fn fail(&mut self, err: CatalogError) -> Option<Result<PathBuf, CatalogError>> {
        self.stack.clear();
        Some(Err(err))
    }
}

impl Iterator for ShardWalker {
    type Item = Result<PathBuf, CatalogError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            if !self.root.is_dir() {
                return Some(Err(CatalogError::DirNotFound(
                    self.root.display().to_string(),
                )));
            }
            let root = self.root.clone();
            if let Err(e) = self.push_children(&root) {
                return self.fail(e);
            }
        }

        while let Some(path) = self.stack.pop() {
            let meta = match fs::metadata(&path) {
                Ok(m) => m,
                Err(e) => return self.fail(CatalogError::io(path.display(), e)),
            };
            if meta.is_dir() {
                if let Err(e) = self.push_children(&path) {
                    return self.fail(e);
                }
                continue;
            }
            if is_document(&path) && !self.is_skipped(&path) {
                return Some(Ok(path));
            }
        }
        None
    }
}

// ── Documents ───────────────────────────────────────────────────────────────

/// The raw contents of one shard document plus where it came from.
#[derive(Debug, Clone)]
pub struct ShardDoc {
    /// Shard name used as the composite-key suffix.
    pub shard: String,
    /// Path (or fixture label) reported in diagnostics.
    pub origin: String,
    pub contents: String,
}

impl ShardDoc {
    /// Read a shard document from disk.
    pub fn read(path: &Path) -> Result<Self, CatalogError> {
        let contents =
            fs::read_to_string(path).map_err(|e| CatalogError::io(path.display(), e))?;
        Ok(Self {
            shard: shard_name(path),
            origin: path.display().to_string(),
            contents,
        })
    }

    /// An in-memory shard, for fixtures.
    pub fn inline(shard: impl Into<String>, contents: impl Into<String>) -> Self {
        let shard = shard.into();
        Self {
            origin: format!("<{shard}>"),
            shard,
            contents: contents.into(),
        }
    }

    /// Deserialize the document body.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, CatalogError> {
        parse_document(&self.contents, &self.origin)
    }
}

/// Lazily read every shard document of `category` beneath `db_root`.
pub fn shard_docs(
    db_root: &Path,
    category: Category,
) -> impl Iterator<Item = Result<ShardDoc, CatalogError>> + use<> {
    ShardWalker::new(category.root(db_root), category.skipped_files())
        .map(|path| path.and_then(|p| ShardDoc::read(&p)))
}
