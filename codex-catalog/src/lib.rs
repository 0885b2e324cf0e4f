//! Game-content database model, shard layout, and YAML loading.
//!
//! This crate owns the typed records (items, merchants, NPCs, quests, recipes),
//! the on-disk category layout, and the loader that turns a tree of shard
//! documents into an in-memory [`Catalog`]. Cross-referencing and legacy
//! conversion live in `codex-import`.

pub mod catalog;
pub mod error;
pub mod layout;
pub mod types;
pub mod yaml;

pub use catalog::{Catalog, LoadStats};
pub use error::CatalogError;
pub use layout::{Category, ShardDoc, ShardWalker, composite_key, normalize_name, shard_docs};
pub use types::*;
pub use yaml::{parse_document, read_document, write_document};
