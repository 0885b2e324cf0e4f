//! Cross-referencing and legacy-table conversion for the game-content database.
//!
//! This crate owns the pipeline logic that sits on top of `codex-catalog`:
//! resolving item references against the loaded entity maps, parsing the
//! pipe-delimited legacy exports, merging them into the canonical item set,
//! and re-partitioning items into ID-range shards.

pub mod convert;
pub mod crossref;
pub mod error;
pub mod legacy;
pub mod merge;
pub mod partition;
pub mod progress;
pub mod settings;

pub use convert::{ItemConvertStats, convert_items, write_recipes};
pub use crossref::{CrossRefOptions, CrossRefStats, RefTarget, cross_reference};
pub use error::{Arity, ImportError};
pub use legacy::{LegacyItem, attach_components, parse_items, parse_recipes, read_table};
pub use merge::{MergeStats, merge_item, merge_items};
pub use partition::{PartitionRules, Shard, TrailingShard, plan_shards, write_shards};
pub use progress::{ConvertProgress, LogProgress, SilentProgress};
pub use settings::{Settings, SettingsError};
