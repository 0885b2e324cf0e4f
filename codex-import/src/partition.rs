//! Deterministic ID-range partitioning of converted items.
//!
//! Items are consumed in input order. A shard stays open while each item ID
//! is less than `shard start + span`. The first item at or past that point
//! closes the shard with upper bound `id - (id % step) - 1` and opens the next
//! shard starting at its own ID.
//!
//! ```text
//! ids 100 101 5200 5201 10300   (span 5000, step 1000)
//!     [0, 4999]      = 100 101
//!     [5200, 9999]   = 5200 5201
//!     [10300, 10999] = 10300       (trailing shard, Flush only)
//! ```

use std::path::{Path, PathBuf};

use codex_catalog::{Item, write_document};
use serde::Serialize;

use crate::error::ImportError;
use crate::progress::ConvertProgress;

/// What to do with the shard still open after the last item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingShard {
    /// Write it, bounded by the next thousand-aligned boundary above its
    /// highest ID.
    #[default]
    Flush,
    /// Never write it. Reproduces the legacy converter's output exactly.
    Drop,
}

/// Partition parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionRules {
    /// Maximum distance from a shard's first ID before it closes.
    pub span: u32,
    /// Rounding step for shard upper bounds.
    pub step: u32,
    pub trailing: TrailingShard,
}

impl Default for PartitionRules {
    fn default() -> Self {
        Self {
            span: 5000,
            step: 1000,
            trailing: TrailingShard::Flush,
        }
    }
}

/// A closed shard ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    pub lower: i64,
    pub upper: i64,
    pub items: Vec<Item>,
}

impl Shard {
    /// `<lower>-<upper>.yaml`
    pub fn file_name(&self) -> String {
        format!("{}-{}.yaml", self.lower, self.upper)
    }
}

/// Group `items` into shards.
///
/// A boundary reached while nothing is accumulated (the very first item is
/// already past the first span) advances the shard start without producing
/// an empty shard.
pub fn plan_shards(items: Vec<Item>, rules: &PartitionRules) -> Vec<Shard> {
    let span = i64::from(rules.span);
    let step = i64::from(rules.step);

    let mut shards = Vec::new();
    let mut last_range: i64 = 0;
    let mut current: Vec<Item> = Vec::new();

    for item in items {
        let id = i64::from(item.id);
        if id - last_range - span < 0 {
            current.push(item);
            continue;
        }

        let upper = id - (id % step) - 1;
        if current.is_empty() {
            log::debug!("No items before boundary {id}; skipping empty shard {last_range}-{upper}");
        } else {
            shards.push(Shard {
                lower: last_range,
                upper,
                items: std::mem::take(&mut current),
            });
        }
        last_range = id;
        current.push(item);
    }

    if !current.is_empty() {
        match rules.trailing {
            TrailingShard::Flush => {
                let highest = current
                    .iter()
                    .map(|item| i64::from(item.id))
                    .max()
                    .unwrap_or(last_range);
                shards.push(Shard {
                    lower: last_range,
                    upper: highest - (highest % step) + step - 1,
                    items: current,
                });
            }
            TrailingShard::Drop => {
                log::warn!(
                    "Dropping trailing shard starting at {} ({} items)",
                    last_range,
                    current.len()
                );
            }
        }
    }

    shards
}

#[derive(Serialize)]
struct ShardBody<'a> {
    items: &'a [Item],
}

/// Write each shard as `<dir>/<lower>-<upper>.yaml`, in order.
///
/// Stops at the first failure; shards written before it stay on disk.
pub fn write_shards(
    shards: &[Shard],
    dir: &Path,
    progress: &dyn ConvertProgress,
) -> Result<Vec<PathBuf>, ImportError> {
    let mut written = Vec::with_capacity(shards.len());
    for shard in shards {
        let path = dir.join(shard.file_name());
        write_document(&path, &ShardBody { items: &shard.items })?;
        progress.on_shard(shard, &path);
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: &[u32]) -> Vec<Item> {
        ids.iter().map(|&id| Item::placeholder(id)).collect()
    }

    fn bounds(shards: &[Shard]) -> Vec<(i64, i64, Vec<u32>)> {
        shards
            .iter()
            .map(|s| (s.lower, s.upper, s.items.iter().map(|i| i.id).collect()))
            .collect()
    }

    #[test]
    fn boundary_arithmetic() {
        let shards = plan_shards(items(&[100, 101, 5200, 5201, 10300]), &PartitionRules::default());
        assert_eq!(
            bounds(&shards),
            vec![
                (0, 4999, vec![100, 101]),
                (5200, 9999, vec![5200, 5201]),
                (10300, 10999, vec![10300]),
            ]
        );
    }

    #[test]
    fn exactly_span_away_closes_the_shard() {
        let shards = plan_shards(items(&[1, 4999, 5000]), &PartitionRules::default());
        assert_eq!(bounds(&shards)[0], (0, 4999, vec![1, 4999]));
        assert_eq!(bounds(&shards)[1], (5000, 5999, vec![5000]));
    }

    #[test]
    fn legacy_mode_drops_trailing_shard() {
        let rules = PartitionRules {
            trailing: TrailingShard::Drop,
            ..PartitionRules::default()
        };
        let shards = plan_shards(items(&[100, 101, 5200, 5201, 10300]), &rules);
        assert_eq!(shards.len(), 2);
        assert_eq!(shards.last().unwrap().file_name(), "5200-9999.yaml");
    }

    #[test]
    fn leading_boundary_with_nothing_accumulated_writes_no_shard() {
        let shards = plan_shards(items(&[7000, 7001]), &PartitionRules::default());
        assert_eq!(bounds(&shards), vec![(7000, 7999, vec![7000, 7001])]);
    }

    #[test]
    fn empty_input_has_no_shards() {
        assert!(plan_shards(Vec::new(), &PartitionRules::default()).is_empty());
    }
}
