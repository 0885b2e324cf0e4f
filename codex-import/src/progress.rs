//! Conversion progress reporting.

use std::path::Path;

use crate::partition::Shard;

/// Trait for receiving conversion progress updates.
pub trait ConvertProgress {
    /// Called after each item shard is written.
    fn on_shard(&self, shard: &Shard, path: &Path);

    /// Called when a stage starts (e.g., "Converting recipes").
    fn on_phase(&self, message: &str);

    /// Called when a stage finishes.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ConvertProgress for SilentProgress {
    fn on_shard(&self, _shard: &Shard, _path: &Path) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ConvertProgress for LogProgress {
    fn on_shard(&self, shard: &Shard, path: &Path) {
        log::debug!(
            "  [{}..={}] {} items -> {}",
            shard.lower,
            shard.upper,
            shard.items.len(),
            path.display()
        );
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
