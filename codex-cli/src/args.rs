//! Flags shared by both programs. All optional; defaults come from settings.

use std::path::PathBuf;

use clap::Args;
use codex_import::Settings;

use crate::error::CliError;

#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Working root containing db/, soda/ and an optional codex.toml
    /// (defaults to current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Database directory (overrides [paths] db)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

impl CommonArgs {
    /// Resolve settings for the working root, then apply flag overrides.
    pub fn settings(&self) -> Result<Settings, CliError> {
        let root = self
            .root
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let mut settings = Settings::resolve(&root)?;
        if let Some(db) = &self.db {
            settings.paths.db = db.clone();
        }
        Ok(settings)
    }
}
