use codex_catalog::CatalogError;
use codex_import::{ImportError, SettingsError};
use thiserror::Error;

/// Errors that end a run. Each pipeline failure carries the stage it came from.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error writing output
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] SettingsError),

    /// Loading database documents failed
    #[error("{stage}: {source}")]
    Catalog {
        stage: &'static str,
        source: CatalogError,
    },

    /// Cross-referencing or conversion failed
    #[error("{stage}: {source}")]
    Import {
        stage: &'static str,
        source: ImportError,
    },
}

impl CliError {
    /// `map_err` adapter tagging a catalog error with its stage.
    pub fn catalog(stage: &'static str) -> impl FnOnce(CatalogError) -> Self {
        move |source| Self::Catalog { stage, source }
    }

    /// `map_err` adapter tagging an import error with its stage.
    pub fn import(stage: &'static str) -> impl FnOnce(ImportError) -> Self {
        move |source| Self::Import { stage, source }
    }
}
