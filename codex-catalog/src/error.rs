use thiserror::Error;

use crate::layout::Category;

/// Errors raised while reading or writing database documents.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("YAML encode error for {path}: {source}")]
    Encode {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
    #[error("duplicate item id: {id} (in {path})")]
    DuplicateItem { id: u32, path: String },
    #[error("duplicate recipe id: {id} (in {path})")]
    DuplicateRecipe { id: u32, path: String },
    #[error("duplicate {category} key: {key} (in {path})")]
    DuplicateKey {
        category: Category,
        key: String,
        path: String,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }
}
