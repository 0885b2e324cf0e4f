//! YAML reading and writing for database documents.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CatalogError;

/// Parse a document body. `origin` is only used for diagnostics.
pub fn parse_document<T: DeserializeOwned>(contents: &str, origin: &str) -> Result<T, CatalogError> {
    serde_yml::from_str(contents).map_err(|e| CatalogError::Parse {
        path: origin.to_string(),
        source: e,
    })
}

/// Read and parse a single document from disk.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| CatalogError::io(path.display(), e))?;
    parse_document(&contents, &path.display().to_string())
}

/// Encode `value` and write it to `path`, creating parent directories.
///
/// The file is written to a sibling temp file first and renamed into place,
/// so an aborted run never leaves a half-written document behind.
pub fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), CatalogError> {
    let serialized = serde_yml::to_string(value).map_err(|e| CatalogError::Encode {
        path: path.display().to_string(),
        source: e,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent.display(), e))?;
    }
    let tmp = path.with_extension("yaml.tmp");
    std::fs::write(&tmp, serialized).map_err(|e| CatalogError::io(tmp.display(), e))?;
    std::fs::rename(&tmp, path).map_err(|e| CatalogError::io(path.display(), e))?;
    Ok(())
}
