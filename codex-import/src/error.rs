use std::fmt;
use std::num::ParseIntError;

use codex_catalog::CatalogError;
use thiserror::Error;

use crate::crossref::RefTarget;

/// Expected field count of a legacy table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, found: usize) -> bool {
        match self {
            Arity::Exactly(n) => found == n,
            Arity::AtLeast(n) => found >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("malformed table row: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected {expected} records, got {found}")]
    FieldCount {
        line: u64,
        expected: Arity,
        found: usize,
    },
    #[error("line {line}: invalid {field} {value:?}: {source}")]
    Field {
        line: u64,
        field: &'static str,
        value: String,
        source: ParseIntError,
    },
    #[error("line {line}: recipe {id} not found")]
    RecipeNotFound { line: u64, id: u32 },
    #[error("{target} {name} not found (referenced by item {item})")]
    NotFound {
        target: RefTarget,
        name: String,
        item: u32,
    },
}
