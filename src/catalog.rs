//! Variable lookup by name or label.

use std::io;

use thiserror::Error;

use crate::schema::{Schema, Variable};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no catalog variable matches '{0}'")]
    NotFound(String),

    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    InvalidSchema(String),
}

/// Source of variable definitions.
///
/// The crate ships an in-memory implementation on [`Schema`]; a remote
/// catalog client can implement the same trait.
pub trait Catalog {
    /// Resolves a variable by its identifier or its human-readable label.
    fn resolve_variable(&self, name_or_label: &str) -> Result<Variable, CatalogError>;
}

/// Exact name first, then a case-insensitive exact label match.
impl Catalog for Schema {
    fn resolve_variable(&self, name_or_label: &str) -> Result<Variable, CatalogError> {
        let wanted = name_or_label.trim();
        if let Some(variable) = self.get(wanted) {
            return Ok(variable.clone());
        }

        let wanted_label = wanted.to_lowercase();
        self.variables()
            .find(|v| !v.label.is_empty() && v.label.to_lowercase() == wanted_label)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(wanted.to_string()))
    }
}
