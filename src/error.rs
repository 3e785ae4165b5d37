//! Error taxonomy for the catalog read path.
//!
//! Degraded data (malformed documents, missing assets, unknown ability ids) never
//! becomes an error; only a missing record, a bad caller parameter or a store fault do.

/// Errors surfaced by the row/name sources and the assembly service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Monster not found: {0}")]
    NotFound(i64),

    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter { field: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
