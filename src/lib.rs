//! # Newsstand - Relational data-access layer for a small publishing domain
//!
//! Three row-backed entities related by foreign keys:
//! - `Author` writes articles
//! - `Magazine` publishes articles in a category
//! - `Article` links exactly one author to exactly one magazine
//!
//! Newsstand provides:
//! - Field-validated entity types with write-once name/title semantics
//! - SQLite-backed storage with insert operations returning generated ids
//! - A relationship query engine traversing author ↔ article ↔ magazine

pub mod author;
pub mod magazine;
pub mod article;
pub mod storage;
pub mod query;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use author::Author;
pub use magazine::Magazine;
pub use article::Article;
pub use storage::SqliteStore;
pub use query::QueryEngine;

/// Result type alias for Newsstand operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Newsstand operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl Error {
    /// Shorthand for a validation failure with a formatted reason
    pub fn validation(reason: impl Into<String>) -> Self {
        Error::Validation(reason.into())
    }
}
