//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - authors(id, name)
//! - magazines(id, name, category)
//! - articles(id, title, content, author_id, magazine_id)

pub mod schema;
pub mod sqlite;

pub use sqlite::{DbStats, SqliteStore};
