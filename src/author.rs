//! Author entity
//!
//! An author is identified by a storage-assigned id and a name. The name is
//! write-once: it is validated and set during construction and there is no
//! way to reassign it afterwards (private field, read accessor, no setter).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A row-backed author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    id: i64,
    name: String,
}

impl Author {
    /// Construct an author from an id and a validated name
    pub fn new(id: i64, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;
        Ok(Self { id, name })
    }

    /// Check the name constraint: must be non-empty
    pub fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::validation("Name must be longer than 0 characters"));
        }
        Ok(())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Author {}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Author {}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_creation() {
        let author = Author::new(1, "Jane Doe").unwrap();
        assert_eq!(author.id(), 1);
        assert_eq!(author.name(), "Jane Doe");
    }

    #[test]
    fn test_empty_name_rejected() {
        let err = Author::new(1, "").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_display() {
        let author = Author::new(7, "Ada").unwrap();
        assert_eq!(author.to_string(), "<Author Ada>");
    }
}
