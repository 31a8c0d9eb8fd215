//! Magazine entity
//!
//! A magazine has a name constrained to 2-16 characters inclusive and a
//! non-empty category. Both are validated at construction.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Inclusive bounds on a magazine name, in characters
pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 16;

/// A row-backed magazine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Magazine {
    id: i64,
    name: String,
    category: String,
}

impl Magazine {
    /// Construct a magazine from an id and validated name/category
    pub fn new(id: i64, name: impl Into<String>, category: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let category = category.into();
        Self::validate_name(&name)?;
        Self::validate_category(&category)?;
        Ok(Self { id, name, category })
    }

    /// Check the name constraint: 2-16 characters, inclusive
    pub fn validate_name(name: &str) -> Result<()> {
        let len = name.chars().count();
        if !(NAME_MIN..=NAME_MAX).contains(&len) {
            return Err(Error::validation(format!(
                "Name must be between {} and {} characters, inclusive",
                NAME_MIN, NAME_MAX
            )));
        }
        Ok(())
    }

    /// Check the category constraint: must be non-empty
    pub fn validate_category(category: &str) -> Result<()> {
        if category.is_empty() {
            return Err(Error::validation(
                "Category must be longer than 0 characters",
            ));
        }
        Ok(())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

impl PartialEq for Magazine {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Magazine {}

impl std::fmt::Display for Magazine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Magazine {}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magazine_creation() {
        let mag = Magazine::new(1, "Tech", "Science").unwrap();
        assert_eq!(mag.id(), 1);
        assert_eq!(mag.name(), "Tech");
        assert_eq!(mag.category(), "Science");
    }

    #[test]
    fn test_name_bounds_inclusive() {
        // 2 and 16 characters are both valid
        assert!(Magazine::new(1, "Go", "Tech").is_ok());
        assert!(Magazine::new(1, "a".repeat(16), "Tech").is_ok());
    }

    #[test]
    fn test_name_out_of_bounds_rejected() {
        assert!(matches!(
            Magazine::new(1, "X", "Tech").unwrap_err(),
            Error::Validation(_)
        ));
        assert!(matches!(
            Magazine::new(1, "a".repeat(17), "Tech").unwrap_err(),
            Error::Validation(_)
        ));
    }

    #[test]
    fn test_name_counted_in_chars_not_bytes() {
        // 2 characters, 8 bytes
        assert!(Magazine::new(1, "日本", "Travel").is_ok());
    }

    #[test]
    fn test_empty_category_rejected() {
        assert!(matches!(
            Magazine::new(1, "Tech", "").unwrap_err(),
            Error::Validation(_)
        ));
    }

    #[test]
    fn test_valid_name_round_trips() {
        for len in NAME_MIN..=NAME_MAX {
            let name = "m".repeat(len);
            let mag = Magazine::new(1, name.clone(), "General").unwrap();
            assert_eq!(mag.name(), name);
        }
    }
}
