//! Article entity
//!
//! An article links one author to one magazine through its foreign keys.
//! The title is constrained to 5-50 characters inclusive and is write-once,
//! like `Author::name`; content is unconstrained.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Inclusive bounds on an article title, in characters
pub const TITLE_MIN: usize = 5;
pub const TITLE_MAX: usize = 50;

/// A row-backed article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    id: i64,
    title: String,
    content: String,
    author_id: i64,
    magazine_id: i64,
}

impl Article {
    /// Construct an article from an id, a validated title, and its foreign keys
    pub fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: i64,
        magazine_id: i64,
    ) -> Result<Self> {
        let title = title.into();
        Self::validate_title(&title)?;
        Ok(Self {
            id,
            title,
            content: content.into(),
            author_id,
            magazine_id,
        })
    }

    /// Check the title constraint: 5-50 characters, inclusive
    pub fn validate_title(title: &str) -> Result<()> {
        let len = title.chars().count();
        if !(TITLE_MIN..=TITLE_MAX).contains(&len) {
            return Err(Error::validation(format!(
                "Title must be between {} and {} characters, inclusive",
                TITLE_MIN, TITLE_MAX
            )));
        }
        Ok(())
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn author_id(&self) -> i64 {
        self.author_id
    }

    pub fn magazine_id(&self) -> i64 {
        self.magazine_id
    }
}

impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Article {}

impl std::fmt::Display for Article {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Article {}>", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_creation() {
        let article = Article::new(1, "Hello World", "body text", 10, 20).unwrap();
        assert_eq!(article.title(), "Hello World");
        assert_eq!(article.author_id(), 10);
        assert_eq!(article.magazine_id(), 20);
    }

    #[test]
    fn test_title_bounds_inclusive() {
        assert!(Article::new(1, "a".repeat(5), "", 1, 1).is_ok());
        assert!(Article::new(1, "a".repeat(50), "", 1, 1).is_ok());
    }

    #[test]
    fn test_title_out_of_bounds_rejected() {
        assert!(matches!(
            Article::new(1, "tiny", "", 1, 1).unwrap_err(),
            Error::Validation(_)
        ));
        assert!(matches!(
            Article::new(1, "a".repeat(51), "", 1, 1).unwrap_err(),
            Error::Validation(_)
        ));
    }

    #[test]
    fn test_content_unconstrained() {
        assert!(Article::new(1, "Empty body", "", 1, 1).is_ok());
    }
}
