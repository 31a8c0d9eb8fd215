//! Relationship query engine
//!
//! Read operations traversing author ↔ article ↔ magazine:
//! - single-row lookups through an article's foreign keys
//! - article listings per author / per magazine
//! - distinct authors per magazine and magazines per author
//! - one aggregate filter (authors with more than two articles in a magazine)
//!
//! Two operations (`article_titles_of_magazine`, `contributing_authors`)
//! return `Option<Vec<_>>` with `None` as a distinguished no-result marker,
//! while the rest return possibly-empty `Vec`s. The inconsistency is
//! intentional; callers that want uniform empty lists must flatten the
//! `Option` themselves.
//!
//! Result order is stable within one statement execution only; consumers
//! must not depend on it.

use crate::Result;
use crate::author::Author;
use crate::magazine::Magazine;
use crate::article::Article;
use crate::storage::SqliteStore;
use crate::storage::sqlite::{row_to_article, row_to_author, row_to_magazine};

/// An author qualifies as contributing with strictly more than this many
/// articles in the magazine.
pub const CONTRIBUTING_THRESHOLD: i64 = 2;

/// Query engine for relationship operations
pub struct QueryEngine<'a> {
    store: &'a SqliteStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a new query engine
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }

    /// The author linked to an article, or `None` if the article does not exist
    pub fn author_of_article(&self, article_id: i64) -> Result<Option<Author>> {
        use rusqlite::OptionalExtension;
        self.store
            .conn()
            .query_row(
                "SELECT authors.id, authors.name FROM authors \
                 JOIN articles ON authors.id = articles.author_id \
                 WHERE articles.id = ?1",
                [article_id],
                row_to_author,
            )
            .optional()
            .map_err(Into::into)
    }

    /// The magazine linked to an article, or `None` if the article does not exist
    pub fn magazine_of_article(&self, article_id: i64) -> Result<Option<Magazine>> {
        use rusqlite::OptionalExtension;
        self.store
            .conn()
            .query_row(
                "SELECT magazines.id, magazines.name, magazines.category FROM magazines \
                 JOIN articles ON magazines.id = articles.magazine_id \
                 WHERE articles.id = ?1",
                [article_id],
                row_to_magazine,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All articles written by an author, possibly empty
    pub fn articles_of_author(&self, author_id: i64) -> Result<Vec<Article>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT id, title, content, author_id, magazine_id FROM articles \
             WHERE author_id = ?1",
        )?;
        let articles = stmt
            .query_map([author_id], row_to_article)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(articles)
    }

    /// All articles published in a magazine, possibly empty
    pub fn articles_of_magazine(&self, magazine_id: i64) -> Result<Vec<Article>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT id, title, content, author_id, magazine_id FROM articles \
             WHERE magazine_id = ?1",
        )?;
        let articles = stmt
            .query_map([magazine_id], row_to_article)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(articles)
    }

    /// Distinct authors with at least one article in a magazine
    pub fn authors_of_magazine(&self, magazine_id: i64) -> Result<Vec<Author>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT DISTINCT authors.id, authors.name FROM authors \
             JOIN articles ON authors.id = articles.author_id \
             WHERE articles.magazine_id = ?1",
        )?;
        let authors = stmt
            .query_map([magazine_id], row_to_author)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(authors)
    }

    /// Distinct magazines containing at least one article by an author
    pub fn magazines_of_author(&self, author_id: i64) -> Result<Vec<Magazine>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT DISTINCT magazines.id, magazines.name, magazines.category FROM magazines \
             JOIN articles ON magazines.id = articles.magazine_id \
             WHERE articles.author_id = ?1",
        )?;
        let magazines = stmt
            .query_map([author_id], row_to_magazine)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(magazines)
    }

    /// Titles of all articles in a magazine, or `None` if the magazine has
    /// no articles (none-marker, distinct from an empty list)
    pub fn article_titles_of_magazine(&self, magazine_id: i64) -> Result<Option<Vec<String>>> {
        let mut stmt = self
            .store
            .conn()
            .prepare("SELECT title FROM articles WHERE magazine_id = ?1")?;
        let titles = stmt
            .query_map([magazine_id], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(if titles.is_empty() { None } else { Some(titles) })
    }

    /// Distinct authors with strictly more than [`CONTRIBUTING_THRESHOLD`]
    /// articles in a magazine, or `None` if no author qualifies
    pub fn contributing_authors(&self, magazine_id: i64) -> Result<Option<Vec<Author>>> {
        let mut stmt = self.store.conn().prepare(
            "SELECT authors.id, authors.name FROM authors \
             JOIN articles ON authors.id = articles.author_id \
             WHERE articles.magazine_id = ?1 \
             GROUP BY authors.id, authors.name \
             HAVING COUNT(articles.id) > ?2",
        )?;
        let authors = stmt
            .query_map(
                rusqlite::params![magazine_id, CONTRIBUTING_THRESHOLD],
                row_to_author,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(if authors.is_empty() {
            None
        } else {
            Some(authors)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        store: SqliteStore,
        author_id: i64,
        magazine_id: i64,
        article_id: i64,
    }

    /// One author, one magazine, one linking article
    fn seeded_store() -> Fixture {
        let store = SqliteStore::open_in_memory().unwrap();
        let author_id = store.create_author("Jane Doe").unwrap();
        let magazine_id = store.create_magazine("Tech", "Science").unwrap();
        let article_id = store
            .create_article("Hello World", "body", author_id, magazine_id)
            .unwrap();
        Fixture {
            store,
            author_id,
            magazine_id,
            article_id,
        }
    }

    #[test]
    fn test_author_and_magazine_of_article_round_trip() {
        let fx = seeded_store();
        let engine = QueryEngine::new(&fx.store);

        let author = engine.author_of_article(fx.article_id).unwrap().unwrap();
        assert_eq!(author.id(), fx.author_id);
        assert_eq!(author.name(), "Jane Doe");

        let magazine = engine.magazine_of_article(fx.article_id).unwrap().unwrap();
        assert_eq!(magazine.id(), fx.magazine_id);
        assert_eq!(magazine.name(), "Tech");
        assert_eq!(magazine.category(), "Science");
    }

    #[test]
    fn test_missing_article_returns_none() {
        let fx = seeded_store();
        let engine = QueryEngine::new(&fx.store);

        assert!(engine.author_of_article(999).unwrap().is_none());
        assert!(engine.magazine_of_article(999).unwrap().is_none());
    }

    #[test]
    fn test_articles_of_author_match_queried_id() {
        let fx = seeded_store();
        let other = fx.store.create_author("Sam Smith").unwrap();
        fx.store
            .create_article("Second piece", "", other, fx.magazine_id)
            .unwrap();
        let engine = QueryEngine::new(&fx.store);

        let articles = engine.articles_of_author(fx.author_id).unwrap();
        assert_eq!(articles.len(), 1);
        assert!(articles.iter().all(|a| a.author_id() == fx.author_id));

        assert!(engine.articles_of_author(999).unwrap().is_empty());
    }

    #[test]
    fn test_articles_of_magazine_match_queried_id() {
        let fx = seeded_store();
        let other = fx.store.create_magazine("Nature", "Science").unwrap();
        fx.store
            .create_article("Elsewhere published", "", fx.author_id, other)
            .unwrap();
        let engine = QueryEngine::new(&fx.store);

        let articles = engine.articles_of_magazine(fx.magazine_id).unwrap();
        assert_eq!(articles.len(), 1);
        assert!(articles.iter().all(|a| a.magazine_id() == fx.magazine_id));
    }

    #[test]
    fn test_authors_of_magazine_distinct() {
        let fx = seeded_store();
        fx.store
            .create_article("Another take", "", fx.author_id, fx.magazine_id)
            .unwrap();
        let engine = QueryEngine::new(&fx.store);

        let authors = engine.authors_of_magazine(fx.magazine_id).unwrap();
        assert_eq!(authors.len(), 1);
        assert_eq!(authors[0].id(), fx.author_id);
    }

    #[test]
    fn test_magazines_of_author_distinct() {
        let fx = seeded_store();
        let other = fx.store.create_magazine("Nature", "Science").unwrap();
        fx.store
            .create_article("Cross posted", "", fx.author_id, other)
            .unwrap();
        fx.store
            .create_article("Cross posted again", "", fx.author_id, other)
            .unwrap();
        let engine = QueryEngine::new(&fx.store);

        let magazines = engine.magazines_of_author(fx.author_id).unwrap();
        assert_eq!(magazines.len(), 2);
    }

    #[test]
    fn test_article_titles_none_marker() {
        let fx = seeded_store();
        let empty = fx.store.create_magazine("Quiet", "Misc").unwrap();
        let engine = QueryEngine::new(&fx.store);

        // zero articles is the none-marker, not an empty list
        assert!(engine.article_titles_of_magazine(empty).unwrap().is_none());

        let titles = engine
            .article_titles_of_magazine(fx.magazine_id)
            .unwrap()
            .unwrap();
        assert_eq!(titles, vec!["Hello World".to_string()]);
    }

    #[test]
    fn test_contributing_authors_threshold_is_strict() {
        let fx = seeded_store();
        let prolific = fx.store.create_author("Prolific Pat").unwrap();
        // Pat: 3 articles (qualifies); Jane already has 1, bring her to 2 (does not)
        for title in ["First piece", "Second piece", "Third piece"] {
            fx.store
                .create_article(title, "", prolific, fx.magazine_id)
                .unwrap();
        }
        fx.store
            .create_article("Jane again", "", fx.author_id, fx.magazine_id)
            .unwrap();
        let engine = QueryEngine::new(&fx.store);

        let contributors = engine
            .contributing_authors(fx.magazine_id)
            .unwrap()
            .unwrap();
        assert_eq!(contributors.len(), 1);
        assert_eq!(contributors[0].id(), prolific);
    }

    #[test]
    fn test_contributing_authors_none_marker() {
        let fx = seeded_store();
        let engine = QueryEngine::new(&fx.store);

        // one article each is below the threshold
        assert!(engine.contributing_authors(fx.magazine_id).unwrap().is_none());
        assert!(engine.contributing_authors(999).unwrap().is_none());
    }
}
