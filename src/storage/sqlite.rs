//! SQLite storage implementation

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};

use super::schema;
use crate::article::Article;
use crate::author::Author;
use crate::magazine::Magazine;
use crate::{Error, Result};

/// SQLite-backed storage for authors, magazines, and articles.
///
/// Owns a single connection; callers open a store, perform their operations,
/// and drop it, so the connection is released on every exit path.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Borrow the underlying connection (used by the query engine)
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    // ========== Insert Operations ==========

    /// Insert an author, returning the generated id
    pub fn create_author(&self, name: &str) -> Result<i64> {
        Author::validate_name(name)?;
        self.conn
            .execute("INSERT INTO authors (name) VALUES (?1)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a magazine, returning the generated id
    pub fn create_magazine(&self, name: &str, category: &str) -> Result<i64> {
        Magazine::validate_name(name)?;
        Magazine::validate_category(category)?;
        self.conn.execute(
            "INSERT INTO magazines (name, category) VALUES (?1, ?2)",
            params![name, category],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert an article, returning the generated id
    ///
    /// Both parent rows must exist: articles never reference missing authors
    /// or magazines at this layer.
    pub fn create_article(
        &self,
        title: &str,
        content: &str,
        author_id: i64,
        magazine_id: i64,
    ) -> Result<i64> {
        Article::validate_title(title)?;
        if self.get_author(author_id)?.is_none() {
            return Err(Error::validation(format!(
                "author {} does not exist",
                author_id
            )));
        }
        if self.get_magazine(magazine_id)?.is_none() {
            return Err(Error::validation(format!(
                "magazine {} does not exist",
                magazine_id
            )));
        }
        self.conn.execute(
            "INSERT INTO articles (title, content, author_id, magazine_id) VALUES (?1, ?2, ?3, ?4)",
            params![title, content, author_id, magazine_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    // ========== Row Lookups ==========

    /// Get an author by id
    pub fn get_author(&self, id: i64) -> Result<Option<Author>> {
        self.conn
            .query_row(
                "SELECT id, name FROM authors WHERE id = ?1",
                [id],
                row_to_author,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a magazine by id
    pub fn get_magazine(&self, id: i64) -> Result<Option<Magazine>> {
        self.conn
            .query_row(
                "SELECT id, name, category FROM magazines WHERE id = ?1",
                [id],
                row_to_magazine,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get an article by id
    pub fn get_article(&self, id: i64) -> Result<Option<Article>> {
        self.conn
            .query_row(
                "SELECT id, title, content, author_id, magazine_id FROM articles WHERE id = ?1",
                [id],
                row_to_article,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all authors in rowid order
    pub fn list_authors(&self) -> Result<Vec<Author>> {
        let mut stmt = self.conn.prepare("SELECT id, name FROM authors")?;
        let authors = stmt
            .query_map([], row_to_author)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(authors)
    }

    /// List all magazines in rowid order
    pub fn list_magazines(&self) -> Result<Vec<Magazine>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, category FROM magazines")?;
        let magazines = stmt
            .query_map([], row_to_magazine)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(magazines)
    }

    /// List all articles in rowid order
    pub fn list_articles(&self) -> Result<Vec<Article>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, content, author_id, magazine_id FROM articles")?;
        let articles = stmt
            .query_map([], row_to_article)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(articles)
    }

    // ========== Counts ==========

    /// Count all authors
    pub fn count_authors(&self) -> Result<usize> {
        self.count_table("authors")
    }

    /// Count all magazines
    pub fn count_magazines(&self) -> Result<usize> {
        self.count_table("magazines")
    }

    /// Count all articles
    pub fn count_articles(&self) -> Result<usize> {
        self.count_table("articles")
    }

    fn count_table(&self, table: &str) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                    row.get(0)
                })?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            authors: self.count_authors()?,
            magazines: self.count_magazines()?,
            articles: self.count_articles()?,
        })
    }
}

// ========== Row Mapping Helpers ==========

pub(crate) fn row_to_author(row: &rusqlite::Row) -> rusqlite::Result<Author> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    Author::new(id, name).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub(crate) fn row_to_magazine(row: &rusqlite::Row) -> rusqlite::Result<Magazine> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let category: String = row.get(2)?;
    Magazine::new(id, name, category).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })
}

pub(crate) fn row_to_article(row: &rusqlite::Row) -> rusqlite::Result<Article> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let content: String = row.get(2)?;
    let author_id: i64 = row.get(3)?;
    let magazine_id: i64 = row.get(4)?;
    Article::new(id, title, content, author_id, magazine_id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DbStats {
    pub authors: usize,
    pub magazines: usize,
    pub articles: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Authors: {}", self.authors)?;
        writeln!(f, "  Magazines: {}", self.magazines)?;
        write!(f, "  Articles: {}", self.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get_author() {
        let store = SqliteStore::open_in_memory().unwrap();

        let id = store.create_author("Jane Doe").unwrap();
        let author = store.get_author(id).unwrap().unwrap();
        assert_eq!(author.name(), "Jane Doe");
    }

    #[test]
    fn test_get_missing_rows_returns_none() {
        let store = SqliteStore::open_in_memory().unwrap();

        assert!(store.get_author(42).unwrap().is_none());
        assert!(store.get_magazine(42).unwrap().is_none());
        assert!(store.get_article(42).unwrap().is_none());
    }

    #[test]
    fn test_create_author_validates_name() {
        let store = SqliteStore::open_in_memory().unwrap();

        assert!(matches!(
            store.create_author("").unwrap_err(),
            Error::Validation(_)
        ));
        assert_eq!(store.count_authors().unwrap(), 0);
    }

    #[test]
    fn test_create_magazine_validates_fields() {
        let store = SqliteStore::open_in_memory().unwrap();

        assert!(matches!(
            store.create_magazine("X", "Tech").unwrap_err(),
            Error::Validation(_)
        ));
        assert!(matches!(
            store.create_magazine("Tech", "").unwrap_err(),
            Error::Validation(_)
        ));
        assert_eq!(store.count_magazines().unwrap(), 0);
    }

    #[test]
    fn test_create_article_requires_existing_parents() {
        let store = SqliteStore::open_in_memory().unwrap();
        let author_id = store.create_author("Jane Doe").unwrap();
        let magazine_id = store.create_magazine("Tech", "Science").unwrap();

        assert!(matches!(
            store
                .create_article("Hello World", "", author_id, 999)
                .unwrap_err(),
            Error::Validation(_)
        ));
        assert!(matches!(
            store
                .create_article("Hello World", "", 999, magazine_id)
                .unwrap_err(),
            Error::Validation(_)
        ));
        assert_eq!(store.count_articles().unwrap(), 0);
    }

    #[test]
    fn test_article_round_trip() {
        let store = SqliteStore::open_in_memory().unwrap();
        let author_id = store.create_author("Jane Doe").unwrap();
        let magazine_id = store.create_magazine("Tech", "Science").unwrap();

        let id = store
            .create_article("Hello World", "body", author_id, magazine_id)
            .unwrap();
        let article = store.get_article(id).unwrap().unwrap();
        assert_eq!(article.title(), "Hello World");
        assert_eq!(article.content(), "body");
        assert_eq!(article.author_id(), author_id);
        assert_eq!(article.magazine_id(), magazine_id);
    }

    #[test]
    fn test_ids_are_unique_and_names_need_not_be() {
        let store = SqliteStore::open_in_memory().unwrap();

        let a = store.create_author("Sam").unwrap();
        let b = store.create_author("Sam").unwrap();
        assert_ne!(a, b);
        assert_eq!(store.count_authors().unwrap(), 2);
    }

    #[test]
    fn test_stats() {
        let store = SqliteStore::open_in_memory().unwrap();
        let author_id = store.create_author("Jane Doe").unwrap();
        let magazine_id = store.create_magazine("Tech", "Science").unwrap();
        store
            .create_article("Hello World", "", author_id, magazine_id)
            .unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.authors, 1);
        assert_eq!(stats.magazines, 1);
        assert_eq!(stats.articles, 1);
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("newsstand.db");

        let id = {
            let store = SqliteStore::open(&path).unwrap();
            store.create_author("Jane Doe").unwrap()
        };

        let store = SqliteStore::open(&path).unwrap();
        let author = store.get_author(id).unwrap().unwrap();
        assert_eq!(author.name(), "Jane Doe");
    }
}
