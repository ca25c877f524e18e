//! Category storage contract and SQLite implementation.
//!
//! # Responsibility
//! - Execute predicate-based reads (`find_one`, `find_all`, `exists`, `count`).
//! - Provide the generic write channel (`create`, `update`, `delete`) that
//!   surrounding code uses to maintain records.
//!
//! # Invariants
//! - `find_all` returns rows ordered by `id ASC` (insertion order).
//! - `exists` never transfers row payloads.
//! - Deleted ids are never handed out again (`AUTOINCREMENT`).

use crate::db::DbError;
use crate::model::category::{Category, CategoryId};
use crate::repo::predicate::CategoryPredicate;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CATEGORY_COLUMNS: &str = "id, name, created_at, updated_at";
const REQUIRED_COLUMNS: [&str; 4] = ["id", "name", "created_at", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Error returned by category stores.
#[derive(Debug)]
pub enum RepoError {
    /// Backend failure (connectivity, busy timeout, SQL error, ...).
    Db(DbError),
    /// Write targeted an id that does not exist.
    NotFound(CategoryId),
    /// A single-result query matched more than one row.
    NonUniqueResult { predicate: &'static str },
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "category not found: {id}"),
            Self::NonUniqueResult { predicate } => write!(
                f,
                "query `{predicate}` expected at most one category but matched several"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted category data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage backend contract for category records.
pub trait CategoryStore {
    /// Returns the single matching category, `None` when nothing matches.
    ///
    /// Fails with `RepoError::NonUniqueResult` when several rows match.
    fn find_one(&self, predicate: &CategoryPredicate) -> RepoResult<Option<Category>>;
    /// Returns every matching category ordered by id.
    fn find_all(&self, predicate: &CategoryPredicate) -> RepoResult<Vec<Category>>;
    /// Returns whether at least one category matches.
    fn exists(&self, predicate: &CategoryPredicate) -> RepoResult<bool>;
    fn count(&self, predicate: &CategoryPredicate) -> RepoResult<u64>;
    /// Inserts a category and returns the stored record.
    fn create_category(&self, name: &str) -> RepoResult<Category>;
    /// Renames an existing category.
    fn update_category(&self, category: &Category) -> RepoResult<()>;
    /// Hard-deletes a category by id.
    fn delete_category(&self, id: CategoryId) -> RepoResult<()>;
}

/// SQLite-backed category store.
pub struct SqliteCategoryStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCategoryStore<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema is
    ///   not the one produced by `db::open_db`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl CategoryStore for SqliteCategoryStore<'_> {
    fn find_one(&self, predicate: &CategoryPredicate) -> RepoResult<Option<Category>> {
        let (clause, values) = predicate.to_sql();
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE {clause} ORDER BY id ASC LIMIT 2;"
        ))?;
        let mut rows = stmt.query(params_from_iter(values))?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let category = parse_category_row(row)?;

        if rows.next()?.is_some() {
            return Err(RepoError::NonUniqueResult {
                predicate: predicate.label(),
            });
        }

        Ok(Some(category))
    }

    fn find_all(&self, predicate: &CategoryPredicate) -> RepoResult<Vec<Category>> {
        let (clause, values) = predicate.to_sql();
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE {clause} ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query(params_from_iter(values))?;
        let mut categories = Vec::new();

        while let Some(row) = rows.next()? {
            categories.push(parse_category_row(row)?);
        }

        Ok(categories)
    }

    fn exists(&self, predicate: &CategoryPredicate) -> RepoResult<bool> {
        let (clause, values) = predicate.to_sql();
        let exists: i64 = self.conn.query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM categories WHERE {clause});"),
            params_from_iter(values),
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn count(&self, predicate: &CategoryPredicate) -> RepoResult<u64> {
        let (clause, values) = predicate.to_sql();
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM categories WHERE {clause};"),
            params_from_iter(values),
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn create_category(&self, name: &str) -> RepoResult<Category> {
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO categories (name) VALUES (?1) RETURNING {CATEGORY_COLUMNS};"
        ))?;
        let mut rows = stmt.query([name])?;
        let Some(row) = rows.next()? else {
            return Err(RepoError::InvalidData(
                "insert returned no category row".to_string(),
            ));
        };
        let category = parse_category_row(row)?;
        Ok(category)
    }

    fn update_category(&self, category: &Category) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE categories
             SET
                name = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![category.name.as_str(), category.id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(category.id));
        }

        Ok(())
    }

    fn delete_category(&self, id: CategoryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let id: CategoryId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in categories.id"
        )));
    }

    Ok(Category {
        id,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "categories")? {
        return Err(RepoError::MissingRequiredTable("categories"));
    }

    for column in REQUIRED_COLUMNS {
        if !table_has_column(conn, "categories", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "categories",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
