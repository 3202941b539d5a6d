//! src/services/bug_store.rs
//!
//! BugStore — create/read access to the `bugs` table. The store owns every
//! persisted bug; handlers only receive copies scoped to one request.

use crate::models::bug::{Bug, NewBug};
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("bug {0} not found")]
    NotFound(i64),
    #[error("field `{field}` is required")]
    Required { field: &'static str },
    #[error("field `{field}` holds a value outside its choices")]
    InvalidChoice { field: &'static str },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

const BUG_COLUMNS: &str = "id, description, bug_type, report_date, status";

/// BugStore exposes exactly the operations the web layer needs:
/// - insert one validated bug
/// - list every bug
/// - fetch one bug by id
///
/// There is no update or delete path.
#[derive(Clone)]
pub struct BugStore {
    /// Shared SQLite connection pool.
    pub db: Arc<SqlitePool>,
}

impl BugStore {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Insert a bug and return it with its assigned id.
    ///
    /// Choice fields are already typed, and the table's CHECK constraints
    /// reject anything else that reaches SQLite by another route.
    pub async fn create(&self, new: &NewBug) -> StoreResult<Bug> {
        if new.description.trim().is_empty() {
            return Err(StoreError::Required {
                field: "description",
            });
        }

        let bug = sqlx::query_as::<_, Bug>(&format!(
            "INSERT INTO bugs (description, bug_type, report_date, status)
             VALUES (?, ?, ?, ?)
             RETURNING {BUG_COLUMNS}"
        ))
        .bind(&new.description)
        .bind(new.bug_type)
        .bind(new.report_date)
        .bind(new.status)
        .fetch_one(&*self.db)
        .await
        .map_err(map_write_error)?;

        debug!("inserted bug {}", bug.id);
        Ok(bug)
    }

    /// All bugs, oldest first.
    pub async fn all(&self) -> StoreResult<Vec<Bug>> {
        let bugs = sqlx::query_as::<_, Bug>(&format!(
            "SELECT {BUG_COLUMNS} FROM bugs ORDER BY id ASC"
        ))
        .fetch_all(&*self.db)
        .await?;
        Ok(bugs)
    }

    /// Fetch a bug by primary key.
    ///
    /// Returns NotFound when no row has that id.
    pub async fn get(&self, id: i64) -> StoreResult<Bug> {
        sqlx::query_as::<_, Bug>(&format!("SELECT {BUG_COLUMNS} FROM bugs WHERE id = ?"))
            .bind(id)
            .fetch_one(&*self.db)
            .await
            .map_err(|err| match err {
                sqlx::Error::RowNotFound => StoreError::NotFound(id),
                other => StoreError::Sqlx(other),
            })
    }

    pub async fn count(&self) -> StoreResult<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bugs")
            .fetch_one(&*self.db)
            .await?;
        Ok(n)
    }
}

/// Translate a constraint failure on insert into the field it concerns.
fn map_write_error(err: sqlx::Error) -> StoreError {
    match check_violation_field(&err) {
        Some(field) => StoreError::InvalidChoice { field },
        None => StoreError::Sqlx(err),
    }
}

/// Name of the column guarded by a violated CHECK constraint, if any.
///
/// SQLite reports named constraints as `CHECK constraint failed: <name>`.
fn check_violation_field(err: &sqlx::Error) -> Option<&'static str> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    let message = db_err.message();
    if !message.contains("CHECK constraint failed") {
        return None;
    }
    if message.contains("bug_type") {
        Some("bug_type")
    } else if message.contains("status") {
        Some("status")
    } else {
        None
    }
}
