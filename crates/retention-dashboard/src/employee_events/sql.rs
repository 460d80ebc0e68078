//! SQLite execution for the query models.
//!
//! The database file is opened read-only for every query and closed again
//! when the query returns; nothing holds a connection between requests.

use rusqlite::{Connection, OpenFlags, Params, Row};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("database file not found at {}", .0.display())]
    MissingDatabase(PathBuf),
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Handle to the employee events SQLite file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, QueryError> {
        if !self.path.is_file() {
            return Err(QueryError::MissingDatabase(self.path.clone()));
        }

        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }

    /// Runs `sql` with bound `params` and maps every returned row.
    pub fn query<T, P, F>(&self, sql: &str, params: P, map_row: F) -> Result<Vec<T>, QueryError>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(database = %self.path.display(), sql = %compact_sql(sql), "executing query");

        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, map_row)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

fn compact_sql(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}
