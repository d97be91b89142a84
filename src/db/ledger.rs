//! Persistent record of which schemas have been applied, plus a log of
//! failed application attempts. Both tables live inside the managed
//! database itself, so a file-level backup captures the migration history
//! together with the data.

use rusqlite::{Connection, params};
use std::collections::HashSet;

use crate::errors::AppResult;

/// A `migrations` row.
#[derive(Debug, Clone)]
pub struct AppliedMigration {
    pub name: String,
    pub applied_at: String,
}

/// A `migration_errors` row.
#[derive(Debug, Clone)]
pub struct MigrationError {
    pub id: i64,
    pub name: String,
    pub error: String,
    pub occurred_at: String,
}

/// All reads and writes touching the two ledger tables go through this
/// trait; the engine never issues ledger SQL itself.
pub trait Ledger {
    /// Idempotently create the ledger tables.
    fn ensure_schema(&self) -> AppResult<()>;

    /// Distinct names currently recorded as applied.
    fn applied_names(&self) -> AppResult<HashSet<String>>;

    /// Applied entries with timestamps, oldest first.
    fn applied(&self) -> AppResult<Vec<AppliedMigration>>;

    /// Append an applied entry. Duplicates are allowed: a forced re-apply
    /// inserts a new row rather than updating the old one.
    fn record_applied(&self, name: &str) -> AppResult<()>;

    /// Append an error-log entry.
    fn record_error(&self, name: &str, error: &str) -> AppResult<()>;

    /// Delete every applied entry whose name starts with `prefix`.
    /// Rollback uses this: a down-migration undoes all variants sharing
    /// an identifier prefix.
    fn remove_applied(&self, prefix: &str) -> AppResult<()>;

    /// Most recent errors first.
    fn list_errors(&self, limit: usize) -> AppResult<Vec<MigrationError>>;

    fn clear_errors(&self) -> AppResult<()>;
}

/// Ledger backed by the managed SQLite database.
pub struct SqliteLedger<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteLedger<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl Ledger for SqliteLedger<'_> {
    fn ensure_schema(&self) -> AppResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS migrations (
                id INTEGER PRIMARY KEY,
                name TEXT,
                applied_at TEXT DEFAULT CURRENT_TIMESTAMP
            );
            CREATE TABLE IF NOT EXISTS migration_errors (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                error TEXT NOT NULL,
                occurred_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )?;
        Ok(())
    }

    fn applied_names(&self) -> AppResult<HashSet<String>> {
        let mut stmt = self.conn.prepare_cached("SELECT name FROM migrations")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut out = HashSet::new();
        for r in rows {
            out.insert(r?);
        }
        Ok(out)
    }

    fn applied(&self) -> AppResult<Vec<AppliedMigration>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT name, applied_at FROM migrations ORDER BY applied_at, id")?;
        let rows = stmt.query_map([], |row| {
            Ok(AppliedMigration {
                name: row.get(0)?,
                applied_at: row.get(1)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn record_applied(&self, name: &str) -> AppResult<()> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO migrations (name) VALUES (?1)")?;
        stmt.execute(params![name])?;
        Ok(())
    }

    fn record_error(&self, name: &str, error: &str) -> AppResult<()> {
        let mut stmt = self
            .conn
            .prepare_cached("INSERT INTO migration_errors (name, error) VALUES (?1, ?2)")?;
        stmt.execute(params![name, error])?;
        Ok(())
    }

    fn remove_applied(&self, prefix: &str) -> AppResult<()> {
        let mut stmt = self
            .conn
            .prepare_cached("DELETE FROM migrations WHERE name LIKE ?1")?;
        stmt.execute(params![format!("{prefix}%")])?;
        Ok(())
    }

    fn list_errors(&self, limit: usize) -> AppResult<Vec<MigrationError>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, name, error, occurred_at FROM migration_errors
             ORDER BY occurred_at DESC, id DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok(MigrationError {
                id: row.get(0)?,
                name: row.get(1)?,
                error: row.get(2)?,
                occurred_at: row.get(3)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn clear_errors(&self) -> AppResult<()> {
        self.conn.execute("DELETE FROM migration_errors", [])?;
        Ok(())
    }
}
