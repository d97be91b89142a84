//! SQLite connection wrapper (lightweight for CLI usage).

use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

use crate::errors::AppResult;

/// How long a connection waits on another process's lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(100);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &Path) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }
}
