use crate::cli::commands::run_apply_all;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::core::engine::MigrationEngine;
use crate::db::ledger::{Ledger, SqliteLedger};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This backs up the current database (if any), makes sure the ledger
/// tables exist, and applies every pending schema.
pub fn handle(cfg: &Config) -> AppResult<()> {
    println!("Initializing database...");

    if let Some(name) = BackupLogic::create(cfg)? {
        success(format!("Created backup {name}"));
    }

    let pool = DbPool::new(&cfg.database_file()?)?;
    let ledger = SqliteLedger::new(&pool.conn);
    ledger.ensure_schema()?;

    let engine = MigrationEngine::new(&pool.conn, ledger, cfg.schemas_dir()?);
    let summary = run_apply_all(&engine)?;

    if summary.failed == 0 {
        success("Database initialized.");
    } else {
        warning("Errors during initializing database.");
    }

    Ok(())
}
