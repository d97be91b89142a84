use std::fs;

use crate::cli::commands::{ask_confirmation, run_apply_all};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::core::engine::MigrationEngine;
use crate::db::ledger::{Ledger, SqliteLedger};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `full-init` command
///
/// Destroys the current database and rebuilds everything from scratch:
/// directory layout, ledger tables, then every schema on disk.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::FullInit { force } = cmd {
        let db_file = cfg.database_file()?;

        if db_file.exists()
            && !force
            && !ask_confirmation("This is destructive. Do you want to do this?")
        {
            info("Operation cancelled.");
            return Ok(());
        }

        println!("Creating directories...");

        // --force also skips the safety backup.
        if !force
            && let Some(name) = BackupLogic::create(cfg)?
        {
            success(format!("Created backup {name}"));
        }

        if db_file.exists() {
            fs::remove_file(&db_file)?;
        }

        for dir in [cfg.db_root()?, cfg.schemas_dir()?, cfg.backups_dir()?] {
            if !dir.exists() {
                println!("Creating {}...", dir.display());
                fs::create_dir_all(&dir)?;
                println!("Created {}", dir.display());
            }
        }
        println!("Created directories.");

        println!("Creating migrations table.");
        let pool = DbPool::new(&db_file)?;
        let ledger = SqliteLedger::new(&pool.conn);
        ledger.ensure_schema()?;
        println!("Created migrations table.");

        println!("Creating database...");
        let engine = MigrationEngine::new(&pool.conn, ledger, cfg.schemas_dir()?);
        run_apply_all(&engine)?;
        println!("Created database.");

        success("Fully initialized the database.");
    }

    Ok(())
}
