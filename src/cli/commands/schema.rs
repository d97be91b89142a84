use std::fs;
use std::path::Path;

use crate::cli::commands::{ask_confirmation, run_apply_all};
use crate::cli::parser::SchemaCommands;
use crate::config::Config;
use crate::core::engine::{ApplyOutcome, MigrationEngine, RollbackOutcome};
use crate::core::schema::{DOWN_EXT, SchemaName, UP_EXT};
use crate::db::ledger::{Ledger, SqliteLedger};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::{GREEN, RED, RESET};

pub fn handle(cmd: &SchemaCommands, cfg: &Config) -> AppResult<()> {
    // `new` only touches the filesystem; no database needed.
    if let SchemaCommands::New { schema, name } = cmd {
        return new_schema(cfg, schema, name);
    }

    let pool = DbPool::new(&cfg.database_file()?)?;
    let ledger = SqliteLedger::new(&pool.conn);
    let engine = MigrationEngine::new(&pool.conn, ledger, cfg.schemas_dir()?);

    match cmd {
        SchemaCommands::Apply { schema, force } => {
            let mut confirm = |prompt: &str| ask_confirmation(prompt);
            match engine.apply(schema, *force, &mut confirm)? {
                ApplyOutcome::Applied => {
                    println!("Executing {schema}... {GREEN}Ok{RESET}");
                }
                ApplyOutcome::Failed(message) => {
                    println!("Executing {schema}... {RED}Failed{RESET}\n{message}");
                }
                ApplyOutcome::Skipped => info("Skipped."),
            }
        }

        SchemaCommands::List => {
            let (applied, pending) = engine.status()?;

            if applied.is_empty() {
                println!("No migrations have been applied yet.");
            } else {
                println!("Applied migrations:");
                for m in &applied {
                    println!(" - {} @ {}", m.name, m.applied_at);
                }
            }

            if pending.is_empty() {
                println!("No migrations are pending.");
            } else {
                println!("Pending migrations:");
                for name in &pending {
                    println!(" - {name}");
                }
            }
        }

        SchemaCommands::Rollback { schema } => match engine.rollback(schema)? {
            RollbackOutcome::RolledBack => {
                println!("{GREEN}Rolled back{RESET} {schema}");
            }
            RollbackOutcome::NoRollbackFile => {
                println!("No rollback file found for {schema}");
            }
            RollbackOutcome::Failed(message) => {
                println!("{RED}Failed{RESET}\n{message}");
            }
        },

        SchemaCommands::ApplyAll => {
            let summary = run_apply_all(&engine)?;
            if summary.applied == 0 && summary.failed == 0 {
                println!("No migrations are pending.");
            } else {
                println!("{} applied, {} failed.", summary.applied, summary.failed);
            }
        }

        SchemaCommands::Errors => {
            let errors = engine.ledger().list_errors(10)?;

            if errors.is_empty() {
                println!("No migration errors logged.");
            } else {
                println!("Recent migration errors:");
                for e in &errors {
                    println!("\n#{} | {} @ {}\n → {}", e.id, e.name, e.occurred_at, e.error);
                }
            }
        }

        SchemaCommands::ClearErrors => {
            engine.ledger().clear_errors()?;
            success("Cleared all migration errors.");
        }

        SchemaCommands::New { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Create the up/down file pair for a new schema, refusing to overwrite.
fn new_schema(cfg: &Config, raw: &str, desc: &str) -> AppResult<()> {
    let name = SchemaName::parse(raw)?;

    let dir = cfg.schemas_dir()?.join(&name.folder);
    fs::create_dir_all(&dir)?;

    let up = dir.join(format!("{}-{}{}", name.number, desc, UP_EXT));
    let down = dir.join(format!("{}-{}{}", name.number, desc, DOWN_EXT));

    write_stub(&up, &format!("-- {raw}.{desc} migration\n"))?;
    write_stub(&down, &format!("-- {raw}.{desc}.down migration\n"))?;

    Ok(())
}

fn write_stub(path: &Path, header: &str) -> AppResult<()> {
    if path.exists() {
        warning(format!("File {} already exists.", path.display()));
    } else {
        fs::write(path, header)?;
        success(format!("Created {}", path.display()));
    }
    Ok(())
}
