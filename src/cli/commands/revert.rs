use std::io::{self, Write};

use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;

/// Ask whether to back up before overwriting the live database.
/// Anything but an explicit "n" backs up first.
fn ask_backup_first() -> bool {
    print!("Do you want to backup now? [Y/n]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        !matches!(s.trim().to_lowercase().as_str(), "n" | "no")
    } else {
        true
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Revert { date } = cmd {
        // Resolve the target before the safety backup, otherwise "last"
        // would select the backup we are about to create.
        let target = if date == "last" {
            match BackupLogic::latest(cfg)? {
                Some(name) => name,
                None => {
                    println!("No last backup");
                    return Ok(());
                }
            }
        } else {
            date.clone()
        };

        if ask_backup_first() {
            if let Some(name) = BackupLogic::create(cfg)? {
                success(format!("Created backup {name}"));
            }
        }

        match BackupLogic::restore(cfg, &target) {
            Ok(()) => success(format!("Reverted to: {target}")),
            Err(AppError::Backup(_)) => println!("No backup from that date"),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
