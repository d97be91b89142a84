use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cfg: &Config) -> AppResult<()> {
    println!("Starting backup...");

    match BackupLogic::create(cfg)? {
        Some(name) => success(format!("Created backup {name}")),
        None => warning("Nothing to back up yet."),
    }

    Ok(())
}
