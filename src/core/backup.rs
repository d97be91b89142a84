//! Timestamped file-level backups of the managed database.
//!
//! A backup copies the whole database file, ledger tables included, so a
//! restore brings data and migration history back in step.

use chrono::{Local, NaiveDateTime};
use std::fs;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Fixed, string-sortable timestamp format used for backup filenames.
pub const BACKUP_TS_FORMAT: &str = "%d-%m-%Y_%H-%M-%S";

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the live database into `backups/` under a timestamped name
    /// and return the created filename. Does nothing (and does not fail)
    /// when the storage root or the database file does not exist yet, so
    /// it is safe to call on a first run.
    pub fn create(cfg: &Config) -> AppResult<Option<String>> {
        let root = cfg.db_root()?;
        let db_file = cfg.database_file()?;

        if !root.exists() || !db_file.exists() {
            return Ok(None);
        }

        let backups = cfg.backups_dir()?;
        fs::create_dir_all(&backups)?;

        let name = format!("{}.db", Local::now().format(BACKUP_TS_FORMAT));
        fs::copy(&db_file, backups.join(&name))?;

        Ok(Some(name))
    }

    /// Newest backup filename, judged by the timestamp encoded in the
    /// name. Files that do not parse with [`BACKUP_TS_FORMAT`] are
    /// ignored. Ties on the timestamp fall back to the larger filename.
    pub fn latest(cfg: &Config) -> AppResult<Option<String>> {
        let backups = cfg.backups_dir()?;
        if !backups.is_dir() {
            return Ok(None);
        }

        let mut candidates: Vec<(NaiveDateTime, String)> = Vec::new();
        for entry in fs::read_dir(&backups)? {
            let entry = entry?;
            let Ok(file) = entry.file_name().into_string() else {
                continue;
            };
            let Some(stem) = file.strip_suffix(".db") else {
                continue;
            };
            if let Ok(ts) = NaiveDateTime::parse_from_str(stem, BACKUP_TS_FORMAT) {
                candidates.push((ts, file));
            }
        }

        Ok(candidates.into_iter().max().map(|(_, file)| file))
    }

    /// Copy a named backup over the live database file. Destructive;
    /// callers confirm intent before getting here.
    pub fn restore(cfg: &Config, name: &str) -> AppResult<()> {
        let src = cfg.backups_dir()?.join(name);
        if !src.exists() {
            return Err(AppError::Backup(format!("no backup named '{name}'")));
        }

        fs::copy(&src, cfg.database_file()?)?;
        Ok(())
    }
}
