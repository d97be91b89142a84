use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;

/// Project-level configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "tomedb.yml";

pub const DATABASE_FILE: &str = "database.db";
pub const SCHEMAS_DIR: &str = "schemas";
pub const BACKUPS_DIR: &str = "backups";

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Root path under which schemas/, backups/ and the database file live.
    #[serde(default)]
    pub db_folder: Option<String>,
}

impl Config {
    /// Load configuration from the default project-level file.
    pub fn load() -> AppResult<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::ConfigLoad(format!("{}: {}", path.display(), e)))
    }

    /// The configured storage root. Fails when `db_folder` is absent,
    /// since every other path is derived from it.
    pub fn db_root(&self) -> AppResult<PathBuf> {
        match &self.db_folder {
            Some(p) => Ok(expand_tilde(p)),
            None => Err(AppError::Config("db_folder".into())),
        }
    }

    pub fn database_file(&self) -> AppResult<PathBuf> {
        Ok(self.db_root()?.join(DATABASE_FILE))
    }

    pub fn schemas_dir(&self) -> AppResult<PathBuf> {
        Ok(self.db_root()?.join(SCHEMAS_DIR))
    }

    pub fn backups_dir(&self) -> AppResult<PathBuf> {
        Ok(self.db_root()?.join(BACKUPS_DIR))
    }
}
