//! Unified application error type.
//! All modules (db, core, cli, config) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Error while getting config key: {0}")]
    Config(String),

    #[error("Failed to load configuration file: {0}")]
    ConfigLoad(String),

    // ---------------------------
    // Schema resolution errors
    // ---------------------------
    #[error("Invalid schema name format: '{0}'. Use format 'folder.number'")]
    InvalidSchemaName(String),

    #[error("Schema directory '{0}' does not exist")]
    SchemaDirNotFound(String),

    #[error("No matching schema file found for '{0}' in '{1}'")]
    SchemaNotFound(String, String),

    // ---------------------------
    // Backup errors
    // ---------------------------
    #[error("Backup error: {0}")]
    Backup(String),
}

pub type AppResult<T> = Result<T, AppError>;
