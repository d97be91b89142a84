//! Symbolic schema identifiers of the form `folder.number`.

use std::fmt;

use crate::errors::{AppError, AppResult};

/// Extension of an "up" migration file.
pub const UP_EXT: &str = ".sql";

/// Extension of a "down" (rollback) migration file.
pub const DOWN_EXT: &str = ".down.sql";

/// A parsed schema identifier. `folder` groups related migrations;
/// `number` is a string-sortable sequence token unique within the folder
/// (conventionally zero-padded digits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaName {
    pub folder: String,
    pub number: String,
}

impl SchemaName {
    /// Parse an identifier like `users.003`. Exactly two non-empty
    /// dot-separated parts are required.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let parts: Vec<&str> = raw.split('.').collect();
        match parts.as_slice() {
            [folder, number] if !folder.is_empty() && !number.is_empty() => Ok(Self {
                folder: folder.to_string(),
                number: number.to_string(),
            }),
            _ => Err(AppError::InvalidSchemaName(raw.to_string())),
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.folder, self.number)
    }
}
