//! Translate a symbolic schema identifier into a schema file on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::schema::{DOWN_EXT, SchemaName};
use crate::errors::{AppError, AppResult};

/// Find the file for `name` under `schemas_dir`, honoring the up/down
/// file suffixes. `ext` is either [`UP_EXT`] or [`DOWN_EXT`].
///
/// When several files share the same numeric prefix the lexicographically
/// first filename wins, so resolution never depends on directory order.
///
/// [`UP_EXT`]: crate::core::schema::UP_EXT
/// [`DOWN_EXT`]: crate::core::schema::DOWN_EXT
pub fn resolve(schemas_dir: &Path, name: &SchemaName, ext: &str) -> AppResult<PathBuf> {
    let dir = schemas_dir.join(&name.folder);
    if !dir.is_dir() {
        return Err(AppError::SchemaDirNotFound(dir.display().to_string()));
    }

    let mut entries: Vec<String> = fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    entries.sort();

    let exact = format!("{}{}", name.number, ext);
    let prefixed = format!("{}-", name.number);

    for file in entries {
        // Down-files only resolve when the rollback extension is requested.
        if ext != DOWN_EXT && file.ends_with(DOWN_EXT) {
            continue;
        }
        if file == exact || (file.starts_with(&prefixed) && file.ends_with(ext)) {
            return Ok(dir.join(file));
        }
    }

    Err(AppError::SchemaNotFound(
        name.to_string(),
        dir.display().to_string(),
    ))
}
