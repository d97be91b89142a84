//! Schema discovery, ordering, application, and rollback.
//!
//! The engine walks the schema root for up-files, decides which are still
//! pending against the injected [`Ledger`], and runs each script as one
//! batch inside its own transaction. A failing script is recorded in the
//! error log and never aborts the rest of a batch.

use rusqlite::Connection;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::resolver;
use crate::core::schema::{DOWN_EXT, SchemaName, UP_EXT};
use crate::db::ledger::{AppliedMigration, Ledger};
use crate::errors::{AppError, AppResult};

/// An up-migration found on disk, keyed by its display identifier
/// (`folder.stem`, or the bare stem for files directly in the root).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredSchema {
    pub name: String,
    pub path: PathBuf,
}

/// Terminal state of one schema application.
#[derive(Debug)]
pub enum ApplyOutcome {
    Applied,
    Failed(String),
    /// Already applied and the caller declined to re-run it.
    Skipped,
}

#[derive(Debug)]
pub enum RollbackOutcome {
    RolledBack,
    NoRollbackFile,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub applied: usize,
    pub failed: usize,
}

pub struct MigrationEngine<'a, L: Ledger> {
    conn: &'a Connection,
    ledger: L,
    schemas_dir: PathBuf,
}

impl<'a, L: Ledger> MigrationEngine<'a, L> {
    pub fn new(conn: &'a Connection, ledger: L, schemas_dir: PathBuf) -> Self {
        Self {
            conn,
            ledger,
            schemas_dir,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Walk the schema root and collect every up-file, sorted ascending by
    /// display identifier. That sort is the sole ordering rule: folders
    /// sort before their numeric suffixes, so zero-padded numbers give a
    /// deterministic, human-predictable sequence.
    pub fn discover(&self) -> AppResult<Vec<DiscoveredSchema>> {
        let mut out = Vec::new();
        if self.schemas_dir.is_dir() {
            walk(&self.schemas_dir, None, &mut out)?;
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    /// Discovered schemas with no ledger entry yet.
    pub fn pending(&self) -> AppResult<Vec<DiscoveredSchema>> {
        let applied = self.ledger.applied_names()?;
        Ok(self
            .discover()?
            .into_iter()
            .filter(|s| !applied.contains(&s.name))
            .collect())
    }

    /// Apply one identifier by name, resolving it to an up-file first.
    /// An already-applied identifier is only re-run when `force` is set or
    /// `confirm` agrees; re-running inserts an additional ledger row.
    pub fn apply(
        &self,
        raw: &str,
        force: bool,
        confirm: &mut dyn FnMut(&str) -> bool,
    ) -> AppResult<ApplyOutcome> {
        let name = SchemaName::parse(raw)?;
        let path = resolver::resolve(&self.schemas_dir, &name, UP_EXT)?;

        if !force && self.ledger.applied_names()?.contains(raw) {
            let prompt =
                format!("Schema '{raw}' is already applied. Apply it again (may be destructive)?");
            if !confirm(&prompt) {
                return Ok(ApplyOutcome::Skipped);
            }
        }

        self.apply_file(raw, &path)
    }

    /// Run one schema file and record the outcome under `name`.
    ///
    /// The script executes as a single batch inside one transaction,
    /// together with the ledger insert: either the whole file applied and
    /// the ledger says so, or neither happened. On failure the error log
    /// gets one row keyed by the file path.
    pub fn apply_file(&self, name: &str, path: &Path) -> AppResult<ApplyOutcome> {
        let run = || -> AppResult<()> {
            let script = fs::read_to_string(path)?;
            let tx = self.conn.unchecked_transaction()?;
            tx.execute_batch(&script)?;
            self.ledger.record_applied(name)?;
            tx.commit()?;
            Ok(())
        };

        match run() {
            Ok(()) => Ok(ApplyOutcome::Applied),
            Err(e) => {
                let message = e.to_string();
                self.ledger
                    .record_error(&path.display().to_string(), &message)?;
                Ok(ApplyOutcome::Failed(message))
            }
        }
    }

    /// Apply every pending schema in order, reporting each outcome through
    /// `on_item`. One bad migration does not block the ones after it.
    pub fn apply_all(
        &self,
        mut on_item: impl FnMut(&DiscoveredSchema, &ApplyOutcome),
    ) -> AppResult<BatchSummary> {
        let mut summary = BatchSummary::default();

        for schema in self.pending()? {
            let outcome = self.apply_file(&schema.name, &schema.path)?;
            match outcome {
                ApplyOutcome::Applied => summary.applied += 1,
                ApplyOutcome::Failed(_) => summary.failed += 1,
                ApplyOutcome::Skipped => {}
            }
            on_item(&schema, &outcome);
        }

        Ok(summary)
    }

    /// Roll back one identifier via its down-file, then clear every ledger
    /// entry sharing the identifier prefix (folder-grouped display names
    /// included). A missing down-file is not an error. A failing down
    /// script leaves the ledger untouched and is reported but, unlike
    /// up-migrations, not persisted to the error log.
    pub fn rollback(&self, raw: &str) -> AppResult<RollbackOutcome> {
        let name = SchemaName::parse(raw)?;
        let down_path = match resolver::resolve(&self.schemas_dir, &name, DOWN_EXT) {
            Ok(p) => p,
            Err(AppError::SchemaNotFound(..)) => return Ok(RollbackOutcome::NoRollbackFile),
            Err(e) => return Err(e),
        };

        let run = || -> AppResult<()> {
            let script = fs::read_to_string(&down_path)?;
            let tx = self.conn.unchecked_transaction()?;
            tx.execute_batch(&script)?;
            self.ledger.remove_applied(raw)?;
            tx.commit()?;
            Ok(())
        };

        match run() {
            Ok(()) => Ok(RollbackOutcome::RolledBack),
            Err(e) => Ok(RollbackOutcome::Failed(e.to_string())),
        }
    }

    /// Applied entries (with timestamps) and pending identifiers, for the
    /// status listing.
    pub fn status(&self) -> AppResult<(Vec<AppliedMigration>, Vec<String>)> {
        let applied = self.ledger.applied()?;
        let names: HashSet<&str> = applied.iter().map(|m| m.name.as_str()).collect();

        let pending = self
            .discover()?
            .into_iter()
            .filter(|s| !names.contains(s.name.as_str()))
            .map(|s| s.name)
            .collect();

        Ok((applied, pending))
    }
}

fn walk(dir: &Path, folder: Option<&str>, out: &mut Vec<DiscoveredSchema>) -> AppResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let Ok(file) = entry.file_name().into_string() else {
            continue;
        };

        if path.is_dir() {
            walk(&path, Some(&file), out)?;
        } else if let Some(stem) = file.strip_suffix(UP_EXT) {
            if file.ends_with(DOWN_EXT) {
                continue;
            }
            let name = match folder {
                Some(f) => format!("{f}.{stem}"),
                None => stem.to_string(),
            };
            out.push(DiscoveredSchema { name, path });
        }
    }
    Ok(())
}
