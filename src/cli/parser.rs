use clap::{Parser, Subcommand};

/// Command-line interface definition for tomedb
/// CLI application to manage a local SQLite database lifecycle
#[derive(Parser)]
#[command(
    name = "tomedb",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple database management CLI: versioned schema migrations, rollbacks, and backups for a local SQLite database",
    long_about = None
)]
pub struct Cli {
    /// Override the configuration file path (useful for tests or custom setups)
    #[arg(global = true, long = "config")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fully initialize the database (destroys the current one)
    FullInit {
        #[arg(long, help = "Force destructive action without confirmation")]
        force: bool,
    },

    /// Create a timestamped backup of the database
    Backup,

    /// Revert the database to a backup ("last" or an exact backup filename)
    Revert {
        /// Backup to restore: an exact filename or "last"
        date: String,
    },

    /// Initialize the database and apply all pending schemas
    Init,

    /// Schema management
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },

    /// Show the column layout of a table
    Table {
        /// Table name
        table: String,
    },
}

#[derive(Subcommand)]
pub enum SchemaCommands {
    /// Apply a schema
    Apply {
        /// Schema identifier (folder.number)
        schema: String,

        #[arg(long, help = "Force apply even if already applied")]
        force: bool,
    },

    /// Create the files for a new schema
    New {
        /// Schema identifier (folder.number)
        schema: String,

        /// Short description used in the filenames
        name: String,
    },

    /// List applied and pending migrations
    List,

    /// Rollback a migration, if a .down.sql file exists
    Rollback {
        /// Schema identifier (folder.number)
        schema: String,
    },

    /// Apply all pending migrations
    ApplyAll,

    /// Show logged migration errors
    Errors,

    /// Clear all logged migration errors
    ClearErrors,
}
