//! tomedb library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod ui;
pub mod utils;

use std::path::Path;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::FullInit { .. } => cli::commands::full_init::handle(&cli.command, cfg),
        Commands::Backup => cli::commands::backup::handle(cfg),
        Commands::Revert { .. } => cli::commands::revert::handle(&cli.command, cfg),
        Commands::Init => cli::commands::init::handle(cfg),
        Commands::Schema { command } => cli::commands::schema::handle(command, cfg),
        Commands::Table { .. } => cli::commands::table::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Load the project-level config once; --config overrides the location.
    let cfg = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load()?,
    };

    dispatch(&cli, &cfg)
}
