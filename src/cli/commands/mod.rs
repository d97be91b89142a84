pub mod backup;
pub mod full_init;
pub mod init;
pub mod revert;
pub mod schema;
pub mod table;

use std::io::{self, Write};

use crate::core::engine::{ApplyOutcome, BatchSummary, MigrationEngine};
use crate::db::ledger::Ledger;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use crate::utils::colors::{GREEN, RED, RESET};

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

/// Apply every pending schema, printing one `Executing <id>... Ok|Failed`
/// line per item. Returns the batch summary for the caller's closing line.
pub(crate) fn run_apply_all<L: Ledger>(engine: &MigrationEngine<'_, L>) -> AppResult<BatchSummary> {
    engine.apply_all(|schema, outcome| match outcome {
        ApplyOutcome::Applied => {
            println!("Executing {}... {GREEN}Ok{RESET}", schema.name);
        }
        ApplyOutcome::Failed(message) => {
            println!("Executing {}... {RED}Failed{RESET}\n{message}", schema.name);
        }
        ApplyOutcome::Skipped => {}
    })
}
