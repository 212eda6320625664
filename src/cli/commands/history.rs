//! `skita history` — show recent encrypt/decrypt operations.

use crate::audit::History;
use crate::cli::output;
use crate::errors::Result;

/// Execute the `history` command.
pub fn execute(last: usize) -> Result<()> {
    let Some(history) = History::open_default() else {
        output::info("Operation history is unavailable on this system.");
        return Ok(());
    };

    let entries = history.query(last)?;
    output::print_history_table(&entries);

    Ok(())
}
