//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::audit::HistoryEntry;
use crate::engine::Stage;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Build the per-file progress bar driven by the engine's progress sink.
///
/// The bar tracks the engine's 0-100 percent scale; the stage label is
/// shown as the message.
pub fn make_progress_bar(prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template("{prefix:.bold} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .expect("progress template is valid")
            .progress_chars("=>-"),
    );
    pb.set_prefix(prefix.to_string());
    pb
}

/// Feed one engine progress update into a bar.
pub fn update_progress_bar(pb: &ProgressBar, percent: u8, stage: Stage) {
    pb.set_position(u64::from(percent));
    pb.set_message(stage.label());
}

/// Print a table of recent history entries (Time, Operation, File, Outcome).
pub fn print_history_table(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        info("No recorded operations yet.");
        tip("Run `skita encrypt <FILE>` to create your first container.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "File", "Outcome"]);

    for e in entries {
        table.add_row(vec![
            e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            e.operation.clone(),
            e.file_name.clone(),
            e.outcome.clone(),
        ]);
    }

    println!("{table}");
}
