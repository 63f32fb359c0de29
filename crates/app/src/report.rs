use std::fmt::Write as _;

use rounds_core::board::ProgressBoard;
use rounds_core::model::LogEntry;
use ui::vm::format_delta;

/// Width of a full-height bar in `show` output.
const BAR_WIDTH: usize = 20;

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_cells(height_pct: f64) -> usize {
    ((height_pct / 100.0) * BAR_WIDTH as f64).round() as usize
}

/// Plain-text rendering of the board: one line per topic, then the total.
#[must_use]
pub fn render_board(board: &ProgressBoard) -> String {
    let mut out = String::new();
    for column in &board.columns {
        let _ = writeln!(
            out,
            "{:<6} {:>4} {}",
            column.short_label,
            column.count,
            "#".repeat(bar_cells(column.height_pct))
        );
    }

    let shown: u64 = board.columns.iter().map(|c| c.count).sum();
    if board.total > shown {
        let _ = writeln!(
            out,
            "(+{} rounds in imported topics not on the board)",
            board.total - shown
        );
    }
    let _ = writeln!(out, "Total: {}", board.total);
    out
}

/// Change-log lines in the order given.
#[must_use]
pub fn render_log(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return "No changes recorded yet.\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{}  {:>4}  {}",
            entry.date,
            format_delta(entry.delta),
            entry.topic
        );
    }
    out
}
