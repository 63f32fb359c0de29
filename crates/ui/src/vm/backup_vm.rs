use services::ImportSummary;

#[must_use]
pub fn import_message(summary: &ImportSummary) -> String {
    let mut message = format!(
        "Imported {} rounds and {} log entries",
        summary.total_rounds, summary.log_entries
    );
    if !summary.unknown_topics.is_empty() {
        message.push_str(&format!(
            " (kept topics not shown on the board: {})",
            summary.unknown_topics.join(", ")
        ));
    }
    message
}
