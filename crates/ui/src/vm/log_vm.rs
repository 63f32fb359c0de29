use rounds_core::model::LogEntry;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRowVm {
    pub date: String,
    pub topic: String,
    pub delta: String,
    pub is_decrement: bool,
}

impl From<&LogEntry> for LogRowVm {
    fn from(entry: &LogEntry) -> Self {
        Self {
            date: entry.date.to_string(),
            topic: entry.topic.clone(),
            delta: format_delta(entry.delta),
            is_decrement: entry.delta < 0,
        }
    }
}

/// Signed delta with an explicit `+` for positive values.
#[must_use]
pub fn format_delta(delta: i64) -> String {
    format!("{delta:+}")
}

#[must_use]
pub fn map_log_rows(entries: &[LogEntry]) -> Vec<LogRowVm> {
    entries.iter().map(LogRowVm::from).collect()
}
