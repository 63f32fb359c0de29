//! Snapshot codec: the JSON shape shared by the backing file, exports and
//! imports, plus the flat CSV export.
//!
//! ```text
//! { "counts": { "<topic>": <int>, ... },
//!   "log": [ {"date": "YYYY-MM-DD", "topic": "<topic>", "delta": <int>}, ... ] }
//! ```

use rounds_core::model::{Counts, LogEntry, ProgressState, TopicCatalog};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::repository::StorageError;

/// UTF-8 byte order mark written by "utf-8-sig" style exports.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Errors raised while decoding an externally supplied snapshot.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ImportError {
    #[error("snapshot is not valid UTF-8")]
    InvalidUtf8,

    #[error("snapshot is empty")]
    Empty,

    #[error("snapshot is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("snapshot root must be a JSON object")]
    NotAnObject,

    #[error("\"counts\" must be a JSON object")]
    CountsNotAnObject,

    #[error("count for {topic:?} must be a non-negative integer")]
    InvalidCount { topic: String },

    #[error("\"log\" must be a JSON array")]
    LogNotAnArray,

    #[error("log entry #{index} is malformed: {reason}")]
    InvalidLogEntry { index: usize, reason: String },
}

/// Decodes snapshot bytes (BOM tolerated) into a state for `catalog`.
///
/// Missing `counts`/`log` default to empty; catalog topics missing from
/// `counts` are back-filled with 0; keys outside the catalog are kept.
///
/// # Errors
///
/// Returns `ImportError` when the bytes are not a well-formed snapshot.
pub fn decode(bytes: &[u8], catalog: &TopicCatalog) -> Result<ProgressState, ImportError> {
    let root = parse_root(bytes)?;

    let counts = match root.get("counts") {
        None | Some(Value::Null) => Counts::new(),
        Some(Value::Object(map)) => {
            let mut counts = Counts::new();
            for (topic, value) in map {
                let count = value.as_u64().ok_or_else(|| ImportError::InvalidCount {
                    topic: topic.clone(),
                })?;
                counts.set(topic, count);
            }
            counts
        }
        Some(_) => return Err(ImportError::CountsNotAnObject),
    };

    let log = match root.get("log") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                log_entry(item).map_err(|reason| ImportError::InvalidLogEntry { index, reason })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(ImportError::LogNotAnArray),
    };

    Ok(ProgressState::from_parts(catalog, counts, log))
}

/// Parts of a snapshot that [`decode_salvaging`] had to leave out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Salvage {
    /// Keys whose count was not a non-negative integer.
    pub dropped_counts: Vec<String>,
    /// Number of log entries that did not parse.
    pub dropped_log_entries: usize,
    /// `counts` was present but not an object.
    pub counts_discarded: bool,
    /// `log` was present but not an array.
    pub log_discarded: bool,
}

impl Salvage {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped_counts.is_empty()
            && self.dropped_log_entries == 0
            && !self.counts_discarded
            && !self.log_discarded
    }
}

/// Decodes a stored snapshot, keeping every well-formed count and log entry.
///
/// Unlike [`decode`], malformed rows are skipped and reported in the returned
/// [`Salvage`] instead of failing the whole payload.
///
/// # Errors
///
/// Returns `ImportError::InvalidUtf8`, `Empty`, `InvalidJson` or
/// `NotAnObject` when nothing can be recovered.
pub fn decode_salvaging(
    bytes: &[u8],
    catalog: &TopicCatalog,
) -> Result<(ProgressState, Salvage), ImportError> {
    let root = parse_root(bytes)?;
    let mut salvage = Salvage::default();

    let mut counts = Counts::new();
    match root.get("counts") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (topic, value) in map {
                match value.as_u64() {
                    Some(count) => counts.set(topic, count),
                    None => salvage.dropped_counts.push(topic.clone()),
                }
            }
        }
        Some(_) => salvage.counts_discarded = true,
    }

    let mut log = Vec::new();
    match root.get("log") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for item in items {
                match log_entry(item) {
                    Ok(entry) => log.push(entry),
                    Err(_) => salvage.dropped_log_entries += 1,
                }
            }
        }
        Some(_) => salvage.log_discarded = true,
    }

    Ok((ProgressState::from_parts(catalog, counts, log), salvage))
}

fn parse_root(bytes: &[u8]) -> Result<Map<String, Value>, ImportError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|_| ImportError::InvalidUtf8)?;
    if text.trim().is_empty() {
        return Err(ImportError::Empty);
    }

    let root: Value =
        serde_json::from_str(text).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
    match root {
        Value::Object(map) => Ok(map),
        _ => Err(ImportError::NotAnObject),
    }
}

fn log_entry(item: &Value) -> Result<LogEntry, String> {
    serde_json::from_value(item.clone()).map_err(|e| e.to_string())
}

/// Pretty JSON (two-space indent, raw UTF-8), optionally BOM-prefixed.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_json(state: &ProgressState, with_bom: bool) -> Result<Vec<u8>, StorageError> {
    let body =
        serde_json::to_vec_pretty(state).map_err(|e| StorageError::Serialization(e.to_string()))?;
    if !with_bom {
        return Ok(body);
    }
    let mut out = Vec::with_capacity(UTF8_BOM.len() + body.len());
    out.extend_from_slice(UTF8_BOM);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Flat `topic,count` export for spreadsheets.
///
/// Catalog topics come first in catalog order, then any other keys in the
/// order they appear in the counts.
#[must_use]
pub fn encode_csv(state: &ProgressState, catalog: &TopicCatalog) -> String {
    let mut out = String::from("topic,count\n");
    let rows = catalog
        .iter()
        .map(|topic| (topic, state.count(topic)))
        .chain(state.counts().unknown_topics(catalog));
    for (topic, count) in rows {
        out.push_str(&csv_field(topic));
        out.push(',');
        out.push_str(&count.to_string());
        out.push('\n');
    }
    out
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_owned()
    }
}
