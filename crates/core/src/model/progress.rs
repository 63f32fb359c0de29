use std::fmt;

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::model::catalog::TopicCatalog;
use crate::model::settings::ResetPolicy;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("unknown topic: {0}")]
    UnknownTopic(String),
}

//
// ─── LOG ENTRY ─────────────────────────────────────────────────────────────────
//

/// One recorded change to a topic's round count.
///
/// `delta` is the amount the user asked for, not the effective change after
/// clamping at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub date: NaiveDate,
    pub topic: String,
    pub delta: i64,
}

impl LogEntry {
    #[must_use]
    pub fn new(date: NaiveDate, topic: impl Into<String>, delta: i64) -> Self {
        Self {
            date,
            topic: topic.into(),
            delta,
        }
    }
}

//
// ─── COUNTS ────────────────────────────────────────────────────────────────────
//

/// Round counter per topic, kept in insertion order.
///
/// Fresh states list catalog topics in catalog order; imported files keep the
/// order they were written in. Keys outside the catalog are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    entries: Vec<(String, u64)>,
}

impl Counts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, topic: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(key, _)| key == topic)
            .map(|(_, value)| *value)
    }

    /// Sets `topic` to `value`, appending the key if it is new.
    pub fn set(&mut self, topic: &str, value: u64) {
        match self.entries.iter_mut().find(|(key, _)| key == topic) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((topic.to_owned(), value)),
        }
    }

    /// Inserts `topic` with a zero count unless already present.
    ///
    /// Returns `true` when a key was added.
    pub fn ensure(&mut self, topic: &str) -> bool {
        if self.get(topic).is_some() {
            return false;
        }
        self.entries.push((topic.to_owned(), 0));
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every count, including keys outside the catalog.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, (_, value)| acc.saturating_add(*value))
    }

    /// Largest count across every key, or 0 when empty.
    #[must_use]
    pub fn max(&self) -> u64 {
        self.entries.iter().map(|(_, value)| *value).max().unwrap_or(0)
    }

    /// Keys present in the counts but absent from `catalog`.
    pub fn unknown_topics<'a>(
        &'a self,
        catalog: &'a TopicCatalog,
    ) -> impl Iterator<Item = (&'a str, u64)> + 'a {
        self.iter().filter(move |(key, _)| !catalog.contains(key))
    }

    fn zero_all(&mut self) {
        for entry in &mut self.entries {
            entry.1 = 0;
        }
    }
}

impl Serialize for Counts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Counts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = Counts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of topic names to non-negative round counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Counts, A::Error> {
                let mut counts = Counts::new();
                while let Some((key, value)) = access.next_entry::<String, u64>()? {
                    counts.set(&key, value);
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (key, value) in iter {
            let key: String = key.into();
            counts.set(&key, value);
        }
        counts
    }
}

//
// ─── PROGRESS STATE ────────────────────────────────────────────────────────────
//

/// Result of a round update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// `delta` was zero; nothing changed and nothing should be persisted.
    Unchanged,
    /// The count was updated and a log entry appended.
    Applied { count: u64 },
}

/// Full tracker state: per-topic counts plus the append-only change log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(default)]
    counts: Counts,
    #[serde(default)]
    log: Vec<LogEntry>,
}

impl ProgressState {
    /// A zeroed state with one entry per catalog topic and an empty log.
    #[must_use]
    pub fn empty(catalog: &TopicCatalog) -> Self {
        Self {
            counts: catalog.iter().map(|topic| (topic, 0)).collect(),
            log: Vec::new(),
        }
    }

    /// Builds a state from already-parsed parts, back-filling catalog topics.
    #[must_use]
    pub fn from_parts(catalog: &TopicCatalog, counts: Counts, log: Vec<LogEntry>) -> Self {
        let mut state = Self { counts, log };
        state.backfill(catalog);
        state
    }

    /// Adds a zero count for every catalog topic missing from `counts`.
    ///
    /// Returns `true` if any key was added.
    pub fn backfill(&mut self, catalog: &TopicCatalog) -> bool {
        let mut changed = false;
        for topic in catalog.iter() {
            changed |= self.counts.ensure(topic);
        }
        changed
    }

    /// Applies `delta` rounds to `topic`, clamping the count at zero.
    ///
    /// A zero `delta` leaves the state untouched. Otherwise the requested
    /// delta (not the clamped one) is appended to the log.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownTopic` if `topic` is not in `catalog`.
    pub fn add_rounds(
        &mut self,
        catalog: &TopicCatalog,
        topic: &str,
        delta: i64,
        date: NaiveDate,
    ) -> Result<AddOutcome, ProgressError> {
        if !catalog.contains(topic) {
            return Err(ProgressError::UnknownTopic(topic.to_owned()));
        }
        if delta == 0 {
            return Ok(AddOutcome::Unchanged);
        }

        let current = self.counts.get(topic).unwrap_or(0);
        let next = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta.unsigned_abs())
        };
        self.counts.set(topic, next);
        self.log.push(LogEntry::new(date, topic, delta));

        Ok(AddOutcome::Applied { count: next })
    }

    /// Zeroes every count; clears the log only under `ResetPolicy::ClearLog`.
    pub fn reset(&mut self, policy: ResetPolicy) {
        self.counts.zero_all();
        if policy == ResetPolicy::ClearLog {
            self.log.clear();
        }
    }

    #[must_use]
    pub fn count(&self, topic: &str) -> u64 {
        self.counts.get(topic).unwrap_or(0)
    }

    #[must_use]
    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    #[must_use]
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Sum of all counts, including topics outside the catalog.
    #[must_use]
    pub fn total_rounds(&self) -> u64 {
        self.counts.total()
    }
}
