//! Short, unique display tags for topics.
//!
//! Full topic names are too long to sit under a narrow bar, so each topic gets
//! a 2–4 character prefix. Assignment runs once per catalog, in catalog order,
//! so earlier topics win the shorter prefixes.

use std::collections::{HashMap, HashSet};

use crate::model::TopicCatalog;

/// Prefix lengths tried for each topic, in order.
const CANDIDATE_LENGTHS: [usize; 3] = [3, 4, 2];
/// Prefix length used as the base for numbered fallbacks.
const FALLBACK_BASE_LEN: usize = 3;
/// First suffix used when every candidate collides.
const FIRST_SUFFIX: u32 = 2;

/// Topic → short label table for one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLabels {
    labels: HashMap<String, String>,
}

impl ShortLabels {
    #[must_use]
    pub fn build(catalog: &TopicCatalog) -> Self {
        let mut labels = HashMap::with_capacity(catalog.len());
        let mut used: HashSet<String> = HashSet::with_capacity(catalog.len());

        for topic in catalog.iter() {
            let label = pick_label(topic, &used);
            used.insert(label.clone());
            labels.insert(topic.to_owned(), label);
        }

        Self { labels }
    }

    /// Short label for `topic`, if it belongs to the catalog.
    #[must_use]
    pub fn get(&self, topic: &str) -> Option<&str> {
        self.labels.get(topic).map(String::as_str)
    }
}

fn pick_label(topic: &str, used: &HashSet<String>) -> String {
    for len in CANDIDATE_LENGTHS {
        let candidate = char_prefix(topic, len);
        if !candidate.is_empty() && !used.contains(candidate) {
            return candidate.to_owned();
        }
    }

    let base = char_prefix(topic, FALLBACK_BASE_LEN);
    let mut suffix = FIRST_SUFFIX;
    loop {
        let candidate = format!("{base}{suffix}");
        if !used.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// The first `n` characters of `s` (the whole string if shorter).
fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
