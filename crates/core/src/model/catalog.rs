use std::collections::HashSet;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("topic catalog cannot be empty")]
    Empty,

    #[error("topic name cannot be empty")]
    EmptyName,

    #[error("duplicate topic in catalog: {0}")]
    Duplicate(String),
}

//
// ─── DEFAULT TOPICS ────────────────────────────────────────────────────────────
//

/// Exam topics tracked by default, in display order.
pub const DEFAULT_TOPICS: [&str; 23] = [
    "基礎理論",
    "アルゴリズムとプログラミング",
    "コンピュータ構成要素",
    "システム構成要素",
    "ソフトウェア",
    "ハードウェア",
    "ユーザインタフェース",
    "情報メディア",
    "データベース",
    "ネットワーク",
    "セキュリティ",
    "システム開発技術",
    "ソフトウェア開発管理技術",
    "プロジェクトマネジメント",
    "サービスマネジメント",
    "システム監査",
    "システム戦略",
    "システム企画",
    "経営戦略マネジメント",
    "技術戦略マネジメント",
    "ビジネスインダストリ",
    "企業活動",
    "法務",
];

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Ordered, fixed set of topics the tracker counts rounds for.
///
/// Position in the catalog drives colour and short-label assignment, so the
/// order is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCatalog {
    topics: Vec<String>,
}

impl TopicCatalog {
    /// Builds a catalog from an ordered list of topic names.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the list is empty, a name is blank, or a name
    /// appears twice.
    pub fn new<I, S>(topics: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let topics: Vec<String> = topics.into_iter().map(Into::into).collect();
        if topics.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(topics.len());
        for topic in &topics {
            if topic.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if !seen.insert(topic.as_str()) {
                return Err(CatalogError::Duplicate(topic.clone()));
            }
        }

        Ok(Self { topics })
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    #[must_use]
    pub fn contains(&self, topic: &str) -> bool {
        self.position(topic).is_some()
    }

    /// Zero-based position of `topic` in the catalog.
    #[must_use]
    pub fn position(&self, topic: &str) -> Option<usize> {
        self.topics.iter().position(|t| t == topic)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(String::as_str)
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self {
            topics: DEFAULT_TOPICS.iter().map(|t| (*t).to_owned()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_all_exam_topics_in_order() {
        let catalog = TopicCatalog::default();
        assert_eq!(catalog.len(), 23);
        assert_eq!(catalog.topics()[0], "基礎理論");
        assert_eq!(catalog.position("ネットワーク"), Some(9));
        assert_eq!(catalog.topics()[22], "法務");
    }

    #[test]
    fn rejects_duplicates_and_blank_names() {
        assert_eq!(
            TopicCatalog::new(["a", "b", "a"]),
            Err(CatalogError::Duplicate("a".into()))
        );
        assert_eq!(TopicCatalog::new(["a", " "]), Err(CatalogError::EmptyName));
        assert_eq!(
            TopicCatalog::new(Vec::<String>::new()),
            Err(CatalogError::Empty)
        );
    }

    #[test]
    fn unknown_topics_are_not_contained() {
        let catalog = TopicCatalog::default();
        assert!(catalog.contains("法務"));
        assert!(!catalog.contains("料理"));
        assert_eq!(catalog.position("料理"), None);
    }
}
