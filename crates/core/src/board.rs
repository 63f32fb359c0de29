//! Render data for the progress board.
//!
//! Everything here is a pure function of the current `ProgressState`.

use crate::labels::ShortLabels;
use crate::model::{ProgressState, TopicCatalog};
use crate::palette::Palette;

/// Height of a topic's bar as a percentage of the tallest bar.
///
/// Zero counts render empty. Non-zero counts never drop below
/// `min_nonzero_pct`, so small values stay visible next to a large maximum.
/// The scale uses the largest count across every key (at least 1).
#[must_use]
pub fn bar_height_pct(state: &ProgressState, topic: &str, min_nonzero_pct: f64) -> f64 {
    let count = state.count(topic);
    if count == 0 {
        return 0.0;
    }
    let max = state.counts().max().max(1);
    #[allow(clippy::cast_precision_loss)]
    let pct = count as f64 / max as f64 * 100.0;
    pct.max(min_nonzero_pct).min(100.0)
}

/// Sum of every count, including imported topics outside the catalog.
#[must_use]
pub fn total_rounds(state: &ProgressState) -> u64 {
    state.total_rounds()
}

/// One bar on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumn {
    pub topic: String,
    pub short_label: String,
    pub color: &'static str,
    pub count: u64,
    pub height_pct: f64,
}

/// Bars for every catalog topic in catalog order, plus the overall total.
///
/// Imported topics outside the catalog contribute to `total` and to the bar
/// scale but get no column.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBoard {
    pub columns: Vec<BoardColumn>,
    pub total: u64,
}

impl ProgressBoard {
    #[must_use]
    pub fn build(
        state: &ProgressState,
        catalog: &TopicCatalog,
        labels: &ShortLabels,
        palette: &Palette,
        min_nonzero_pct: f64,
    ) -> Self {
        let columns = catalog
            .iter()
            .enumerate()
            .map(|(index, topic)| BoardColumn {
                topic: topic.to_owned(),
                short_label: labels.get(topic).unwrap_or(topic).to_owned(),
                color: palette.color_at(index),
                count: state.count(topic),
                height_pct: bar_height_pct(state, topic, min_nonzero_pct),
            })
            .collect();

        Self {
            columns,
            total: total_rounds(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Counts;
    use crate::time::fixed_today;

    fn state_with(catalog: &TopicCatalog, pairs: &[(&str, u64)]) -> ProgressState {
        let counts: Counts = pairs.iter().map(|(k, v)| (*k, *v)).collect();
        ProgressState::from_parts(catalog, counts, Vec::new())
    }

    #[test]
    fn zero_count_is_exactly_zero() {
        let catalog = TopicCatalog::default();
        let state = ProgressState::empty(&catalog);
        for topic in catalog.iter() {
            assert!(bar_height_pct(&state, topic, 15.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn small_counts_get_the_floor() {
        let catalog = TopicCatalog::new(["a", "b"]).unwrap();
        let state = state_with(&catalog, &[("a", 1), ("b", 100)]);

        assert!((bar_height_pct(&state, "a", 15.0) - 15.0).abs() < 1e-9);
        assert!((bar_height_pct(&state, "b", 15.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn heights_scale_linearly_and_stay_in_range() {
        let catalog = TopicCatalog::new(["a", "b", "c"]).unwrap();
        let state = state_with(&catalog, &[("a", 3), ("b", 6), ("c", 5)]);

        assert!((bar_height_pct(&state, "a", 15.0) - 50.0).abs() < 1e-9);
        for topic in catalog.iter() {
            let h = bar_height_pct(&state, topic, 15.0);
            assert!((15.0..=100.0).contains(&h), "{topic}: {h}");
        }
    }

    #[test]
    fn unknown_topics_count_towards_total_and_scale_only() {
        let catalog = TopicCatalog::new(["a", "b"]).unwrap();
        let state = state_with(&catalog, &[("a", 2), ("legacy", 8)]);
        let board = ProgressBoard::build(
            &state,
            &catalog,
            &ShortLabels::build(&catalog),
            &Palette::default(),
            15.0,
        );

        assert_eq!(board.columns.len(), 2);
        assert_eq!(board.total, 10);
        assert!((board.columns[0].height_pct - 25.0).abs() < 1e-9);
    }

    #[test]
    fn board_follows_catalog_order_with_labels_and_colors() {
        let catalog = TopicCatalog::default();
        let mut state = ProgressState::empty(&catalog);
        state
            .add_rounds(&catalog, "ネットワーク", 2, fixed_today())
            .unwrap();

        let board = ProgressBoard::build(
            &state,
            &catalog,
            &ShortLabels::build(&catalog),
            &Palette::default(),
            15.0,
        );

        assert_eq!(board.columns.len(), catalog.len());
        let network = &board.columns[9];
        assert_eq!(network.topic, "ネットワーク");
        assert_eq!(network.short_label, "ネット");
        assert_eq!(network.color, "#22C55E");
        assert_eq!(network.count, 2);
        assert!((network.height_pct - 100.0).abs() < 1e-9);
        assert_eq!(board.total, 2);
    }
}
