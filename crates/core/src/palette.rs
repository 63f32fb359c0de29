use crate::model::TopicCatalog;

/// Bar colours, assigned by catalog position and repeated when the catalog is
/// longer than the palette.
pub const DEFAULT_PALETTE: [&str; 24] = [
    "#2563EB", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#06B6D4", "#84CC16", "#EC4899",
    "#F97316", "#22C55E", "#0EA5E9", "#A855F7", "#D946EF", "#F43F5E", "#14B8A6", "#EAB308",
    "#6366F1", "#059669", "#EA580C", "#0891B2", "#7C3AED", "#65A30D", "#DB2777", "#3B82F6",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: &'static [&'static str],
}

impl Palette {
    /// Builds a palette over `colors`; an empty slice falls back to the default.
    #[must_use]
    pub fn new(colors: &'static [&'static str]) -> Self {
        if colors.is_empty() {
            return Self::default();
        }
        Self { colors }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Colour for the topic at catalog position `index`.
    #[must_use]
    pub fn color_at(&self, index: usize) -> &'static str {
        self.colors[index % self.colors.len()]
    }

    /// Colour for `topic`, or `None` if it is not in `catalog`.
    #[must_use]
    pub fn color_for(&self, catalog: &TopicCatalog, topic: &str) -> Option<&'static str> {
        catalog.position(topic).map(|index| self.color_at(index))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: &DEFAULT_PALETTE,
        }
    }
}
