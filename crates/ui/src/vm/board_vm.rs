use rounds_core::board::{BoardColumn, ProgressBoard};

#[derive(Clone, Debug, PartialEq)]
pub struct BoardColumnVm {
    pub topic: String,
    pub short_label: String,
    pub count: u64,
    pub bar_style: String,
}

impl From<&BoardColumn> for BoardColumnVm {
    fn from(column: &BoardColumn) -> Self {
        Self {
            topic: column.topic.clone(),
            short_label: column.short_label.clone(),
            count: column.count,
            bar_style: bar_style(column.height_pct, column.color),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoardVm {
    pub columns: Vec<BoardColumnVm>,
    pub total: u64,
}

#[must_use]
pub fn map_board(board: &ProgressBoard) -> BoardVm {
    BoardVm {
        columns: board.columns.iter().map(BoardColumnVm::from).collect(),
        total: board.total,
    }
}

fn bar_style(height_pct: f64, color: &str) -> String {
    format!("height: {height_pct:.1}%; background: {color};")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(topic: &str, count: u64, height_pct: f64) -> BoardColumn {
        BoardColumn {
            topic: topic.to_string(),
            short_label: topic.chars().take(3).collect(),
            color: "#22C55E",
            count,
            height_pct,
        }
    }

    #[test]
    fn bar_style_carries_height_and_color() {
        let vm = BoardColumnVm::from(&column("ネットワーク", 2, 100.0));

        assert_eq!(vm.short_label, "ネット");
        assert_eq!(vm.bar_style, "height: 100.0%; background: #22C55E;");
    }

    #[test]
    fn map_board_keeps_order_and_total() {
        let board = ProgressBoard {
            columns: vec![column("b", 0, 0.0), column("a", 4, 15.0)],
            total: 7,
        };

        let vm = map_board(&board);

        let topics: Vec<&str> = vm.columns.iter().map(|c| c.topic.as_str()).collect();
        assert_eq!(topics, vec!["b", "a"]);
        assert_eq!(vm.total, 7);
        assert_eq!(vm.columns[1].bar_style, "height: 15.0%; background: #22C55E;");
    }
}
