//! 三目並べのルール実装モジュール
//! 勝利ライン判定と引き分け判定を担当する。

use super::board::Board;
use super::types::{Mark, Position};

const fn pos(row: usize, col: usize) -> Position {
    Position { row, col }
}

/// 揃えば勝利となる8本のライン
/// 行3本、列3本、対角線2本
pub const WINNING_LINES: [[Position; 3]; 8] = [
    [pos(0, 0), pos(0, 1), pos(0, 2)],
    [pos(1, 0), pos(1, 1), pos(1, 2)],
    [pos(2, 0), pos(2, 1), pos(2, 2)],
    [pos(0, 0), pos(1, 0), pos(2, 0)],
    [pos(0, 1), pos(1, 1), pos(2, 1)],
    [pos(0, 2), pos(1, 2), pos(2, 2)],
    [pos(0, 0), pos(1, 1), pos(2, 2)],
    [pos(0, 2), pos(1, 1), pos(2, 0)],
];

/// 三目並べのルールを実装する構造体
/// スタティックメソッドのみを提供する
pub struct TicTacToeRules;

impl TicTacToeRules {
    /// 指定した記号で揃っている最初のラインを返す
    pub fn winning_line(board: &Board, mark: Mark) -> Option<[Position; 3]> {
        let cell = mark.to_cell();
        WINNING_LINES
            .iter()
            .find(|line| line.iter().all(|&position| board.get_cell(position) == cell))
            .copied()
    }

    /// 指定した記号がいずれかのラインを揃えているか
    pub fn has_won(board: &Board, mark: Mark) -> bool {
        Self::winning_line(board, mark).is_some()
    }

    /// 直前に着手した記号が勝っておらず、全マスが埋まっていれば引き分け
    pub fn is_draw(board: &Board, last_mark: Mark) -> bool {
        board.is_full() && !Self::has_won(board, last_mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: [&str; 3]) -> Board {
        let mut board = Board::new();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let mark = match ch {
                    'X' => Mark::X,
                    'O' => Mark::O,
                    _ => continue,
                };
                board.mark_cell(Position::new(row, col).unwrap(), mark);
            }
        }
        board
    }

    #[test]
    fn test_every_line_wins_for_both_marks() {
        for mark in [Mark::X, Mark::O] {
            for line in WINNING_LINES {
                let mut board = Board::new();
                for position in line {
                    board.mark_cell(position, mark);
                }

                assert!(TicTacToeRules::has_won(&board, mark), "{:?} on {:?}", mark, line);
                assert!(!TicTacToeRules::has_won(&board, mark.opposite()));
                assert_eq!(TicTacToeRules::winning_line(&board, mark), Some(line));
            }
        }
    }

    #[test]
    fn test_no_win_on_empty_board() {
        let board = Board::new();
        assert!(!TicTacToeRules::has_won(&board, Mark::X));
        assert!(!TicTacToeRules::has_won(&board, Mark::O));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_from(["XXO", "...", "..."]);
        assert!(!TicTacToeRules::has_won(&board, Mark::X));
        assert!(!TicTacToeRules::has_won(&board, Mark::O));
    }

    #[test]
    fn test_draw_on_full_board_without_line() {
        let board = board_from(["XOX", "XOO", "OXX"]);
        assert!(TicTacToeRules::is_draw(&board, Mark::X));
        assert!(TicTacToeRules::is_draw(&board, Mark::O));
    }

    #[test]
    fn test_full_board_with_line_is_not_draw() {
        let board = board_from(["XXX", "OOX", "XOO"]);
        assert!(TicTacToeRules::has_won(&board, Mark::X));
        assert!(!TicTacToeRules::is_draw(&board, Mark::X));
    }

    #[test]
    fn test_partial_board_is_not_draw() {
        let board = board_from(["XOX", "XOO", "OX."]);
        assert!(!TicTacToeRules::is_draw(&board, Mark::X));
    }
}
