//! ゲームの基本型定義モジュール
//! 三目並べで使用されるマーク、セル、座標、プレイヤー、対局結果を定義する。

use serde::{Deserialize, Serialize};

/// 盤面の一辺のマス数
pub const BOARD_SIZE: usize = 3;

/// 人間プレイヤーの名前が省略された場合の表示名
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// 自動プレイヤーの表示名
pub const DEFAULT_COMPUTER_NAME: &str = "Computer";

/// セルに記録される記号
/// 人間は常にX、自動プレイヤーは常にO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// 相手の記号を返す
    pub fn opposite(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// 記号を対応するセル状態に変換する
    pub fn to_cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

/// 盤面の各マスの状態を表現するenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    /// マークされていればその記号を返す
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// 3x3盤面上の座標を表す構造体
/// row, colともに0-2の範囲で有効
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// 範囲チェック付きのコンストラクタ
    /// 3x3盤面の範囲外の座標の場合はNoneを返す
    pub fn new(row: usize, col: usize) -> Option<Position> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// 座標が有効範囲内かチェックする
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// 盤面の全座標を行優先順で返す
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position { row, col }))
    }
}

/// 対局者を表す構造体
/// 表示名と記号は対局中に変化しない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    mark: Mark,
}

impl Player {
    /// 先手（X）の人間プレイヤーを作成する
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mark: Mark::X,
        }
    }

    /// 後手（O）の自動プレイヤーを作成する
    pub fn computer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mark: Mark::O,
        }
    }

    /// 入力された名前を整形し、空なら代替名を使う
    pub fn resolve_name(requested: Option<&str>, fallback: &str) -> String {
        requested
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }
}

/// 終局時の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win(Player),
    Draw,
}

impl GameResult {
    /// 勝者がいれば返す
    pub fn winner(&self) -> Option<&Player> {
        match self {
            GameResult::Win(player) => Some(player),
            GameResult::Draw => None,
        }
    }

    /// 表示用の結果メッセージ
    pub fn message(&self) -> String {
        match self {
            GameResult::Win(player) => format!("{} wins!", player.name()),
            GameResult::Draw => "It's a draw!".to_string(),
        }
    }
}

/// 1ラウンド（play_round呼び出し1回）の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// 埋まったマスへの着手、または終局後の着手
    InvalidMove,
    /// 人間と自動プレイヤーの手が適用され、対局は続行中
    Continuing,
    GameOver(GameResult),
}

impl RoundOutcome {
    /// API応答で使うスネークケースの名前
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundOutcome::InvalidMove => "invalid_move",
            RoundOutcome::Continuing => "continuing",
            RoundOutcome::GameOver(_) => "game_over",
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, RoundOutcome::InvalidMove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_opposite() {
        assert_eq!(Mark::X.opposite(), Mark::O);
        assert_eq!(Mark::O.opposite(), Mark::X);
    }

    #[test]
    fn test_mark_to_cell() {
        assert_eq!(Mark::X.to_cell(), Cell::X);
        assert_eq!(Mark::O.to_cell(), Cell::O);
        assert_eq!(Cell::X.mark(), Some(Mark::X));
        assert_eq!(Cell::Empty.mark(), None);
    }

    #[test]
    fn test_position_new_valid() {
        let pos = Position::new(2, 1);
        assert_eq!(pos, Some(Position { row: 2, col: 1 }));
    }

    #[test]
    fn test_position_new_invalid() {
        assert!(Position::new(3, 0).is_none());
        assert!(Position::new(0, 3).is_none());
        assert!(Position::new(10, 10).is_none());
    }

    #[test]
    fn test_position_all() {
        let all: Vec<Position> = Position::all().collect();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], Position { row: 0, col: 0 });
        assert_eq!(all[5], Position { row: 1, col: 2 });
        assert!(all.iter().all(Position::is_valid));
    }

    #[test]
    fn test_player_marks_are_fixed() {
        assert_eq!(Player::human("Alice").mark(), Mark::X);
        assert_eq!(Player::computer("Computer").mark(), Mark::O);
    }

    #[test]
    fn test_resolve_name() {
        assert_eq!(Player::resolve_name(Some("  Alice "), DEFAULT_PLAYER_NAME), "Alice");
        assert_eq!(Player::resolve_name(Some("   "), DEFAULT_PLAYER_NAME), "Player");
        assert_eq!(Player::resolve_name(None, DEFAULT_PLAYER_NAME), "Player");
    }

    #[test]
    fn test_result_message() {
        let win = GameResult::Win(Player::human("Alice"));
        assert_eq!(win.message(), "Alice wins!");
        assert_eq!(win.winner().map(Player::name), Some("Alice"));
        assert_eq!(GameResult::Draw.message(), "It's a draw!");
        assert!(GameResult::Draw.winner().is_none());
    }

    #[test]
    fn test_round_outcome_names() {
        assert_eq!(RoundOutcome::InvalidMove.as_str(), "invalid_move");
        assert_eq!(RoundOutcome::Continuing.as_str(), "continuing");
        assert_eq!(RoundOutcome::GameOver(GameResult::Draw).as_str(), "game_over");
        assert!(!RoundOutcome::InvalidMove.is_valid());
    }
}
