//! ゲーム状態管理モジュール
//! 盤面、2人の対局者、手番、終局状態を保持し、1ラウンドの進行を担当する。

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::board::{Board, BoardSnapshot};
use super::rules::TicTacToeRules;
use super::types::{
    GameResult, Player, Position, RoundOutcome, DEFAULT_COMPUTER_NAME, DEFAULT_PLAYER_NAME,
};
use crate::ai::RandomAI;

const HUMAN: usize = 0;
const COMPUTER: usize = 1;

/// ゲームの進行状態を表すenum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// ゲーム進行中
    InProgress,
    /// ゲーム終了（勝者または引き分けを記録）
    Finished { result: GameResult },
}

/// 三目並べの対局全体を保持する構造体
/// 対局者は [人間, 自動] の固定順で、手番はそのどちらかを指す
#[derive(Debug)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    active: usize,
    status: GameStatus,
    opponent: RandomAI,
}

impl Game {
    /// 新しい対局を作成する
    /// 名前が省略された場合は "Player" を使う
    pub fn new(player_name: Option<&str>) -> Self {
        Self::with_opponent(
            Player::resolve_name(player_name, DEFAULT_PLAYER_NAME),
            DEFAULT_COMPUTER_NAME,
            RandomAI::new(),
        )
    }

    /// 名前と自動プレイヤーの実装を指定して対局を作成する
    pub fn with_opponent(
        human_name: impl Into<String>,
        computer_name: impl Into<String>,
        opponent: RandomAI,
    ) -> Self {
        Self {
            board: Board::new(),
            players: [Player::human(human_name), Player::computer(computer_name)],
            active: HUMAN,
            status: GameStatus::InProgress,
            opponent,
        }
    }

    /// 人間の着手を1回適用し、続けて自動プレイヤーの応手を1回適用する
    /// 範囲外の座標は呼び出し側のバグなのでpanicする
    pub fn play_round(&mut self, row: usize, col: usize) -> RoundOutcome {
        let Some(position) = Position::new(row, col) else {
            panic!("position ({}, {}) is outside the board", row, col);
        };
        self.play_at(position)
    }

    /// 座標型を受け取る版のplay_round
    pub fn play_at(&mut self, position: Position) -> RoundOutcome {
        if self.is_game_over() {
            return RoundOutcome::InvalidMove;
        }

        let mark = self.active_player().mark();
        if !self.board.mark_cell(position, mark) {
            debug!(row = position.row, col = position.col, "rejected move on occupied cell");
            return RoundOutcome::InvalidMove;
        }
        debug!(?mark, row = position.row, col = position.col, "move applied");

        if let Some(result) = self.check_finished() {
            return RoundOutcome::GameOver(result);
        }

        self.switch_player();

        if self.active == COMPUTER {
            self.computer_move();

            if let Some(result) = self.check_finished() {
                return RoundOutcome::GameOver(result);
            }

            self.switch_player();
        }

        RoundOutcome::Continuing
    }

    /// 盤面、手番、終局状態を初期化する
    /// 対局者は作り直さない
    pub fn reset(&mut self) {
        self.board.reset();
        self.active = HUMAN;
        self.status = GameStatus::InProgress;
        debug!("game reset");
    }

    /// 空マスから1つを選んで自動プレイヤーの記号を付ける
    /// 空マスがなければ何もしない
    fn computer_move(&mut self) {
        let mark = self.active_player().mark();
        if let Some(position) = self.opponent.select_move(&self.board) {
            let marked = self.board.mark_cell(position, mark);
            debug_assert!(marked, "opponent selected an occupied cell");
            debug!(?mark, row = position.row, col = position.col, "computer move applied");
        }
    }

    /// 手番のプレイヤーについて勝利と引き分けを順に判定し、終局なら状態を更新する
    fn check_finished(&mut self) -> Option<GameResult> {
        let player = self.active_player();
        let result = if TicTacToeRules::has_won(&self.board, player.mark()) {
            GameResult::Win(player.clone())
        } else if TicTacToeRules::is_draw(&self.board, player.mark()) {
            GameResult::Draw
        } else {
            return None;
        };

        info!(result = %result.message(), "game finished");
        self.status = GameStatus::Finished {
            result: result.clone(),
        };
        Some(result)
    }

    fn switch_player(&mut self) {
        self.active = 1 - self.active;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn human(&self) -> &Player {
        &self.players[HUMAN]
    }

    pub fn computer(&self) -> &Player {
        &self.players[COMPUTER]
    }

    pub fn active_player(&self) -> &Player {
        &self.players[self.active]
    }

    pub fn active_player_name(&self) -> &str {
        self.active_player().name()
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// ゲームが終了しているかチェックする
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn result(&self) -> Option<&GameResult> {
        match &self.status {
            GameStatus::Finished { result } => Some(result),
            GameStatus::InProgress => None,
        }
    }

    /// 終局時の表示メッセージ（"<name> wins!" / "It's a draw!"）
    pub fn result_message(&self) -> Option<String> {
        self.result().map(GameResult::message)
    }

    /// 手番表示用のメッセージ
    pub fn turn_message(&self) -> String {
        format!("{}'s turn...", self.active_player_name())
    }

    /// 盤面上の手数
    pub fn move_count(&self) -> usize {
        self.board.marked_count()
    }
}
