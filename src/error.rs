//! アプリケーション全体のエラー定義モジュール
//! 着手の不正はエラーではなくRoundOutcomeで返すため、
//! ここではAPI境界とセッション管理で発生するエラーのみを扱う。

use thiserror::Error;
use uuid::Uuid;

/// ゲームのセッション操作に関連するエラー
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid position: ({row}, {col}) is outside the 3x3 board")]
    InvalidPosition { row: usize, col: usize },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: Uuid },

    #[error("Session limit exceeded: at most {max} games")]
    SessionLimitExceeded { max: usize },
}

/// ゲームエラーをベースとした結果型
pub type Result<T> = std::result::Result<T, GameError>;
