//! 対局APIのハンドラー
//! 表示層が必要とする盤面スナップショット、手番、結果をJSONで返す。

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    error::GameError,
    game::{BoardSnapshot, GameResult, GameStatus, Position, RoundOutcome},
    session::{GameSession, GameSessionManager},
};

#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub id: Uuid,
    /// null: 空マス, "X" / "O": マーク済み
    pub board: BoardSnapshot,
    pub human: String,
    pub computer: String,
    pub active_player: String,
    pub turn_message: String,
    pub game_over: bool,
    /// "in_progress" | "won" | "draw"
    pub status: String,
    pub winner: Option<String>,
    pub message: Option<String>,
    pub move_count: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse {
    pub success: bool,
    /// "invalid_move" | "continuing" | "game_over"
    pub outcome: String,
    pub game_state: GameResponse,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateGameRequest {
    #[serde(default)]
    pub player_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MakeMoveRequest {
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub sessions: Arc<GameSessionManager>,
}

impl AppState {
    pub fn new(sessions: Arc<GameSessionManager>) -> Self {
        Self { sessions }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(GameSessionManager::default()))
    }
}

type ApiResult<T> = std::result::Result<T, (StatusCode, Json<ErrorResponse>)>;

/// GameErrorをHTTPステータスとエラー本文に変換する
fn error_response(err: GameError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, error) = match &err {
        GameError::InvalidPosition { .. } => (StatusCode::BAD_REQUEST, "Invalid position"),
        GameError::GameNotFound { .. } => (StatusCode::NOT_FOUND, "Game not found"),
        GameError::SessionLimitExceeded { .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, "Session limit exceeded")
        }
    };

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            details: Some(err.to_string()),
        }),
    )
}

/// リクエスト本文のJSON拒否をエラー本文の形に揃える
/// ステータスはaxumの判定（構文エラー400、型不一致422など）をそのまま使う
fn rejection_response(rejection: JsonRejection) -> (StatusCode, Json<ErrorResponse>) {
    (
        rejection.status(),
        Json(ErrorResponse {
            error: "Invalid request body".to_string(),
            details: Some(rejection.body_text()),
        }),
    )
}

impl GameResponse {
    pub fn from_session(session: &GameSession) -> Self {
        let game = &session.game;

        let status = match game.status() {
            GameStatus::InProgress => "in_progress",
            GameStatus::Finished {
                result: GameResult::Win(_),
            } => "won",
            GameStatus::Finished {
                result: GameResult::Draw,
            } => "draw",
        };

        Self {
            id: session.id,
            board: game.board_snapshot(),
            human: game.human().name().to_string(),
            computer: game.computer().name().to_string(),
            active_player: game.active_player_name().to_string(),
            turn_message: game.turn_message(),
            game_over: game.is_game_over(),
            status: status.to_string(),
            winner: game
                .result()
                .and_then(GameResult::winner)
                .map(|player| player.name().to_string()),
            message: game.result_message(),
            move_count: game.move_count(),
            created_at: session.created_at,
        }
    }
}

impl MoveResponse {
    pub fn new(outcome: &RoundOutcome, session: &GameSession) -> Self {
        let message = match outcome {
            RoundOutcome::InvalidMove if session.game.is_game_over() => {
                Some("Game is already finished".to_string())
            }
            RoundOutcome::InvalidMove => Some("Cell is already marked".to_string()),
            RoundOutcome::Continuing => None,
            RoundOutcome::GameOver(result) => Some(result.message()),
        };

        Self {
            success: outcome.is_valid(),
            outcome: outcome.as_str().to_string(),
            game_state: GameResponse::from_session(session),
            message,
        }
    }
}

pub async fn create_game(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateGameRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<GameResponse>)> {
    let Json(payload) = payload.map_err(rejection_response)?;
    let sessions = &state.sessions;
    let game_id = sessions
        .create_session(payload.player_name.as_deref())
        .map_err(error_response)?;

    let response = sessions
        .view_session(&game_id, GameResponse::from_session)
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> ApiResult<Json<GameResponse>> {
    state
        .sessions
        .view_session(&game_id, GameResponse::from_session)
        .map(Json)
        .map_err(error_response)
}

pub async fn make_move(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    payload: std::result::Result<Json<MakeMoveRequest>, JsonRejection>,
) -> ApiResult<Json<MoveResponse>> {
    let Json(payload) = payload.map_err(rejection_response)?;
    let position = Position::new(payload.row, payload.col)
        .ok_or(GameError::InvalidPosition {
            row: payload.row,
            col: payload.col,
        })
        .map_err(error_response)?;

    state
        .sessions
        .with_session(&game_id, |session| {
            let outcome = session.game.play_at(position);
            MoveResponse::new(&outcome, session)
        })
        .map(Json)
        .map_err(error_response)
}

pub async fn reset_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> ApiResult<Json<GameResponse>> {
    state
        .sessions
        .with_session(&game_id, |session| {
            session.game.reset();
            GameResponse::from_session(session)
        })
        .map(Json)
        .map_err(error_response)
}

pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .sessions
        .remove_session(&game_id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}
