use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::config::ServerConfig;

use super::{
    handlers::{create_game, delete_game, get_game, make_move, reset_game, AppState},
    middleware::{cors, logging},
};

/// 対局APIのルーターを作成する
/// CORSとリクエストログはサーバー設定に従って付与する
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/api/games", post(create_game))
        .route("/api/games/:id", get(get_game).delete(delete_game))
        .route("/api/games/:id/move", put(make_move))
        .route("/api/games/:id/reset", post(reset_game))
        .route("/health", get(health_check))
        .with_state(state);

    if server.enable_cors {
        router = router.layer(middleware::from_fn(cors));
    }

    if server.enable_logging {
        router = router.layer(middleware::from_fn(logging));
    }

    router
}

async fn health_check() -> &'static str {
    "Tic-tac-toe API Server is running"
}
