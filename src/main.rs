//! 三目並べAPIサーバーのエントリポイント
//! 設定読み込み、セッション管理の初期化、HTTPサーバー起動を行う。

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tictactoe::{
    api::{handlers::AppState, routes::create_router},
    config::Config,
    session::GameSessionManager,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tictactoe", about = "Tic-tac-toe against a random computer player")]
struct Cli {
    /// 設定ファイルのパス（省略時は既定の場所を探す）
    #[arg(long)]
    config: Option<PathBuf>,

    /// デフォルト設定を config.json に書き出して終了する
    #[arg(long)]
    generate_config: bool,
}

/// メイン関数 - サーバーの初期化と起動を担当
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.generate_config {
        match Config::default().save_to_file("config.json") {
            Ok(()) => info!("デフォルト設定を config.json に書き出しました"),
            Err(e) => {
                error!("設定ファイル書き出し失敗: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // 設定ファイルと環境変数から統合設定を読み込み
    let loaded = match &cli.config {
        Some(path) => Config::from_file(path).and_then(|mut config| {
            config.apply_env()?;
            Ok(config)
        }),
        None => Config::load(),
    };
    let config = match loaded.and_then(|config| config.validate().map(|()| config)) {
        Ok(config) => config,
        Err(e) => {
            error!("設定エラー: {}", e);
            eprintln!("デフォルト設定を生成: cargo run -- --generate-config");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.server.host,
        port = config.server.port,
        max_sessions = config.limits.max_sessions,
        computer = %config.game.computer_name,
        "設定読み込み完了"
    );

    let sessions = Arc::new(GameSessionManager::from_config(&config));

    // 期限切れ対局の定期クリーンアップ
    let cleanup_sessions = Arc::clone(&sessions);
    let cleanup_interval = config.limits.cleanup_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            cleanup_sessions.cleanup_inactive_sessions();
        }
    });

    let app = create_router(AppState::new(sessions), &config.server);

    let bind_address = config.bind_address();
    let listener = match TcpListener::bind(&bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("アドレスバインド失敗 {}: {}", bind_address, e);
            std::process::exit(1);
        }
    };

    info!("三目並べAPIサーバー開始: {} (Ctrl+C で停止)", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        warn!("サーバー停止: {}", e);
        std::process::exit(1);
    }
}
