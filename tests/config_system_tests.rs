//! 設定システム統合テスト

use std::{env, fs, time::Duration};
use tempfile::TempDir;

use tictactoe::{
    config::{Config, ConfigError, GameConfig, ServerConfig, SystemLimits},
    session::GameSessionManager,
};

fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            port: 4000,
            host: "127.0.0.1".to_string(),
            enable_cors: false,
            enable_logging: false,
        },
        game: GameConfig {
            default_player_name: "Guest".to_string(),
            computer_name: "Bot".to_string(),
        },
        limits: SystemLimits {
            max_sessions: 5,
            session_timeout: Duration::from_secs(90),
            ..Default::default()
        },
    }
}

#[test]
fn test_config_serialization_deserialization() {
    let config = create_test_config();

    let json_str = serde_json::to_string_pretty(&config).unwrap();
    assert!(json_str.contains("4000"));
    assert!(json_str.contains("127.0.0.1"));
    assert!(json_str.contains("Bot"));

    let deserialized: Config = serde_json::from_str(&json_str).unwrap();
    assert_eq!(deserialized.server.port, 4000);
    assert_eq!(deserialized.game.computer_name, "Bot");
    assert_eq!(deserialized.limits.session_timeout, Duration::from_secs(90));
}

#[test]
fn test_config_file_operations() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("test_config.json");

    let original_config = create_test_config();

    // ファイルに保存
    original_config.save_to_file(&config_path).unwrap();
    assert!(config_path.exists());

    // ファイルから読み込み
    let loaded_config = Config::from_file(&config_path).unwrap();
    assert_eq!(loaded_config.server.port, original_config.server.port);
    assert_eq!(loaded_config.game.default_player_name, "Guest");
    assert_eq!(loaded_config.limits.max_sessions, 5);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // 有効な設定
    assert!(config.validate().is_ok());

    // 無効なポート
    config.server.port = 0;
    assert!(config.validate().is_err());

    // 無効なセッション数
    config.server.port = 3000;
    config.limits.max_sessions = 0;
    assert!(config.validate().is_err());

    // 空の名前
    config.limits.max_sessions = 10;
    config.game.default_player_name = String::new();
    assert!(config.validate().is_err());

    config.game.default_player_name = "Player".to_string();
    config.limits.cleanup_interval = Duration::ZERO;
    assert!(config.validate().is_err());
}

// 環境変数はプロセス全体で共有されるため、1つのテストにまとめる
#[test]
fn test_env_var_config_loading() {
    env::set_var("SERVER_PORT", "5000");
    env::set_var("SERVER_HOST", "192.168.1.100");
    env::set_var("TICTACTOE_PLAYER_NAME", "Alice");
    env::set_var("TICTACTOE_MAX_SESSIONS", "200");
    env::set_var("TICTACTOE_SESSION_TIMEOUT_SECS", "120");

    let config = Config::from_env().unwrap();

    assert_eq!(config.server.port, 5000);
    assert_eq!(config.server.host, "192.168.1.100");
    assert_eq!(config.game.default_player_name, "Alice");
    assert_eq!(config.game.computer_name, "Computer");
    assert_eq!(config.limits.max_sessions, 200);
    assert_eq!(config.limits.session_timeout, Duration::from_secs(120));

    // ファイルの設定を環境変数が上書きする
    let mut file_config = create_test_config();
    file_config.apply_env().unwrap();
    assert_eq!(file_config.server.port, 5000);
    assert_eq!(file_config.game.computer_name, "Bot");

    env::set_var("SERVER_PORT", "invalid_port");
    let result = Config::from_env();
    assert!(matches!(
        result.unwrap_err(),
        ConfigError::EnvVarError { ref name, .. } if name == "SERVER_PORT"
    ));

    env::remove_var("SERVER_PORT");
    env::remove_var("SERVER_HOST");
    env::remove_var("TICTACTOE_PLAYER_NAME");
    env::remove_var("TICTACTOE_MAX_SESSIONS");
    env::remove_var("TICTACTOE_SESSION_TIMEOUT_SECS");
}

#[test]
fn test_config_error_handling() {
    // 存在しないファイルからの読み込み
    let result = Config::from_file("nonexistent_file.json");
    assert!(matches!(result.unwrap_err(), ConfigError::FileReadError(_)));

    // 無効なJSONファイル
    let temp_dir = TempDir::new().unwrap();
    let invalid_json_path = temp_dir.path().join("invalid.json");
    fs::write(&invalid_json_path, "invalid json content").unwrap();

    let result = Config::from_file(&invalid_json_path);
    assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
}

#[test]
fn test_config_search_paths() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");
    let present = temp_dir.path().join("app.json");

    // どれも存在しなければデフォルト
    let config = Config::from_first_existing(&[&missing]).unwrap();
    assert_eq!(config.server.port, 3000);

    // 存在しないパスは飛ばして次を読む
    create_test_config().save_to_file(&present).unwrap();
    let config = Config::from_first_existing(&[&missing, &present]).unwrap();
    assert_eq!(config.server.port, 4000);
}

#[test]
fn test_malformed_config_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("config.json");
    let fallback = temp_dir.path().join("fallback.json");
    fs::write(&broken, r#"{ "server": { "port": 4000, oops"#).unwrap();
    create_test_config().save_to_file(&fallback).unwrap();

    // 壊れたファイルをデフォルト値や後続の候補で置き換えない
    let result = Config::from_first_existing(&[&broken, &fallback]);
    assert!(matches!(result.unwrap_err(), ConfigError::ParseError(_)));
}

#[test]
fn test_session_manager_from_config() {
    let config = create_test_config();
    let manager = GameSessionManager::from_config(&config);

    assert_eq!(manager.max_sessions(), 5);
    for _ in 0..5 {
        manager.create_session(None).unwrap();
    }
    assert!(manager.create_session(None).is_err());
}
