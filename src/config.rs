//! アプリケーション設定管理モジュール
//! サーバー、対局者名、セッション制限などの設定を
//! 設定ファイルと環境変数から読み込んで管理する。

use serde::{Deserialize, Serialize};
use std::{env, fs, io, path::Path, time::Duration};

use crate::game::{DEFAULT_COMPUTER_NAME, DEFAULT_PLAYER_NAME};

/// Duration型をJSONでシリアライズするためのモジュール
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    /// Durationを(secs, nanos)のタプルとしてシリアライズ
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_secs(), duration.subsec_nanos()).serialize(serializer)
    }

    /// (secs, nanos)のタプルからDurationをデシリアライズ
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (secs, nanos) = <(u64, u32)>::deserialize(deserializer)?;
        Ok(Duration::new(secs, nanos))
    }
}

/// サーバーの設定を管理する構造体
/// ポート番号、ホスト名、CORS設定などを含む
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub enable_cors: bool,
    pub enable_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
            enable_cors: true,
            enable_logging: true,
        }
    }
}

/// 対局者の表示名設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// 名前入力が省略された場合の人間プレイヤー名
    pub default_player_name: String,
    pub computer_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_player_name: DEFAULT_PLAYER_NAME.to_string(),
            computer_name: DEFAULT_COMPUTER_NAME.to_string(),
        }
    }
}

/// システムの制限値を定義する構造体
/// 同時対局数とセッションのタイムアウトを管理
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemLimits {
    /// 同時に保持できる対局数の上限
    pub max_sessions: usize,
    /// 最終操作からこの時間が経過した対局は破棄される
    #[serde(with = "duration_serde")]
    pub session_timeout: Duration,
    /// 期限切れ対局の掃除間隔
    #[serde(with = "duration_serde")]
    pub cleanup_interval: Duration,
}

impl Default for SystemLimits {
    fn default() -> Self {
        Self {
            max_sessions: 100,
            session_timeout: Duration::from_secs(3600), // 1時間
            cleanup_interval: Duration::from_secs(300),
        }
    }
}

/// アプリケーションの全設定を統合するメイン設定構造体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
    pub limits: SystemLimits,
}

/// 設定関連のエラーを表すenum
/// ファイル読み込み、パース、検証エラーなどを含む
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("設定ファイル読み込みエラー: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("設定ファイル解析エラー: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("環境変数エラー: {name} = {value}")]
    EnvVarError { name: String, value: String },

    #[error("設定値が無効です: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

/// 設定ファイルを探す既定の場所（先頭から優先）
pub const CONFIG_PATHS: [&str; 3] = ["config.json", "config/app.json", "/etc/tictactoe/config.json"];

/// 環境変数を読み、存在すればパースする
fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarError {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

impl Config {
    /// 指定したファイルパスから設定を読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 環境変数で既存の設定を上書きする
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(host) = parse_env::<String>("SERVER_HOST")? {
            self.server.host = host;
        }

        if let Some(port) = parse_env("SERVER_PORT")? {
            self.server.port = port;
        }

        if let Some(name) = parse_env::<String>("TICTACTOE_PLAYER_NAME")? {
            self.game.default_player_name = name;
        }

        if let Some(name) = parse_env::<String>("TICTACTOE_COMPUTER_NAME")? {
            self.game.computer_name = name;
        }

        if let Some(max_sessions) = parse_env("TICTACTOE_MAX_SESSIONS")? {
            self.limits.max_sessions = max_sessions;
        }

        if let Some(secs) = parse_env("TICTACTOE_SESSION_TIMEOUT_SECS")? {
            self.limits.session_timeout = Duration::from_secs(secs);
        }

        Ok(())
    }

    /// 環境変数から設定を読み込む
    /// デフォルト値をベースに環境変数で上書きする
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// 候補パスを順に探し、最初に存在するファイルを読み込む
    /// どれも存在しなければデフォルト値。存在するファイルの読み込み失敗はエラー
    pub fn from_first_existing<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ConfigError> {
        for path in paths {
            match Self::from_file(path) {
                Ok(config) => return Ok(config),
                Err(ConfigError::FileReadError(e)) if e.kind() == io::ErrorKind::NotFound => {
                    continue
                }
                Err(e) => return Err(e),
            }
        }
        Ok(Config::default())
    }

    /// 設定ファイルと環境変数を結合して設定を読み込む
    /// 設定ファイルがなくてもデフォルト値で動作する
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_first_existing(&CONFIG_PATHS)?;
        config.apply_env()?;
        Ok(config)
    }

    /// 現在の設定を指定したファイルに保存する
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 設定値の妥当性をチェックする
    /// 不正な値がある場合はConfigErrorを返す
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                value: self.server.port.to_string(),
            });
        }

        if self.game.default_player_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "game.default_player_name".to_string(),
                value: self.game.default_player_name.clone(),
            });
        }

        if self.game.computer_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "game.computer_name".to_string(),
                value: self.game.computer_name.clone(),
            });
        }

        if self.limits.max_sessions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "limits.max_sessions".to_string(),
                value: self.limits.max_sessions.to_string(),
            });
        }

        if self.limits.session_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "limits.session_timeout".to_string(),
                value: format!("{:?}", self.limits.session_timeout),
            });
        }

        if self.limits.cleanup_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "limits.cleanup_interval".to_string(),
                value: format!("{:?}", self.limits.cleanup_interval),
            });
        }

        Ok(())
    }

    /// バインドするアドレス文字列
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
