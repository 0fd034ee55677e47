//! 対局セッション管理モジュール
//! 同時に進行する複数の対局をメモリ上で保持し、
//! セッション数制限、タイムアウト処理、クリーンアップを担当する。

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ai::RandomAI;
use crate::config::Config;
use crate::error::{GameError, Result};
use crate::game::{Game, Player, DEFAULT_COMPUTER_NAME, DEFAULT_PLAYER_NAME};

/// 1つの対局とそのメタ情報
#[derive(Debug)]
pub struct GameSession {
    pub id: Uuid,
    pub game: Game,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl GameSession {
    fn new(game: Game) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            game,
            created_at: now,
            last_activity: now,
        }
    }
}

/// 対局セッションの管理を行うメイン構造体
/// 各対局はDashMapのエントリ単位でロックされる
#[derive(Debug, Clone)]
pub struct GameSessionManager {
    sessions: Arc<DashMap<Uuid, GameSession>>,
    /// 確保済みの枠数。挿入前に予約し、削除時に返却する
    reserved: Arc<AtomicUsize>,
    max_sessions: usize,
    session_timeout: Duration,
    default_player_name: String,
    computer_name: String,
}

impl GameSessionManager {
    /// デフォルトタイムアウト（1時間）でセッションマネージャーを作成
    pub fn new(max_sessions: usize) -> Self {
        Self::with_timeout(max_sessions, Duration::from_secs(3600))
    }

    /// カスタムタイムアウトでセッションマネージャーを作成
    pub fn with_timeout(max_sessions: usize, session_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            reserved: Arc::new(AtomicUsize::new(0)),
            max_sessions,
            session_timeout,
            default_player_name: DEFAULT_PLAYER_NAME.to_string(),
            computer_name: DEFAULT_COMPUTER_NAME.to_string(),
        }
    }

    /// 設定から制限値と対局者名を読み込んで作成
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_player_name: config.game.default_player_name.clone(),
            computer_name: config.game.computer_name.clone(),
            ..Self::with_timeout(config.limits.max_sessions, config.limits.session_timeout)
        }
    }

    /// OS乱数の自動プレイヤーで新しい対局を作成する
    pub fn create_session(&self, player_name: Option<&str>) -> Result<Uuid> {
        self.create_session_with_opponent(player_name, RandomAI::new())
    }

    /// 自動プレイヤーを指定して新しい対局を作成する
    /// 最大セッション数に達している場合はエラーを返す
    pub fn create_session_with_opponent(
        &self,
        player_name: Option<&str>,
        opponent: RandomAI,
    ) -> Result<Uuid> {
        self.reserve_slot()?;

        let human_name = Player::resolve_name(player_name, &self.default_player_name);
        let game = Game::with_opponent(human_name, self.computer_name.as_str(), opponent);
        let session = GameSession::new(game);
        let session_id = session.id;

        info!(%session_id, player = session.game.human().name(), "game session created");
        self.sessions.insert(session_id, session);

        Ok(session_id)
    }

    /// 上限を超えない場合のみ枠を1つ確保する
    fn reserve_slot(&self) -> Result<()> {
        self.reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                (count < self.max_sessions).then_some(count + 1)
            })
            .map(|_| ())
            .map_err(|_| GameError::SessionLimitExceeded { max: self.max_sessions })
    }

    fn release_slots(&self, count: usize) {
        self.reserved.fetch_sub(count, Ordering::AcqRel);
    }

    /// セッションを変更可能な状態で操作する
    /// 最終操作時刻も更新される
    pub fn with_session<T>(
        &self,
        session_id: &Uuid,
        f: impl FnOnce(&mut GameSession) -> T,
    ) -> Result<T> {
        match self.sessions.get_mut(session_id) {
            Some(mut session) => {
                session.last_activity = Utc::now();
                Ok(f(session.value_mut()))
            }
            None => Err(GameError::GameNotFound { game_id: *session_id }),
        }
    }

    /// セッションを読み取り専用で参照する
    pub fn view_session<T>(&self, session_id: &Uuid, f: impl FnOnce(&GameSession) -> T) -> Result<T> {
        match self.sessions.get(session_id) {
            Some(session) => Ok(f(session.value())),
            None => Err(GameError::GameNotFound { game_id: *session_id }),
        }
    }

    pub fn remove_session(&self, session_id: &Uuid) -> Result<GameSession> {
        match self.sessions.remove(session_id) {
            Some((_, session)) => {
                self.release_slots(1);
                info!(%session_id, "game session removed");
                Ok(session)
            }
            None => Err(GameError::GameNotFound { game_id: *session_id }),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_exists(&self, session_id: &Uuid) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// 最終操作からタイムアウト時間を超えたセッションを削除する
    /// 戻り値は削除した件数
    pub fn cleanup_inactive_sessions(&self) -> usize {
        let timeout = chrono::Duration::from_std(self.session_timeout)
            .unwrap_or_else(|_| chrono::Duration::weeks(52 * 100));
        let cutoff_time = Utc::now() - timeout;

        let mut removed_count = 0;
        self.sessions.retain(|_, session| {
            let active = session.last_activity >= cutoff_time;
            if !active {
                removed_count += 1;
            }
            active
        });
        self.release_slots(removed_count);

        if removed_count > 0 {
            info!(removed_count, "inactive game sessions cleaned up");
        } else {
            debug!("no inactive game sessions");
        }

        removed_count
    }
}

impl Default for GameSessionManager {
    fn default() -> Self {
        Self::new(100)
    }
}
