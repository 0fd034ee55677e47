//! 自動プレイヤーの手選択モジュール
//! 空マスの中から一様ランダムに1つを選ぶ。探索は行わない。

use std::fmt;

use crate::game::{Board, Position};

use super::index_source::{IndexSource, RngIndexSource};

/// ランダムに手を選択するAI実装
/// 乱数の供給源は差し替え可能
pub struct RandomAI {
    source: Box<dyn IndexSource>,
}

impl RandomAI {
    /// OS乱数を使うRandomAIを作成する
    pub fn new() -> Self {
        Self::with_source(RngIndexSource::new())
    }

    /// 任意のインデックス供給源でRandomAIを作成する
    pub fn with_source(source: impl IndexSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// 空マスの中から1つを選ぶ
    /// 空マスがなければNoneを返す
    pub fn select_move(&mut self, board: &Board) -> Option<Position> {
        let empty = board.empty_positions();
        if empty.is_empty() {
            return None;
        }

        let index = self.source.next_index(empty.len()) % empty.len();
        Some(empty[index])
    }
}

impl Default for RandomAI {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RandomAI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomAI").finish_non_exhaustive()
    }
}
