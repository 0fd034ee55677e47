//! 自動プレイヤーが使う乱数インデックスの供給源
//! 本番ではOS由来のシードを持つ乱数生成器、テストでは固定列を差し込む。

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `0..upper` の範囲で一様なインデックスを返す供給源
pub trait IndexSource: Send + Sync {
    /// `upper` は常に1以上で呼ばれる
    fn next_index(&mut self, upper: usize) -> usize;
}

/// `StdRng` による一様乱数インデックス
#[derive(Debug, Clone)]
pub struct RngIndexSource {
    rng: StdRng,
}

impl RngIndexSource {
    /// OSのエントロピーでシードした供給源を作成する
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// 再現可能なシード付きの供給源を作成する
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RngIndexSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSource for RngIndexSource {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.random_range(0..upper)
    }
}

/// 決められたインデックス列を順に返す供給源
/// 範囲外の値は `upper` で剰余を取り、列が尽きたら0を返す
#[derive(Debug, Clone, Default)]
pub struct FixedIndexSource {
    indices: VecDeque<usize>,
}

impl FixedIndexSource {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    /// 常に最初の空マスを選ぶ供給源
    pub fn first() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> usize {
        self.indices.len()
    }
}

impl IndexSource for FixedIndexSource {
    fn next_index(&mut self, upper: usize) -> usize {
        self.indices.pop_front().unwrap_or(0) % upper
    }
}
