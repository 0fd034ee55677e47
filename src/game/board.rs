//! 三目並べの盤面状態を管理するモジュール
//! 3x3グリッドのセル状態と、唯一の変更操作であるマーク処理を担当する。

use super::types::{Cell, Mark, Position, BOARD_SIZE};
use serde::{Deserialize, Serialize};

/// 表示層へ渡す盤面のスナップショット（Noneは空マス）
pub type BoardSnapshot = [[Option<Mark>; BOARD_SIZE]; BOARD_SIZE];

/// 3x3盤面を表現する構造体
/// プレイヤーや手番、ルールについては何も知らない
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// 全マスが空の盤面を作成する
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// 指定した位置のセル状態を取得する
    /// 範囲外の座標は呼び出し側のバグなのでpanicする
    pub fn get_cell(&self, position: Position) -> Cell {
        assert!(
            position.is_valid(),
            "position ({}, {}) is outside the board",
            position.row,
            position.col
        );
        self.cells[position.row][position.col]
    }

    /// 空マスにのみマークを付ける
    /// 既にマークされている場合はfalseを返し、盤面は変更しない
    pub fn mark_cell(&mut self, position: Position, mark: Mark) -> bool {
        if !self.get_cell(position).is_empty() {
            return false;
        }

        self.cells[position.row][position.col] = mark.to_cell();
        true
    }

    /// 全マスを空に戻す
    pub fn reset(&mut self) {
        for row in self.cells.iter_mut() {
            row.fill(Cell::Empty);
        }
    }

    /// 指定した位置が空かチェックする
    pub fn is_empty(&self, position: Position) -> bool {
        self.get_cell(position).is_empty()
    }

    /// 空マスの座標を行優先順で返す
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_empty(pos)).collect()
    }

    /// 全マスが埋まっているかチェックする
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// 盤面上のXとOの数を数える
    /// 戻り値: (X数, O数)
    pub fn count_marks(&self) -> (u8, u8) {
        let mut x_count = 0;
        let mut o_count = 0;

        for &cell in self.cells.iter().flatten() {
            match cell {
                Cell::X => x_count += 1,
                Cell::O => o_count += 1,
                Cell::Empty => {}
            }
        }

        (x_count, o_count)
    }

    /// マーク済みのマス数
    pub fn marked_count(&self) -> usize {
        let (x_count, o_count) = self.count_marks();
        (x_count + o_count) as usize
    }

    /// 行優先の3x3スナップショットを返す
    pub fn snapshot(&self) -> BoardSnapshot {
        self.cells.map(|row| row.map(Cell::mark))
    }
}
