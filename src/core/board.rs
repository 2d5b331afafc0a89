use super::setup::BoardRepr;
use super::types::{Cell, Mark, CELL_COUNT, SIDE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤面
///
/// The cells are only ever changed through [`Board::apply_move`] and
/// [`Board::revert_move`], so `winner` is set exactly when the last applied
/// move completed a line. Deserialization replays the cells the same way and
/// rejects a stored `winner` that disagrees with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr", into = "BoardRepr")]
pub struct Board {
    cells: [Cell; CELL_COUNT],
    /// 直近の手で揃ったライン
    winner: Option<Mark>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(SIDE)
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// 合法手 (空きマス) を昇順で返す
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_empty())
    }

    pub fn count_empty_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    pub fn is_empty_board(&self) -> bool {
        self.count_empty_cells() == CELL_COUNT
    }

    /// Places `mark` at `index` if that cell is empty and records a winner when
    /// the move completes a line. Returns `false` without touching the board
    /// when the cell is occupied or out of range.
    pub fn apply_move(&mut self, index: usize, mark: Mark) -> bool {
        match self.cells.get(index) {
            Some(Cell::Empty) => {}
            _ => return false,
        }

        self.cells[index] = Cell::Occupied(mark);
        if crate::logic::is_winning_move(self, index, mark) {
            self.winner = Some(mark);
        }
        true
    }

    /// 探索用の巻き戻し。直前に `apply_move` した手に対してのみ呼ぶこと
    pub fn revert_move(&mut self, index: usize) {
        self.cells[index] = Cell::Empty;
        self.winner = None;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            write!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}
