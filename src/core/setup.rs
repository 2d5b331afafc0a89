use super::board::Board;
use super::types::{Cell, Mark, CELL_COUNT};
use crate::error::{Error, Result};
use crate::logic::has_line;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// マス目の並びから盤面を組み立てる
///
/// Marks are replayed through `apply_move` in index order. A layout where
/// both marks own a line can't come from a game and is rejected.
pub fn board_from_cells(cells: [Cell; CELL_COUNT]) -> Result<Board> {
    let mut board = Board::new();
    for (index, cell) in cells.into_iter().enumerate() {
        if let Cell::Occupied(mark) = cell {
            board.apply_move(index, mark);
        }
    }

    if has_line(&board, Mark::X) && has_line(&board, Mark::O) {
        return Err(Error::InconsistentBoard {
            reason: "both X and O have a completed line".to_string(),
        });
    }
    Ok(board)
}

/// `Board` のシリアライズ形式
#[derive(Serialize, Deserialize)]
pub(crate) struct BoardRepr {
    cells: [Cell; CELL_COUNT],
    winner: Option<Mark>,
}

impl From<Board> for BoardRepr {
    fn from(board: Board) -> Self {
        BoardRepr {
            cells: *board.cells(),
            winner: board.winner(),
        }
    }
}

impl TryFrom<BoardRepr> for Board {
    type Error = Error;

    fn try_from(repr: BoardRepr) -> Result<Self> {
        let board = board_from_cells(repr.cells)?;
        if board.winner() != repr.winner {
            return Err(Error::InconsistentBoard {
                reason: format!(
                    "stored winner {:?} but the cells give {:?}",
                    repr.winner,
                    board.winner()
                ),
            });
        }
        Ok(board)
    }
}

/// 文字列から盤面を初期化する
///
/// Accepts exactly nine significant characters: `X`/`x`, `O`/`o`, and
/// ` `, `.`, `-`, `_` for empty cells. Newlines and `|` separators are
/// skipped so the output of `Board`'s `Display` parses back. Marks are
/// placed with [`board_from_cells`].
pub fn board_from_str(setup: &str) -> Result<Board> {
    let mut cells = Vec::with_capacity(CELL_COUNT);

    for (position, character) in setup
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '|'))
        .enumerate()
    {
        let cell = match character {
            'X' | 'x' => Cell::Occupied(Mark::X),
            'O' | 'o' => Cell::Occupied(Mark::O),
            ' ' | '.' | '-' | '_' => Cell::Empty,
            _ => {
                return Err(Error::InvalidCellCharacter {
                    character,
                    position,
                    context: setup.to_string(),
                })
            }
        };
        cells.push(cell);
    }

    let got = cells.len();
    let cells: [Cell; CELL_COUNT] = cells.try_into().map_err(|_| Error::InvalidBoardLength {
        expected: CELL_COUNT,
        got,
        context: setup.to_string(),
    })?;
    board_from_cells(cells)
}

impl FromStr for Board {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        board_from_str(s)
    }
}
