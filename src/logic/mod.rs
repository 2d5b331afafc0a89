use crate::core::{row_col, Board, Cell, Mark, SIDE};

/// 全ライン (行・列・対角線)
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

const MAIN_DIAGONAL: [usize; 3] = [0, 4, 8];
const ANTI_DIAGONAL: [usize; 3] = [2, 4, 6];

/// `index` に `mark` を置いた直後、その手でラインが揃ったか判定
///
/// Only the lines through `index` are inspected: its row, its column, and
/// the two diagonals when `index` is even. Every diagonal cell (the corners
/// and the centre) has an even index, so odd edge cells skip them.
pub fn is_winning_move(board: &Board, index: usize, mark: Mark) -> bool {
    let (row, col) = row_col(index);

    let row_cells = [row * SIDE, row * SIDE + 1, row * SIDE + 2];
    if all_marked(board, &row_cells, mark) {
        return true;
    }

    let col_cells = [col, col + SIDE, col + 2 * SIDE];
    if all_marked(board, &col_cells, mark) {
        return true;
    }

    if index % 2 == 0 {
        if all_marked(board, &MAIN_DIAGONAL, mark) {
            return true;
        }
        if all_marked(board, &ANTI_DIAGONAL, mark) {
            return true;
        }
    }

    false
}

/// 盤面全体を走査してラインがあるか判定 (検証用)
pub fn has_line(board: &Board, mark: Mark) -> bool {
    WINNING_LINES
        .iter()
        .any(|line| all_marked(board, line, mark))
}

/// 引き分け: 空きマスがなく勝者もいない
pub fn is_draw(board: &Board) -> bool {
    !board.has_empty_cell() && board.winner().is_none()
}

fn all_marked(board: &Board, line: &[usize], mark: Mark) -> bool {
    line.iter()
        .all(|&i| board.cell(i) == Some(Cell::Occupied(mark)))
}
