use crate::core::{Board, Cell, Mark, CELL_COUNT, SIDE};
use crossterm::style::{StyledContent, Stylize};
use std::io::{self, Write};

/// 盤面をプレーンテキストで整形する (`| X | O |   |`)
pub fn format_board(board: &Board) -> String {
    board
        .rows()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
            format!("| {} |", cells.join(" | "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// マス番号の凡例
pub fn format_board_nums() -> String {
    (0..CELL_COUNT)
        .collect::<Vec<_>>()
        .chunks(SIDE)
        .map(|row| {
            let nums: Vec<String> = row.iter().map(|i| i.to_string()).collect();
            format!("| {} |", nums.join(" | "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn styled_cell(cell: Cell, highlighted: bool) -> StyledContent<String> {
    let text = cell.to_string();
    let styled = match cell.mark() {
        Some(Mark::X) => text.red(),
        Some(Mark::O) => text.cyan(),
        None => text.stylize(),
    };
    if highlighted {
        styled.bold().underlined()
    } else {
        styled
    }
}

/// 色付きで盤面を描画する。`last_move` のマスは強調表示
pub fn render_board<W: Write>(out: &mut W, board: &Board, last_move: Option<usize>) -> io::Result<()> {
    for (r, row) in board.rows().enumerate() {
        write!(out, "|")?;
        for (c, &cell) in row.iter().enumerate() {
            let index = r * SIDE + c;
            write!(out, " {} |", styled_cell(cell, last_move == Some(index)))?;
        }
        writeln!(out)?;
    }
    out.flush()
}

pub fn render_board_nums<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", format_board_nums().dark_grey())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rows_with_separators() {
        let board: Board = "XO  X   O".parse().unwrap();
        assert_eq!(
            format_board(&board),
            "| X | O |   |\n|   | X |   |\n|   |   | O |"
        );
    }

    #[test]
    fn legend_lists_indices() {
        assert_eq!(
            format_board_nums(),
            "| 0 | 1 | 2 |\n| 3 | 4 | 5 |\n| 6 | 7 | 8 |"
        );
    }

    #[test]
    fn render_writes_every_row() {
        let board: Board = "XO       ".parse().unwrap();
        let mut out = Vec::new();
        render_board(&mut out, &board, Some(1)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains('X'));
        assert!(text.contains('O'));
    }
}
