pub mod board;
#[cfg(test)]
pub(crate) mod testing;
pub mod setup;
pub mod types;

pub use board::Board;
pub use setup::{board_from_cells, board_from_str};
pub use types::{row_col, Cell, Mark, CELL_COUNT, SIDE};
