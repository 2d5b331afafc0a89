use crate::core::{Board, Mark};

/// プレイヤー操作のtrait
pub trait PlayerController {
    /// Picks a legal cell index for the current board, or `None` when the
    /// player gives up (e.g. its input stream closed).
    fn choose_move(&self, board: &Board) -> Option<usize>;
    fn name(&self) -> &str;
    fn mark(&self) -> Mark;
}
