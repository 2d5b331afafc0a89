//! テスト用の局面生成

use super::{Board, Mark};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random positions reachable by legal play, paired with the side to move.
/// Includes won and full boards; play stops as soon as a line is completed.
pub(crate) fn random_positions(seed: u64, count: usize) -> Vec<(Board, Mark)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions = Vec::with_capacity(count);
    while positions.len() < count {
        let mut board = Board::new();
        let mut player = Mark::X;
        let plies = rng.gen_range(0..=9);
        for _ in 0..plies {
            let moves = board.legal_moves();
            let Some(&mv) = moves.choose(&mut rng) else {
                break;
            };
            board.apply_move(mv, player);
            player = player.opponent();
            if board.winner().is_some() {
                break;
            }
        }
        positions.push((board, player));
    }
    positions
}

/// 勝負がついておらず空きマスが残っている局面のみ
pub(crate) fn open_positions(seed: u64, count: usize) -> Vec<(Board, Mark)> {
    let mut positions = Vec::with_capacity(count);
    let mut round = 0;
    while positions.len() < count {
        positions.extend(
            random_positions(seed.wrapping_add(round), count)
                .into_iter()
                .filter(|(b, _)| b.winner().is_none() && b.has_empty_cell() && !b.is_empty_board())
                .take(count - positions.len()),
        );
        round += 1;
    }
    positions
}
