use crate::core::{Board, Mark, CELL_COUNT};
use crate::player::PlayerController;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cell::RefCell;
use tracing::debug;

/// 探索結果
///
/// `score` is signed from the maximizing player's point of view. Its
/// magnitude is the number of empty cells left when the game ended plus one,
/// so quicker wins and slower losses score further from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub position: Option<usize>,
    pub score: i32,
}

/// 全幅ミニマックス探索
///
/// The board is used as scratch space: every move is applied, searched and
/// reverted before the next one, so the caller gets back exactly the board it
/// passed in.
pub struct Minimax {
    max_player: Mark,
    nodes: usize,
}

impl Minimax {
    pub fn new(max_player: Mark) -> Self {
        Self {
            max_player,
            nodes: 0,
        }
    }

    /// 探索したノード数
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Searches the full game tree below `board` with `player` to move.
    ///
    /// The board must not be full unless it already has a winner.
    pub fn search(&mut self, board: &mut Board, player: Mark) -> SearchResult {
        self.nodes += 1;
        let min_player = player.opponent();

        // 直前に指した側 (= min_player) が勝っていれば終端
        if board.winner() == Some(min_player) {
            let magnitude = board.count_empty_cells() as i32 + 1;
            let score = if min_player == self.max_player {
                magnitude
            } else {
                -magnitude
            };
            return SearchResult {
                position: None,
                score,
            };
        } else if !board.has_empty_cell() {
            return SearchResult {
                position: None,
                score: 0,
            };
        }

        let maximizing = player == self.max_player;
        let mut best = SearchResult {
            position: None,
            score: if maximizing { i32::MIN } else { i32::MAX },
        };

        for index in board.legal_moves() {
            let applied = board.apply_move(index, player);
            debug_assert!(applied, "legal move {} rejected", index);

            let mut child = self.search(board, min_player);
            board.revert_move(index);
            child.position = Some(index);

            // 同点なら先に見つけた (小さい) インデックスを優先
            let improves = if maximizing {
                child.score > best.score
            } else {
                child.score < best.score
            };
            if improves {
                best = child;
            }
        }

        best
    }
}

/// `player` to move, scored for `max_player`.
pub fn minimax(board: &mut Board, player: Mark, max_player: Mark) -> SearchResult {
    Minimax::new(max_player).search(board, player)
}

pub struct MinimaxAI {
    mark: Mark,
    name: String,
    opening_shortcut: bool,
    rng: RefCell<StdRng>,
}

impl MinimaxAI {
    pub fn new(mark: Mark, name: &str) -> Self {
        Self {
            mark,
            name: name.to_string(),
            opening_shortcut: true,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RefCell::new(StdRng::seed_from_u64(seed));
        self
    }

    /// 空の盤面で探索せずにランダムに打つかどうか
    pub fn with_opening_shortcut(mut self, enabled: bool) -> Self {
        self.opening_shortcut = enabled;
        self
    }
}

impl PlayerController for MinimaxAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn mark(&self) -> Mark {
        self.mark
    }

    fn choose_move(&self, board: &Board) -> Option<usize> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            return None;
        }

        // 初手はどこに打っても理論値は同じ
        if self.opening_shortcut && moves.len() == CELL_COUNT {
            let mv = moves.choose(&mut *self.rng.borrow_mut()).copied();
            debug!(player = %self.name, ?mv, "opening move without search");
            return mv;
        }

        let mut scratch = board.clone();
        let mut search = Minimax::new(self.mark);
        let result = search.search(&mut scratch, self.mark);
        debug_assert_eq!(&scratch, board);

        debug!(
            player = %self.name,
            position = ?result.position,
            score = result.score,
            nodes = search.nodes(),
            "minimax search finished"
        );
        result.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::open_positions;
    use crate::player::ai::RandomAI;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn takes_immediate_win() {
        let mut b = board("XX OO    ");
        let result = minimax(&mut b, Mark::X, Mark::X);
        assert_eq!(
            result,
            SearchResult {
                position: Some(2),
                score: 5
            }
        );
    }

    #[test]
    fn prefers_win_over_block() {
        // O は 2 で受けられるが 5 で即勝ち
        let mut b = board("XX OO    ");
        let result = minimax(&mut b, Mark::O, Mark::O);
        assert_eq!(result.position, Some(5));
        assert_eq!(result.score, 5);
    }

    #[test]
    fn blocks_opponent_line() {
        let mut b = board("XX  O    ");
        let result = minimax(&mut b, Mark::O, Mark::O);
        assert_eq!(result.position, Some(2));
        assert!(result.score >= 0);
    }

    #[test]
    fn forced_loss_is_negative() {
        // X は 2 と 6 の二か所で王手をかけている
        let mut b = board("XX XO   O");
        let result = minimax(&mut b, Mark::O, Mark::O);
        assert_eq!(result.score, -3);
        assert!(result.position.is_some());
    }

    #[test]
    fn terminal_nodes_return_no_position() {
        let mut won = board("XXXOO    ");
        assert_eq!(
            minimax(&mut won, Mark::O, Mark::X),
            SearchResult {
                position: None,
                score: 5
            }
        );
        assert_eq!(
            minimax(&mut won, Mark::O, Mark::O),
            SearchResult {
                position: None,
                score: -5
            }
        );

        let mut drawn = board("XOXXOOOXX");
        assert_eq!(
            minimax(&mut drawn, Mark::O, Mark::X),
            SearchResult {
                position: None,
                score: 0
            }
        );
    }

    #[test]
    fn search_leaves_board_untouched() {
        for (b, player) in open_positions(11, 40) {
            let mut scratch = b.clone();
            minimax(&mut scratch, player, player);
            assert_eq!(scratch, b);
        }
    }

    #[test]
    fn search_returns_legal_position() {
        for (b, player) in open_positions(5, 40) {
            let mut scratch = b.clone();
            let result = minimax(&mut scratch, player, player);
            let position = result.position.expect("non-terminal board has a move");
            assert!(b.legal_moves().contains(&position));
        }
    }

    #[test]
    fn score_is_symmetric_between_players() {
        for (b, player) in open_positions(23, 30) {
            let mut scratch = b.clone();
            let mine = minimax(&mut scratch, player, player).score;
            let theirs = minimax(&mut scratch, player, player.opponent()).score;
            assert_eq!(mine, -theirs, "board:\n{}", b);
        }
    }

    #[test]
    fn empty_board_search_is_deterministic_draw() {
        let mut b = Board::new();
        let mut search = Minimax::new(Mark::X);
        let result = search.search(&mut b, Mark::X);
        assert_eq!(
            result,
            SearchResult {
                position: Some(0),
                score: 0
            }
        );
        assert_eq!(b, Board::new());
        assert!(search.nodes() > 500_000);
    }

    #[test]
    fn opening_shortcut_skips_search() {
        let ai = MinimaxAI::new(Mark::X, "Minimax AI").with_seed(1);
        for _ in 0..20 {
            let mv = ai.choose_move(&Board::new()).unwrap();
            assert!(mv < CELL_COUNT);
        }
    }

    #[test]
    fn choose_move_does_not_mutate_board() {
        let b = board("X   O    ");
        let ai = MinimaxAI::new(Mark::X, "Minimax AI");
        let mv = ai.choose_move(&b).unwrap();
        assert!(b.legal_moves().contains(&mv));
        assert_eq!(b, board("X   O    "));
    }

    #[test]
    fn optimal_self_play_is_a_draw() {
        let x = MinimaxAI::new(Mark::X, "X").with_opening_shortcut(false);
        let o = MinimaxAI::new(Mark::O, "O");
        let mut b = Board::new();
        let mut player = Mark::X;
        while b.has_empty_cell() && b.winner().is_none() {
            let controller: &dyn PlayerController = if player == Mark::X { &x } else { &o };
            let mv = controller.choose_move(&b).unwrap();
            assert!(b.apply_move(mv, player));
            player = player.opponent();
        }
        assert_eq!(b.winner(), None);
    }

    #[test]
    fn never_loses_against_random() {
        for seed in 0..30 {
            for optimal_mark in [Mark::X, Mark::O] {
                let optimal = MinimaxAI::new(optimal_mark, "Minimax AI").with_seed(seed);
                let random = RandomAI::new(optimal_mark.opponent(), "Random AI").with_seed(seed);
                let mut b = Board::new();
                let mut player = Mark::X;
                while b.has_empty_cell() && b.winner().is_none() {
                    let mv = if player == optimal_mark {
                        optimal.choose_move(&b)
                    } else {
                        random.choose_move(&b)
                    }
                    .unwrap();
                    assert!(b.apply_move(mv, player));
                    player = player.opponent();
                }
                assert_ne!(
                    b.winner(),
                    Some(optimal_mark.opponent()),
                    "seed {} optimal {}:\n{}",
                    seed,
                    optimal_mark,
                    b
                );
            }
        }
    }
}
