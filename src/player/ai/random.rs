use crate::core::{Board, Mark};
use crate::player::PlayerController;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cell::RefCell;

pub struct RandomAI {
    mark: Mark,
    name: String,
    rng: RefCell<StdRng>,
}

impl RandomAI {
    pub fn new(mark: Mark, name: &str) -> Self {
        Self {
            mark,
            name: name.to_string(),
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = RefCell::new(StdRng::seed_from_u64(seed));
        self
    }
}

impl PlayerController for RandomAI {
    fn name(&self) -> &str {
        &self.name
    }

    fn mark(&self) -> Mark {
        self.mark
    }

    fn choose_move(&self, board: &Board) -> Option<usize> {
        let moves = board.legal_moves();
        moves.choose(&mut *self.rng.borrow_mut()).copied()
    }
}
