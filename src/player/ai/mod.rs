pub mod minimax;
pub mod random;

pub use minimax::{minimax, Minimax, MinimaxAI, SearchResult};
pub use random::RandomAI;
