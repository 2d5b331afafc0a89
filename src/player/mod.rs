pub mod ai;
pub mod controller;
pub mod human;
pub mod kind;

pub use ai::{MinimaxAI, RandomAI};
pub use controller::PlayerController;
pub use human::{parse_move, HumanPlayer};
pub use kind::PlayerKind;
