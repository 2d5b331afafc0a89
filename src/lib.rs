//! Tic-tac-toe with human, random and exhaustive minimax players.

pub mod config;
pub mod core;
pub mod display;
pub mod error;
pub mod game;
pub mod logic;
pub mod player;
pub mod selfplay;


pub use error::{Error, Result};
