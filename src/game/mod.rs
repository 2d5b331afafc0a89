use crate::config::GameConfig;
use crate::core::{Board, Mark};
use crate::display::{render_board, render_board_nums};
use crate::error::Result;
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{info, warn};

/// 同じプレイヤーの不正な手を連続で受け付ける上限
pub const MAX_REJECTED_MOVES: usize = 10;

/// 対局結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Mark),
    Draw,
    /// The player with this mark stopped producing moves.
    Abandoned(Mark),
}

impl GameOutcome {
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameOutcome::Win(mark) => Some(mark),
            GameOutcome::Draw => None,
            GameOutcome::Abandoned(mark) => Some(mark.opponent()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub outcome: GameOutcome,
    /// 確定した手数
    pub moves: usize,
}

pub struct Game {
    pub board: Board,
    pub current: Mark,
    pub print_game: bool,
    pub move_delay: Duration,
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Game {
            board: Board::new(),
            current: Mark::X,
            print_game: config.print_game,
            move_delay: config.move_delay(),
        }
    }

    /// Runs turns until a line is completed or the board fills up. X moves
    /// first. A move the board rejects is logged and the same player is asked
    /// again, up to [`MAX_REJECTED_MOVES`] times in a row; after that the
    /// player is treated as having abandoned the game.
    pub fn play(&mut self, x: &dyn PlayerController, o: &dyn PlayerController) -> Result<GameRecord> {
        let mut out = io::stdout();
        let mut moves = 0;
        let mut rejected = 0;

        if self.print_game {
            render_board_nums(&mut out)?;
        }

        while self.board.has_empty_cell() {
            let controller = match self.current {
                Mark::X => x,
                Mark::O => o,
            };

            let square = match controller.choose_move(&self.board) {
                Some(square) if rejected < MAX_REJECTED_MOVES => square,
                _ => {
                    info!(player = controller.name(), rejected, "player stopped playing");
                    if self.print_game {
                        writeln!(out, "{} gives up. {} wins!", self.current, self.current.opponent())?;
                    }
                    return Ok(GameRecord {
                        outcome: GameOutcome::Abandoned(self.current),
                        moves,
                    });
                }
            };

            if !self.board.apply_move(square, self.current) {
                rejected += 1;
                warn!(player = controller.name(), square, rejected, "illegal move rejected");
                continue;
            }
            rejected = 0;
            moves += 1;

            if self.print_game {
                writeln!(out, "{} makes a move to square {}", self.current, square)?;
                render_board(&mut out, &self.board, Some(square))?;
                writeln!(out)?;
            }

            if let Some(winner) = self.board.winner() {
                info!(%winner, moves, "game won");
                if self.print_game {
                    writeln!(out, "{} wins!", winner)?;
                }
                return Ok(GameRecord {
                    outcome: GameOutcome::Win(winner),
                    moves,
                });
            }

            self.current = self.current.opponent();

            // 人間が読めるように少し待つ
            if !self.move_delay.is_zero() {
                std::thread::sleep(self.move_delay);
            }
        }

        info!(moves, "game drawn");
        if self.print_game {
            writeln!(out, "It's a tie.")?;
        }
        Ok(GameRecord {
            outcome: GameOutcome::Draw,
            moves,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
