use crate::config::GameConfig;
use crate::core::Mark;
use crate::error::Error;
use crate::player::ai::{MinimaxAI, RandomAI};
use crate::player::{HumanPlayer, PlayerController};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 指し手の選び方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Random,
    Optimal,
}

impl PlayerKind {
    pub fn label(self) -> &'static str {
        match self {
            PlayerKind::Human => "Human",
            PlayerKind::Random => "Random AI",
            PlayerKind::Optimal => "Minimax AI",
        }
    }

    /// `seed` only affects the computer players.
    pub fn build(
        self,
        mark: Mark,
        config: &GameConfig,
        seed: Option<u64>,
    ) -> Box<dyn PlayerController> {
        let name = format!("{} ({})", self.label(), mark);
        match self {
            PlayerKind::Human => Box::new(HumanPlayer::stdin(mark, &name)),
            PlayerKind::Random => {
                let ai = RandomAI::new(mark, &name);
                Box::new(match seed {
                    Some(seed) => ai.with_seed(seed),
                    None => ai,
                })
            }
            PlayerKind::Optimal => {
                let ai = MinimaxAI::new(mark, &name).with_opening_shortcut(config.opening_shortcut);
                Box::new(match seed {
                    Some(seed) => ai.with_seed(seed),
                    None => ai,
                })
            }
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            PlayerKind::Human => "human",
            PlayerKind::Random => "random",
            PlayerKind::Optimal => "optimal",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PlayerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" => Ok(PlayerKind::Human),
            "random" => Ok(PlayerKind::Random),
            "optimal" | "minimax" => Ok(PlayerKind::Optimal),
            _ => Err(Error::UnknownPlayerKind {
                input: s.to_string(),
                expected: "human, random, optimal".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Board;

    #[test]
    fn parses_names_and_alias() {
        assert_eq!("human".parse::<PlayerKind>().unwrap(), PlayerKind::Human);
        assert_eq!("Random".parse::<PlayerKind>().unwrap(), PlayerKind::Random);
        assert_eq!("minimax".parse::<PlayerKind>().unwrap(), PlayerKind::Optimal);
        assert!(matches!(
            "alphabeta".parse::<PlayerKind>(),
            Err(Error::UnknownPlayerKind { .. })
        ));
    }

    #[test]
    fn display_parses_back() {
        for kind in [PlayerKind::Human, PlayerKind::Random, PlayerKind::Optimal] {
            assert_eq!(kind.to_string().parse::<PlayerKind>().unwrap(), kind);
        }
    }

    #[test]
    fn builds_bound_to_mark() {
        let config = GameConfig::default();
        let random = PlayerKind::Random.build(Mark::O, &config, Some(1));
        assert_eq!(random.mark(), Mark::O);
        assert_eq!(random.name(), "Random AI (O)");

        let optimal = PlayerKind::Optimal.build(Mark::X, &config, None);
        assert_eq!(optimal.mark(), Mark::X);
        let board: Board = "OO XX    ".parse().unwrap();
        assert_eq!(optimal.choose_move(&board), Some(5));
    }
}
