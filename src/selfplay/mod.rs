use crate::config::GameConfig;
use crate::core::Mark;
use crate::error::{Error, Result};
use crate::game::{Game, GameOutcome};
use crate::player::PlayerKind;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

pub struct SelfPlayConfig {
    pub num_games: usize,
    pub x: PlayerKind,
    pub o: PlayerKind,
    pub opening_shortcut: bool,
    /// Base seed; game `n` seeds its players from `seed + n`.
    pub seed: Option<u64>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            x: PlayerKind::Optimal,
            o: PlayerKind::Random,
            opening_shortcut: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub outcome: GameOutcome,
    pub winner: Option<Mark>,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub total_games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub x_player: String,
    pub o_player: String,
    pub games: Vec<GameResult>,
}

impl SelfPlayStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_result(&mut self, result: GameResult) {
        if let Some(mark) = result.winner {
            *self.wins_mut(mark) += 1;
        } else {
            self.draws += 1;
        }

        // 平均は逐次更新する
        self.total_games += 1;
        let n = self.total_games as f64;
        self.avg_moves += (result.moves as f64 - self.avg_moves) / n;
        self.avg_time_ms += (result.time_ms as f64 - self.avg_time_ms) / n;
        self.games.push(result);
    }

    pub fn wins(&self, mark: Mark) -> usize {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    fn wins_mut(&mut self, mark: Mark) -> &mut usize {
        match mark {
            Mark::X => &mut self.x_wins,
            Mark::O => &mut self.o_wins,
        }
    }
}

/// 複数局を並列に対局させて集計する
pub fn run_selfplay(config: &SelfPlayConfig) -> Result<SelfPlayStats> {
    if config.x == PlayerKind::Human || config.o == PlayerKind::Human {
        return Err(Error::InvalidConfiguration {
            message: "self-play needs computer players on both sides".to_string(),
        });
    }

    let game_config = GameConfig {
        move_delay_ms: 0,
        opening_shortcut: config.opening_shortcut,
        print_game: false,
    };

    let results = (0..config.num_games)
        .into_par_iter()
        .map(|game_num| play_one(config, &game_config, game_num))
        .collect::<Result<Vec<_>>>()?;

    let mut stats = SelfPlayStats::new();
    stats.x_player = config.x.label().to_string();
    stats.o_player = config.o.label().to_string();
    for result in results {
        stats.add_result(result);
    }

    info!(
        games = stats.total_games,
        x_wins = stats.x_wins,
        o_wins = stats.o_wins,
        draws = stats.draws,
        "self-play finished"
    );
    Ok(stats)
}

fn play_one(config: &SelfPlayConfig, game_config: &GameConfig, game_num: usize) -> Result<GameResult> {
    let start_time = Instant::now();
    let seed = config.seed.map(|s| s.wrapping_add(game_num as u64));

    // 手番ごとに別の乱数列を使う
    let x = config.x.build(Mark::X, game_config, seed);
    let o = config.o.build(Mark::O, game_config, seed.map(|s| s ^ 0x9e37_79b9_7f4a_7c15));

    let mut game = Game::with_config(game_config);
    let record = game.play(x.as_ref(), o.as_ref())?;
    let elapsed = start_time.elapsed();

    debug!(game_num, outcome = ?record.outcome, moves = record.moves, "self-play game done");
    Ok(GameResult {
        outcome: record.outcome,
        winner: record.outcome.winner(),
        moves: record.moves,
        time_ms: elapsed.as_millis(),
    })
}

/// 集計結果を `dir/selfplay_<timestamp>.json` に保存する
pub fn save_report(stats: &SelfPlayStats, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|source| Error::Io {
        operation: format!("create report directory {}", dir.display()),
        source,
    })?;

    let filename = dir.join(format!(
        "selfplay_{}.json",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let file = std::fs::File::create(&filename).map_err(|source| Error::Io {
        operation: format!("create report {}", filename.display()),
        source,
    })?;
    serde_json::to_writer_pretty(file, stats)?;
    Ok(filename)
}
