use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_minimax::config::GameConfig;
use tictactoe_minimax::core::Mark;
use tictactoe_minimax::game::{Game, GameOutcome};
use tictactoe_minimax::player::PlayerKind;
use tictactoe_minimax::selfplay::{run_selfplay, save_report, SelfPlayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictactoe-minimax", about = "Tic-tac-toe against a perfect minimax player")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Player for X (human, random, optimal)
    #[arg(long, default_value_t = PlayerKind::Human)]
    x: PlayerKind,

    /// Player for O (human, random, optimal)
    #[arg(long, default_value_t = PlayerKind::Optimal)]
    o: PlayerKind,

    /// Pause between moves in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Do not print the board
    #[arg(long)]
    quiet: bool,

    /// Always search, even on an empty board
    #[arg(long)]
    no_opening_shortcut: bool,

    /// Config file (defaults to ./tictactoe.json when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Play many silent games between two computer players
    Selfplay {
        #[arg(long, default_value_t = 100)]
        games: usize,

        #[arg(long, default_value_t = PlayerKind::Optimal)]
        x: PlayerKind,

        #[arg(long, default_value_t = PlayerKind::Random)]
        o: PlayerKind,

        #[arg(long)]
        seed: Option<u64>,

        /// Directory to write a JSON report into
        #[arg(long)]
        save_report: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::load_or_default(),
    };
    if let Some(delay_ms) = cli.delay_ms {
        config.move_delay_ms = delay_ms;
    }
    if cli.quiet {
        config.print_game = false;
    }
    if cli.no_opening_shortcut {
        config.opening_shortcut = false;
    }

    match cli.command {
        Some(Command::Selfplay {
            games,
            x,
            o,
            seed,
            save_report: report_dir,
        }) => {
            let selfplay = SelfPlayConfig {
                num_games: games,
                x,
                o,
                opening_shortcut: config.opening_shortcut,
                seed,
            };
            let stats = run_selfplay(&selfplay)?;

            let pct = |n: usize| n as f64 / stats.total_games.max(1) as f64 * 100.0;
            println!("=== Self-Play: {} (X) vs {} (O) ===", stats.x_player, stats.o_player);
            println!("Games: {}", stats.total_games);
            println!("X Wins: {} ({:.1}%)", stats.x_wins, pct(stats.x_wins));
            println!("O Wins: {} ({:.1}%)", stats.o_wins, pct(stats.o_wins));
            println!("Draws: {} ({:.1}%)", stats.draws, pct(stats.draws));
            println!("Avg Moves: {:.1}", stats.avg_moves);
            println!("Avg Time: {:.1}ms", stats.avg_time_ms);

            if let Some(dir) = report_dir {
                let path = save_report(&stats, dir)?;
                println!("Report saved to {}", path.display());
            }
        }
        None => {
            info!(x = %cli.x, o = %cli.o, "starting game");
            let x = cli.x.build(Mark::X, &config, None);
            let o = cli.o.build(Mark::O, &config, None);

            let mut game = Game::with_config(&config);
            let record = game.play(x.as_ref(), o.as_ref())?;
            if !config.print_game {
                match record.outcome {
                    GameOutcome::Win(mark) => println!("{} wins!", mark),
                    GameOutcome::Draw => println!("It's a tie."),
                    GameOutcome::Abandoned(mark) => println!("{} gave up.", mark),
                }
            }
        }
    }

    Ok(())
}
