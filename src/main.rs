#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use battleship_maneuvers::{
    init_logging, print_player_view, AiPlayer, CliPlayer, GameDriver, GameMode, GameState,
    MatchReport, Player, PlayerId, Rules, SeededRng, DEFAULT_MAX_ROUNDS,
};

#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct GameOpts {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = DEFAULT_MAX_ROUNDS, help = "Abandon the match after this many rounds")]
    max_rounds: u32,
    #[arg(long, help = "Keep miss markers from earlier rounds instead of clearing them")]
    keep_misses: bool,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play on the local machine against the AI, or hotseat with --two-player.
    Local {
        #[command(flatten)]
        opts: GameOpts,
        #[arg(long, help = "Two humans share the terminal instead of facing the AI")]
        two_player: bool,
    },
    /// Watch two AI fleets fight it out.
    Auto {
        #[command(flatten)]
        opts: GameOpts,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SeededRng {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SeededRng::new(s)
        }
        None => SeededRng::from_entropy(),
    }
}

#[cfg(feature = "std")]
fn rules(opts: &GameOpts) -> Rules {
    Rules {
        clear_misses_each_round: !opts.keep_misses,
    }
}

#[cfg(feature = "std")]
fn print_summary(state: &GameState, report: &MatchReport) {
    std::println!("\n=== GAME OVER ===\n");
    print_player_view(state, PlayerId::First);
    match report.winner {
        Some(winner) => std::println!("\n{} wins after {} rounds.", winner, report.rounds),
        None => std::println!("\nNo winner after {} rounds.", report.rounds),
    }
    std::println!(
        "player 1: {} shells, {} hits, {} ships sunk",
        report.first.shells,
        report.first.hits,
        report.first.ships_destroyed
    );
    std::println!(
        "player 2: {} shells, {} hits, {} ships sunk",
        report.second.shells,
        report.second.hits,
        report.second.ships_destroyed
    );
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let (opts, mode, first, second): (GameOpts, GameMode, Box<dyn Player>, Box<dyn Player>) =
        match cli.command {
            Commands::Local { opts, two_player } => {
                if two_player {
                    println!("Starting hotseat game. Player 1 places first.");
                    (
                        opts,
                        GameMode::TwoPlayer,
                        Box::new(CliPlayer::new()),
                        Box::new(CliPlayer::new()),
                    )
                } else {
                    println!("Starting local game against the AI...");
                    (
                        opts,
                        GameMode::VsAi,
                        Box::new(CliPlayer::new()),
                        Box::new(AiPlayer::new()),
                    )
                }
            }
            Commands::Auto { opts } => {
                println!("Starting local AI vs AI game...");
                (
                    opts,
                    GameMode::TwoPlayer,
                    Box::new(AiPlayer::new()),
                    Box::new(AiPlayer::new()),
                )
            }
        };

    let mut rng = make_rng(opts.seed);
    let state = GameState::with_rules(mode, rules(&opts));
    let mut driver = GameDriver::new(first, second, state).with_max_rounds(opts.max_rounds);
    let report = driver.run(&mut rng)?;
    print_summary(driver.state(), &report);
    Ok(())
}
