use battleship_maneuvers::{
    init_logging, AiPlayer, GameDriver, GameMode, GameState, MatchReport, Rules, SeededRng,
    DEFAULT_MAX_ROUNDS,
};

/// Headless AI vs AI match. Prints the match report as one JSON line.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [max_rounds]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let max_rounds: u32 = match args.get(2) {
        Some(s) => s.parse()?,
        None => DEFAULT_MAX_ROUNDS,
    };

    init_logging();
    let mut rng = SeededRng::new(seed);
    let state = GameState::with_rules(GameMode::TwoPlayer, Rules::default());
    let mut driver = GameDriver::new(Box::new(AiPlayer::new()), Box::new(AiPlayer::new()), state)
        .with_max_rounds(max_rounds);
    let report: MatchReport = driver.run(&mut rng)?;

    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
