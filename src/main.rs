use anyhow::{bail, Result};
use clap::Parser;
use squarewars::config::AiConfig;
use squarewars::{Board, ClosingRule, Difficulty, Engine, Game, Player, ScoringMode};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Square Wars against the computer", long_about = None)]
struct Args {
    /// beginner, medium, advanced or impossible
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Seed for the engine's random choices (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// classic (a point per closing) or area (a point per closed cell)
    #[arg(long, default_value = "classic")]
    scoring: ScoringMode,

    #[arg(long, default_value_t = squarewars::board::ROWS)]
    rows: usize,

    #[arg(long, default_value_t = squarewars::board::COLS)]
    cols: usize,

    /// JSON file with tier overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// same-player or any-piece: which pieces the closing flood fill joins
    #[arg(long, default_value = "same-player", value_parser = parse_closing)]
    closing: ClosingRule,

    /// Side the computer plays; Red always moves first
    #[arg(long, default_value = "blue", value_parser = parse_player)]
    computer: Player,
}

fn parse_closing(s: &str) -> Result<ClosingRule, String> {
    match s {
        "same-player" => Ok(ClosingRule::SamePlayer),
        "any-piece" => Ok(ClosingRule::AnyPiece),
        _ => Err(format!("unknown closing rule {s:?} (expected same-player or any-piece)")),
    }
}

fn parse_player(s: &str) -> Result<Player, String> {
    match s.to_ascii_lowercase().as_str() {
        "red" => Ok(Player::Red),
        "blue" => Ok(Player::Blue),
        _ => Err(format!("unknown side {s:?} (expected red or blue)")),
    }
}

fn print_board(game: &Game) {
    let board = game.board();
    let header: String = (0..board.cols()).map(|c| char::from(b'0' + (c % 10) as u8)).collect();
    println!("\n{header}");
    print!("{board}");
    println!(
        "Red {}  Blue {}  ({:?} scoring, {} to move)",
        game.score(Player::Red),
        game.score(Player::Blue),
        game.scoring(),
        game.to_move()
    );
}

fn read_column(game: &Game) -> Result<usize> {
    let stdin = io::stdin();
    loop {
        print!("Column (0-{}): ", game.board().cols() - 1);
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 { bail!("input closed"); }
        match line.trim().parse::<usize>() {
            Ok(c) if game.board().can_drop(c) => return Ok(c),
            Ok(c) => println!("Column {c} cannot take a piece"),
            Err(_) => println!("Enter a column number"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AiConfig::load(path)?,
        None => AiConfig::default(),
    };
    let mut engine = match args.seed {
        Some(seed) => Engine::with_config(seed, config),
        None => Engine::from_entropy(config),
    };
    let board = Board::new(args.rows, args.cols)?.with_closing_rule(args.closing);
    let mut game = Game::new(board, args.scoring);
    println!("Square Wars: you are {}, computer plays {} at {}", args.computer.opponent(), args.computer, args.difficulty);

    while !game.is_over() {
        print_board(&game);
        let col = if game.to_move() == args.computer {
            let t0 = Instant::now();
            let Some(col) = engine.choose_move_for(game.board(), args.computer, args.difficulty) else { break };
            println!("Computer plays column {col} ({:.1} ms)", t0.elapsed().as_secs_f64() * 1000.0);
            col
        } else {
            read_column(&game)?
        };
        let out = game.drop_piece(col)?;
        if let Some(region) = out.closed {
            let r = region.rect;
            println!(
                "{} closes rows {}-{}, columns {}-{} ({} cells blocked)",
                out.player, r.top, r.bottom, r.left, r.right, region.newly_blocked
            );
        }
    }

    print_board(&game);
    if let Some(outcome) = game.outcome() {
        println!("Game over: {outcome}");
    }
    Ok(())
}
