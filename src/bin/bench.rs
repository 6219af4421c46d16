use clap::Parser;
use squarewars::board::Board;
use squarewars::policy::{Difficulty, Engine};
use squarewars::search::{EvalTier, Position, SearchParams, Searcher};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "squarewars-bench", version, about = "Benchmark Square Wars search speed")]
struct Args {
    /// Board rows as text (`.` `R` `B` `#`), separated by '/'; empty means an empty 20x30 board
    #[arg(long, default_value = "")]
    board: String,

    /// Run a whole tier decision instead of a raw search
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Fixed search depth
    #[arg(long, default_value_t = 5)]
    depth: u32,

    /// Movetime in milliseconds (0 = no limit)
    #[arg(long, default_value_t = 0)]
    movetime: u64,

    /// Columns per node
    #[arg(long, default_value_t = 12)]
    candidates: usize,

    /// Use the advanced evaluator
    #[arg(long, default_value_t = false)]
    advanced: bool,

    /// Transposition table size in MB (approximate)
    #[arg(long, default_value_t = 16)]
    hash_mb: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let board = if args.board.is_empty() {
        Board::standard()
    } else {
        let rows: Vec<&str> = args.board.split('/').collect();
        Board::from_rows(&rows)?
    };

    if let Some(d) = args.difficulty {
        let mut engine = Engine::new(0);
        engine.searcher_mut().set_tt_capacity_mb(args.hash_mb);
        let t0 = Instant::now();
        let col = engine.choose_move(&board, d);
        println!("difficulty={d} move={col:?} elapsed={:.3}ms", t0.elapsed().as_secs_f64() * 1000.0);
        return Ok(());
    }

    let mut s = Searcher::default();
    s.set_tt_capacity_mb(args.hash_mb);
    let p = SearchParams {
        depth: args.depth,
        movetime: (args.movetime > 0).then(|| Duration::from_millis(args.movetime)),
        candidate_limit: args.candidates,
        eval: if args.advanced { EvalTier::Advanced } else { EvalTier::Simple },
        ..SearchParams::default()
    };
    let mut pos = Position::new(board);
    let t0 = Instant::now();
    let res = s.search_with_params(&mut pos, p);
    let dt = t0.elapsed();
    let nps = if dt.as_secs_f64() > 0.0 { res.nodes as f64 / dt.as_secs_f64() } else { 0.0 };
    println!(
        "best={:?} score={} depth={} nodes={} elapsed={:.3}s nps={:.1}",
        res.best, res.score, res.depth, res.nodes, dt.as_secs_f64(), nps
    );
    Ok(())
}
