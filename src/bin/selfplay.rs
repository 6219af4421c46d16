use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use squarewars::config::AiConfig;
use squarewars::selfplay::{generate_games, summarize, write_records, SelfPlayParams};
use squarewars::{Difficulty, ScoringMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "squarewars-selfplay", about = "Play engine-vs-engine matches and write JSON-lines records")]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value = "medium")]
    red: Difficulty,
    #[arg(long, default_value = "advanced")]
    blue: Difficulty,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Stop each game after this many drops (0 = play until the board is full)
    #[arg(long, default_value_t = 0)]
    max_plies: usize,
    #[arg(long, default_value_t = 2)]
    opening_plies: usize,
    #[arg(long, default_value = "classic")]
    scoring: ScoringMode,
    #[arg(long, default_value_t = 0)]
    threads: usize,
    /// JSON file with tier overrides
    #[arg(long)]
    config: Option<PathBuf>,
    /// Turn node and time budgets off so runs are reproducible
    #[arg(long, default_value_t = false)]
    deterministic: bool,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let mut config = match &a.config {
        Some(p) => AiConfig::load(p)?,
        None => AiConfig::default(),
    };
    if a.deterministic { config = config.without_budgets(); }
    let params = SelfPlayParams {
        games: a.games,
        red: a.red,
        blue: a.blue,
        seed: a.seed,
        max_plies: a.max_plies,
        opening_plies: a.opening_plies,
        scoring: a.scoring,
        threads: a.threads,
        config,
        ..SelfPlayParams::default()
    };

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} games {msg}")?
    );
    let records = generate_games(&params, |rec| {
        pb.set_message(format!("last: {:?}", rec.outcome));
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    if let Some(dir) = a.out.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    write_records(&a.out, &records)?;
    let s = summarize(&records);
    eprintln!(
        "red ({}) {} / blue ({}) {} / ties {} / unfinished {} -> {}",
        a.red, s.red_wins, a.blue, s.blue_wins, s.ties, s.unfinished, a.out.display()
    );
    Ok(())
}
