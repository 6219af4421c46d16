use pretty_assertions::assert_eq;
use squarewars::config::AiConfig;
use squarewars::selfplay::{generate_games, play_game, read_records, summarize, write_records, SelfPlayParams};
use squarewars::{Board, Difficulty, Game};
use std::fs::create_dir_all;
use std::sync::atomic::{AtomicUsize, Ordering};

fn small_match() -> SelfPlayParams {
    SelfPlayParams {
        games: 3,
        red: Difficulty::Beginner,
        blue: Difficulty::Medium,
        seed: 7,
        max_plies: 20,
        rows: 6,
        cols: 7,
        threads: 1,
        config: AiConfig::default().without_budgets(),
        ..SelfPlayParams::default()
    }
}

#[test]
fn same_seed_same_games() {
    let params = small_match();
    let seen = AtomicUsize::new(0);
    let a = generate_games(&params, |_| { seen.fetch_add(1, Ordering::Relaxed); }).unwrap();
    let b = generate_games(&params, |_| {}).unwrap();
    assert_eq!(a, b);
    assert_eq!(seen.load(Ordering::Relaxed), 3);
    assert_eq!(a.iter().map(|r| r.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    assert_eq!(play_game(&params, 1).unwrap(), a[1]);
}

#[test]
fn replaying_moves_reproduces_scores() {
    let params = small_match();
    for rec in generate_games(&params, |_| {}).unwrap() {
        assert!(rec.moves.len() <= params.max_plies);
        let mut game = Game::new(Board::new(params.rows, params.cols).unwrap(), rec.scoring);
        let mut closings = 0;
        for &col in &rec.moves {
            if game.drop_piece(col).unwrap().closed.is_some() { closings += 1; }
        }
        assert_eq!(game.score(squarewars::Player::Red), rec.red_score);
        assert_eq!(game.score(squarewars::Player::Blue), rec.blue_score);
        assert_eq!(closings, rec.closings);
        assert_eq!(game.outcome(), rec.outcome);
    }
}

#[test]
fn records_round_trip_through_jsonl() {
    let records = generate_games(&small_match(), |_| {}).unwrap();
    let outdir = std::path::Path::new("target/selfplay_test");
    create_dir_all(outdir).unwrap();
    let path = outdir.join("records.jsonl");
    write_records(&path, &records).unwrap();
    let back = read_records(&path).unwrap();
    assert_eq!(back, records);
    let s = summarize(&back);
    assert_eq!(s.red_wins + s.blue_wins + s.ties + s.unfinished, records.len());
}
