use criterion::{criterion_group, criterion_main, Criterion, black_box};
use squarewars::search::{Position, SearchParams, Searcher};
use squarewars::{Board, Difficulty, Engine, Game, ScoringMode};
use squarewars::config::AiConfig;

fn midgame() -> Board {
    let mut g = Game::new(Board::standard(), ScoringMode::Classic);
    for &c in &[15, 14, 15, 16, 13, 15, 14, 17, 12, 16, 16, 13, 18, 14, 11, 15] {
        let _ = g.drop_piece(c);
    }
    g.board().clone()
}

fn bench_search(c: &mut Criterion) {
    let b = midgame();
    c.bench_function("search_depth_4_midgame", |ben| {
        ben.iter(|| {
            let mut s = Searcher::default();
            s.set_tt_capacity_entries(1 << 16);
            let p = SearchParams { depth: 4, ..SearchParams::default() };
            let mut pos = Position::new(black_box(b.clone()));
            let r = s.search_with_params(&mut pos, p);
            black_box(r.nodes)
        })
    });
    c.bench_function("advanced_decision_midgame", |ben| {
        let mut engine = Engine::with_config(1, AiConfig::default().without_budgets());
        ben.iter(|| black_box(engine.choose_move(black_box(&b), Difficulty::Advanced)))
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
