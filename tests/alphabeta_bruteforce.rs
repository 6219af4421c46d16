use squarewars::search::eval::{evaluate, EvalTier, INF};
use squarewars::search::threat::can_close_now;
use squarewars::search::{Position, SearchParams, Searcher};
use squarewars::{Board, Player};

/// Plain minimax over every column, with the same one-ply horizon extension
/// as the engine: at depth 0 the side to move keeps going only if it can close.
fn minimax(pos: &mut Position, depth: u32, maximizing: bool, extend: bool, tier: EvalTier) -> i32 {
    let side = if maximizing { Player::Blue } else { Player::Red };
    if depth == 0 && !(extend && can_close_now(pos.board(), side)) {
        return evaluate(pos, tier);
    }
    if !pos.board().has_legal_move() { return evaluate(pos, tier); }
    let child_extend = depth > 0;
    let mut best = if maximizing { -INF } else { INF };
    for col in 0..pos.board().cols() {
        let Some(mut child) = pos.play(col, side) else { continue };
        let v = minimax(&mut child, depth.saturating_sub(1), !maximizing, child_extend, tier);
        best = if maximizing { best.max(v) } else { best.min(v) };
    }
    best
}

fn tactical_board() -> Board {
    Board::from_rows(&[
        "......",
        "......",
        "......",
        ".R....",
        ".RB.B.",
        "RBBRBR",
    ]).unwrap()
}

fn exact_params(depth: u32, eval: EvalTier) -> SearchParams {
    SearchParams {
        depth,
        use_tt: false,
        use_lmr: false,
        use_aspiration: false,
        candidate_limit: 64,
        max_nodes: None,
        movetime: None,
        eval,
        ..SearchParams::default()
    }
}

#[test]
fn pruned_search_matches_brute_force() {
    for tier in [EvalTier::Simple, EvalTier::Advanced] {
        for depth in 1..=4u32 {
            let mut pos = Position::new(tactical_board());
            let mut s = Searcher::new();
            let res = s.search_with_params(&mut pos, exact_params(depth, tier));
            let mut brute = -INF;
            for &(col, score) in &res.root_scores {
                let mut child = pos.play(col, Player::Blue).unwrap();
                let expect = minimax(&mut child, depth - 1, false, true, tier);
                assert_eq!(score, expect, "root column {col} at depth {depth} ({tier:?})");
                brute = brute.max(expect);
            }
            assert_eq!(res.root_scores.len(), tactical_board().legal_columns().len());
            assert_eq!(res.score, brute, "depth {depth} ({tier:?})");
            assert_eq!(pos.board(), &tactical_board());
        }
    }
}

fn tt_params(depth: u32, eval: EvalTier) -> SearchParams {
    SearchParams { use_tt: true, ..exact_params(depth, eval) }
}

fn assert_root_scores_match(pos: &mut Position, depth: u32, tier: EvalTier, res: &squarewars::search::SearchResult) {
    let mut brute = -INF;
    for &(col, score) in &res.root_scores {
        let mut child = pos.play(col, Player::Blue).unwrap();
        let expect = minimax(&mut child, depth - 1, false, true, tier);
        assert_eq!(score, expect, "root column {col} at depth {depth} ({tier:?})");
        brute = brute.max(expect);
    }
    assert_eq!(res.score, brute, "depth {depth} ({tier:?})");
}

#[test]
fn tt_search_matches_brute_force() {
    for tier in [EvalTier::Simple, EvalTier::Advanced] {
        for depth in 1..=4u32 {
            let mut pos = Position::new(tactical_board());
            let mut s = Searcher::new();
            let res = s.search_with_params(&mut pos, tt_params(depth, tier));
            assert!(s.tt_len() > 0);
            assert_root_scores_match(&mut pos, depth, tier, &res);
            assert_eq!(pos.board(), &tactical_board());
        }
    }
}

#[test]
fn repeated_tt_search_matches_brute_force() {
    for tier in [EvalTier::Simple, EvalTier::Advanced] {
        for depth in 1..=4u32 {
            let mut pos = Position::new(tactical_board());
            let mut s = Searcher::new();
            let first = s.search_with_params(&mut pos, tt_params(depth, tier));
            let second = s.search_with_params(&mut pos, tt_params(depth, tier));
            assert_eq!(second.score, first.score, "depth {depth} ({tier:?})");
            assert_root_scores_match(&mut pos, depth, tier, &second);
        }
    }
}

// Blue can close the floor at column 3; Red answers on the row above.
fn closing_board() -> Board {
    Board::from_rows(&[
        ".......",
        ".......",
        ".......",
        ".......",
        "RR.....",
        "BBB....",
    ]).unwrap()
}

#[test]
fn cached_scores_stay_valid_after_a_real_closing() {
    let tier = EvalTier::Simple;
    let params = tt_params(3, tier);
    let board = closing_board();
    let mut warm = Searcher::new();
    warm.search_with_params(&mut Position::new(board.clone()), params);

    let mut hits = 0;
    for reply in 0..board.cols() {
        // The two drops are played for real: the next decision starts from a
        // fresh root where nothing has been closed yet.
        let mut game = Position::new(board.clone());
        assert!(game.apply(3, Player::Blue).unwrap().closed);
        if game.apply(reply, Player::Red).is_none() { continue; }
        let mut pos = Position::new(game.into_board());
        if warm.tt_probe(&pos).is_some() { hits += 1; }

        warm.begin(params, board.cols());
        let got = warm.search(&mut pos, 1, true, -INF, INF);
        let mut cold = Searcher::new();
        cold.begin(params, board.cols());
        let want = cold.search(&mut pos, 1, true, -INF, INF);
        assert_eq!(got, want, "red reply {reply}");
        assert_eq!(got, minimax(&mut pos, 1, true, true, tier), "red reply {reply}");
    }
    assert!(hits > 0, "the first decision should have cached the replies");
}

#[test]
fn windowed_node_search_matches_brute_force() {
    let mut pos = Position::new(tactical_board());
    let mut s = Searcher::new();
    for depth in 0..=4u32 {
        for maximizing in [true, false] {
            s.begin(exact_params(depth, EvalTier::Simple), pos.board().cols());
            let got = s.search(&mut pos, depth, maximizing, -INF, INF);
            let want = minimax(&mut pos, depth, maximizing, true, EvalTier::Simple);
            assert_eq!(got, want, "depth {depth} maximizing {maximizing}");
        }
    }
}

#[test]
fn heuristics_do_not_change_the_score() {
    let base = exact_params(4, EvalTier::Simple);
    let plain = SearchParams { use_history: false, use_killers: false, ..base };
    let r1 = Searcher::new().search_with_params(&mut Position::new(tactical_board()), plain);
    let r2 = Searcher::new().search_with_params(&mut Position::new(tactical_board()), base);
    assert_eq!(r1.score, r2.score, "killers and history must only reorder");
}
