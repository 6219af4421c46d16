use crate::board::Player;
use crate::search::eval::{banked_closings, evaluate, EvalTier, INF, POINT};
use crate::search::ordering::{ordered_candidates, promote, HistoryTable, KillerTable};
use crate::search::position::Position;
use crate::search::threat::can_close_now;
use crate::search::tt::{Bound, Entry, Tt, DEFAULT_ENTRIES};
use log::{debug, trace};
use std::time::{Duration, Instant};

const MAX_PLY: usize = 64;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u32,
    pub use_tt: bool,
    pub max_nodes: Option<u64>,
    pub movetime: Option<Duration>,
    pub use_history: bool,
    pub use_killers: bool,
    pub use_lmr: bool,
    pub use_aspiration: bool,
    pub aspiration_window: i32,
    /// Search one more ply at the horizon when the side to move can close.
    pub tactical_extension: bool,
    /// Columns considered per node, taken center-outwards.
    pub candidate_limit: usize,
    pub eval: EvalTier,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 4,
            use_tt: true,
            max_nodes: None,
            movetime: None,
            use_history: true,
            use_killers: true,
            use_lmr: true,
            use_aspiration: true,
            aspiration_window: 120 * POINT,
            tactical_extension: true,
            candidate_limit: 12,
            eval: EvalTier::Simple,
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub best: Option<usize>,
    pub score: i32,
    pub nodes: u64,
    /// Deepest root iteration that produced a move.
    pub depth: u32,
    /// `(column, score)` for each root move of that iteration, in search order.
    pub root_scores: Vec<(usize, i32)>,
}

/// Search context for one game session. The transposition table persists
/// across decisions; node and time budgets, killers and history are reset for
/// each top-level decision.
pub struct Searcher {
    tt: Tt,
    history: HistoryTable,
    killers: KillerTable,
    nodes: u64,
    node_limit: u64,
    deadline: Option<Instant>,
    params: SearchParams,
}

impl Default for Searcher {
    fn default() -> Self {
        Self {
            tt: Tt::with_capacity_entries(DEFAULT_ENTRIES),
            history: HistoryTable::default(),
            killers: KillerTable::new(MAX_PLY),
            nodes: 0,
            node_limit: u64::MAX,
            deadline: None,
            params: SearchParams::default(),
        }
    }
}

impl Searcher {
    pub fn new() -> Self { Self::default() }

    /// Resets per-decision state and arms the budgets in `params`. Cached
    /// scores are dropped when the evaluator tier changes.
    pub fn begin(&mut self, params: SearchParams, cols: usize) {
        if params.eval != self.params.eval { self.tt.clear(); }
        self.params = params;
        self.nodes = 0;
        self.node_limit = params.max_nodes.unwrap_or(u64::MAX);
        self.deadline = params.movetime.map(|d| Instant::now() + d);
        self.history = HistoryTable::new(cols);
        self.killers.clear();
        self.tt.bump_generation();
    }

    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn out_of_budget(&self) -> bool {
        self.nodes >= self.node_limit || self.deadline.is_some_and(|dl| Instant::now() >= dl)
    }

    /// Minimax value of `pos` with Blue maximizing, under the budgets armed by
    /// the last `begin`. The position is restored before this returns.
    pub fn search(&mut self, pos: &mut Position, depth: u32, maximizing: bool, alpha: i32, beta: i32) -> i32 {
        let ext = self.params.tactical_extension;
        self.alphabeta(pos, depth, maximizing, alpha, beta, 0, ext)
    }

    fn eval(&self, pos: &Position) -> i32 { evaluate(pos, self.params.eval) }

    #[allow(clippy::too_many_arguments)]
    fn alphabeta(&mut self, pos: &mut Position, depth: u32, maximizing: bool, mut alpha: i32, mut beta: i32, ply: usize, extend: bool) -> i32 {
        self.nodes += 1;
        if self.nodes > self.node_limit { return self.eval(pos); }
        if let Some(dl) = self.deadline { if Instant::now() >= dl { return self.eval(pos); } }
        let side = if maximizing { Player::Blue } else { Player::Red };
        let mut child_extend = self.params.tactical_extension;
        if depth == 0 {
            // Horizon: keep going one ply only if the side to move can close right now
            if !(extend && can_close_now(pos.board(), side)) { return self.eval(pos); }
            child_extend = false;
        }
        if !pos.board().has_legal_move() { return self.eval(pos); }

        let hash = pos.hash();
        // Entries hold scores net of the closings banked on the way here, so
        // they stay valid whichever path (or decision) reaches the position.
        let banked = banked_closings(pos, self.params.eval);
        let mut tt_best = None;
        if self.params.use_tt {
            if let Some(en) = self.tt.get(hash) {
                tt_best = en.best;
                if en.depth >= depth {
                    let score = en.score + banked;
                    match en.bound {
                        Bound::Exact => return score,
                        Bound::Lower => alpha = alpha.max(score),
                        Bound::Upper => beta = beta.min(score),
                    }
                    if alpha >= beta { return score; }
                }
            }
        }

        let history = if self.params.use_history { Some(&self.history) } else { None };
        let mut order = ordered_candidates(pos.board(), self.params.candidate_limit, tt_best, history);
        if self.params.use_killers {
            let [k0, k1] = self.killers.get(ply);
            for k in [k1, k0].into_iter().flatten() { promote(&mut order, k, pos.board()); }
            if let Some(t) = tt_best { promote(&mut order, t, pos.board()); }
        }

        let (alpha0, beta0) = (alpha, beta);
        let mut best = if maximizing { -INF } else { INF };
        let mut best_col = None;
        for (idx, &col) in order.iter().enumerate() {
            let quiet = !pos.board().drop_wins(col, side);
            let reduce = self.params.use_lmr && depth >= 4 && idx >= 2 && quiet;
            let Some(mut child) = pos.play(col, side) else { continue };
            let next = depth.saturating_sub(1);
            let mut val = self.alphabeta(&mut child, if reduce { next - 1 } else { next }, !maximizing, alpha, beta, ply + 1, child_extend);
            if reduce && maximizing && val > alpha {
                val = self.alphabeta(&mut child, next, !maximizing, alpha, beta, ply + 1, child_extend);
            }
            drop(child);

            if maximizing {
                if val > best { best = val; best_col = Some(col); }
                alpha = alpha.max(best);
            } else {
                if val < best { best = val; best_col = Some(col); }
                beta = beta.min(best);
            }
            if alpha >= beta {
                if self.params.use_killers { self.killers.record(ply, col); }
                if self.params.use_history { self.history.reward(col, depth); }
                break;
            }
        }

        let Some(bc) = best_col else { return self.eval(pos) };
        if self.params.use_tt {
            let bound = if best <= alpha0 { Bound::Upper } else if best >= beta0 { Bound::Lower } else { Bound::Exact };
            self.tt.put(Entry::new(hash, depth, best - banked, Some(bc), bound));
        }
        best
    }

    /// Scores each root move for Blue at `depth` plies (the root move counts
    /// as one). With a window, moves whose score falls outside it are
    /// re-searched with an open window. `penalty` is subtracted per column.
    fn root_pass(
        &mut self,
        pos: &mut Position,
        order: &[usize],
        depth: u32,
        window: Option<(i32, i32)>,
        penalty: &dyn Fn(usize) -> i32,
        stop_on_budget: bool,
    ) -> Vec<(usize, i32)> {
        let (alpha, beta) = window.unwrap_or((-INF, INF));
        let ext = self.params.tactical_extension;
        let next = depth.saturating_sub(1);
        let mut scores = Vec::with_capacity(order.len());
        for &col in order {
            let Some(mut child) = pos.play(col, Player::Blue) else { continue };
            let mut score = self.alphabeta(&mut child, next, false, alpha, beta, 1, ext);
            if window.is_some() && (score <= alpha || score >= beta) {
                score = self.alphabeta(&mut child, next, false, -INF, INF, 1, ext);
            }
            drop(child);
            let score = score - penalty(col);
            trace!("root d={depth} col={col} score={score}");
            scores.push((col, score));
            if stop_on_budget && self.out_of_budget() { break; }
        }
        scores
    }

    /// One full-window pass over `candidates`; every candidate gets a score
    /// even after the budget runs out (late ones then fall back to static eval).
    pub fn score_root(&mut self, pos: &mut Position, candidates: &[usize], params: SearchParams) -> Vec<(usize, i32)> {
        self.begin(params, pos.board().cols());
        let scores = self.root_pass(pos, candidates, params.depth.max(1), None, &|_| 0, false);
        debug!("scored {} root moves at depth {} in {} nodes", scores.len(), params.depth, self.nodes);
        scores
    }

    /// Iterative deepening over fixed root `candidates` from `start_depth` to
    /// `params.depth`, with aspiration windows after the first iteration.
    /// Stops early once the node or time budget is spent and keeps the best
    /// move of the last iteration that produced one.
    pub fn iterate(
        &mut self,
        pos: &mut Position,
        candidates: &[usize],
        params: SearchParams,
        start_depth: u32,
        penalty: &dyn Fn(usize) -> i32,
    ) -> SearchResult {
        self.begin(params, pos.board().cols());
        let cap = params.depth.max(1);
        let mut result = SearchResult::default();
        let mut last: Option<i32> = None;
        let mut order = candidates.to_vec();
        for d in start_depth.clamp(1, cap)..=cap {
            if let Some(pv) = result.best { promote(&mut order, pv, pos.board()); }
            let window = match (params.use_aspiration, last) {
                (true, Some(s)) => Some((s - params.aspiration_window, s + params.aspiration_window)),
                _ => None,
            };
            let scores = self.root_pass(pos, &order, d, window, penalty, true);
            let mut best: Option<(usize, i32)> = None;
            for &(col, score) in &scores {
                if best.map_or(true, |(_, b)| score > b) { best = Some((col, score)); }
            }
            if let Some((col, score)) = best {
                result.best = Some(col);
                result.score = score;
                result.depth = d;
                result.root_scores = scores;
                last = Some(score);
                debug!("depth {d} best col {col} score {score} nodes {}", self.nodes);
            }
            if self.out_of_budget() { break; }
        }
        result.nodes = self.nodes;
        result
    }

    /// Full root search of `pos` for Blue using the center-outward candidate
    /// window and iterative deepening from depth 1.
    pub fn search_with_params(&mut self, pos: &mut Position, params: SearchParams) -> SearchResult {
        let candidates = ordered_candidates(pos.board(), params.candidate_limit, None, None);
        if candidates.is_empty() {
            return SearchResult { score: evaluate(pos, params.eval), ..SearchResult::default() };
        }
        let res = self.iterate(pos, &candidates, params, 1, &|_| 0);
        if params.use_tt {
            if let Some(b) = res.best {
                let score = res.score - banked_closings(pos, params.eval);
                self.tt.put(Entry::new(pos.hash(), res.depth, score, Some(b), Bound::Exact));
            }
        }
        res
    }

    pub fn tt_probe(&self, pos: &Position) -> Option<(u32, Bound, Option<usize>)> {
        self.tt.get(pos.hash()).map(|e| (e.depth, e.bound, e.best))
    }

    pub fn tt_len(&self) -> usize { self.tt.len() }

    pub fn set_tt_capacity_entries(&mut self, entries: usize) { self.tt.set_capacity_entries(entries); }

    pub fn set_tt_capacity_mb(&mut self, mb: usize) { self.tt.set_capacity_mb(mb); }

    /// Forgets everything learned this session.
    pub fn clear(&mut self) {
        self.tt.clear();
        self.history.clear();
        self.killers.clear();
    }
}
