//! Per-tier tuning constants, loadable from JSON.
//!
//! Overrides are merged onto the shipped defaults key by key, so a file only
//! needs to name what it changes:
//!
//! ```json
//! { "impossible": { "depth": 7, "time_budget_ms": 0 } }
//! ```

use crate::error::Result;
use crate::search::{EvalTier, SearchParams, POINT};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierConfig {
    /// Base search depth in plies, root move included.
    pub depth: u32,
    /// Ceiling for the late-game depth bump.
    pub max_depth: u32,
    pub candidate_limit: usize,
    /// Nodes per decision; 0 disables the limit.
    pub node_budget: u64,
    /// Wall-clock per decision; 0 disables the limit.
    pub time_budget_ms: f64,
    /// Chance of blocking an immediate threat. Only the beginner rolls for
    /// it; the other tiers always block and ignore this field.
    pub block_prob: f64,
    /// Chance of blocking an open two before searching.
    pub open_two_prob: f64,
    /// Cumulative pick thresholds over the ranked root moves; empty plays the top move.
    pub pick_splits: Vec<f64>,
    /// Root bonus of `center_weight` points per column inside `center_radius` of the middle.
    pub center_radius: i32,
    pub center_weight: i32,
    pub eval: EvalTier,
    pub check_forks: bool,
}

impl Default for TierConfig {
    fn default() -> Self { Self::medium() }
}

impl TierConfig {
    pub fn beginner() -> Self {
        Self {
            depth: 1,
            max_depth: 1,
            candidate_limit: 0,
            node_budget: 0,
            time_budget_ms: 0.0,
            block_prob: 0.6,
            open_two_prob: 0.0,
            pick_splits: Vec::new(),
            center_radius: 0,
            center_weight: 0,
            eval: EvalTier::Simple,
            check_forks: false,
        }
    }

    pub fn medium() -> Self {
        Self {
            depth: 3,
            max_depth: 4,
            candidate_limit: 8,
            node_budget: 45_000,
            time_budget_ms: 18.0 * 0.6,
            block_prob: 1.0,
            open_two_prob: 0.9,
            center_radius: 5,
            center_weight: 2,
            ..Self::beginner()
        }
    }

    pub fn advanced() -> Self {
        Self {
            depth: 4,
            max_depth: 4,
            candidate_limit: 8,
            node_budget: 90_000,
            time_budget_ms: 18.0,
            block_prob: 1.0,
            open_two_prob: 0.95,
            pick_splits: vec![0.85, 0.97],
            center_radius: 8,
            center_weight: 3,
            eval: EvalTier::Advanced,
            check_forks: false,
        }
    }

    pub fn impossible() -> Self {
        Self {
            depth: 6,
            max_depth: 6,
            candidate_limit: 9,
            node_budget: 140_000,
            time_budget_ms: 32.0,
            block_prob: 1.0,
            open_two_prob: 1.0,
            pick_splits: Vec::new(),
            center_radius: 0,
            center_weight: 0,
            eval: EvalTier::Advanced,
            check_forks: true,
        }
    }

    /// Search parameters for a decision at `depth` under this tier's budgets.
    pub fn search_params(&self, depth: u32) -> SearchParams {
        SearchParams {
            depth,
            max_nodes: (self.node_budget > 0).then_some(self.node_budget),
            movetime: (self.time_budget_ms > 0.0)
                .then(|| Duration::try_from_secs_f64(self.time_budget_ms / 1000.0).ok())
                .flatten(),
            eval: self.eval,
            ..SearchParams::default()
        }
    }

    /// Root bonus for `col`, largest in the middle column.
    pub fn center_bonus(&self, col: usize, cols: usize) -> i32 {
        // distances doubled so odd widths keep an exact center
        let dist2 = (2 * col as i32 - cols as i32).abs();
        (2 * self.center_radius - dist2).max(0) * self.center_weight * POINT / 2
    }

    /// Time and node limits off, for reproducible runs.
    pub fn without_budgets(mut self) -> Self {
        self.node_budget = 0;
        self.time_budget_ms = 0.0;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub beginner: TierConfig,
    pub medium: TierConfig,
    pub advanced: TierConfig,
    pub impossible: TierConfig,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            beginner: TierConfig::beginner(),
            medium: TierConfig::medium(),
            advanced: TierConfig::advanced(),
            impossible: TierConfig::impossible(),
        }
    }
}

impl AiConfig {
    /// Shipped defaults with `json` merged over them.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let overrides: Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Self::default())?;
        merge(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Every tier with time and node limits off.
    pub fn without_budgets(self) -> Self {
        Self {
            beginner: self.beginner.without_budgets(),
            medium: self.medium.without_budgets(),
            advanced: self.advanced.without_budgets(),
            impossible: self.impossible.without_budgets(),
        }
    }
}

fn merge(base: &mut Value, over: Value) {
    match (base, over) {
        (Value::Object(b), Value::Object(o)) => {
            for (k, v) in o {
                match b.get_mut(&k) {
                    Some(slot) => merge(slot, v),
                    None => { b.insert(k, v); }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}
