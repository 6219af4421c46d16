// Square Wars engine: rules, alpha-beta search and difficulty tiers
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod policy;
pub mod search;
pub mod selfplay;

pub use board::{Board, Cell, ClosingRule, Player, Rect};
pub use error::{Error, Result};
pub use game::{Game, Outcome, ScoringMode};
pub use policy::{choose_move, Difficulty, Engine};
