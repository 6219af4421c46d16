pub mod alphabeta;
pub mod eval;
pub mod noise;
pub mod ordering;
pub mod position;
pub mod safety;
pub mod threat;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchParams, SearchResult, Searcher};
pub use eval::{EvalTier, INF, POINT};
pub use position::{MoveRecord, Played, Position};
