use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid board dimensions {rows}x{cols} (each axis must be 1..={max})")]
    InvalidDimensions { rows: usize, cols: usize, max: usize },

    #[error("grid row {row} has {len} cells, expected {expected}")]
    RaggedGrid { row: usize, len: usize, expected: usize },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} board")]
    CellOutOfBounds { row: usize, col: usize, rows: usize, cols: usize },

    #[error("invalid cell character {ch:?} at row {row}")]
    InvalidCellChar { ch: char, row: usize },

    #[error("column {0} cannot take a piece")]
    ColumnUnavailable(usize),

    #[error("game is over")]
    GameOver,

    #[error("unknown difficulty {0:?} (expected beginner, medium, advanced or impossible)")]
    UnknownDifficulty(String),

    #[error("config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
