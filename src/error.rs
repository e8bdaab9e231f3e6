use thiserror::Error;

use crate::puzzle::{MAX_SIZE, MIN_SIZE};

/// What is wrong with a grid handed to [`Board::new`](crate::Board::new).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardDefect {
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("size {0} is outside the supported range {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    UnsupportedSize(usize),

    #[error("tile {value} is out of range for a {size}x{size} board")]
    OutOfRange { value: u32, size: usize },

    #[error("tile {0} appears more than once")]
    Duplicate(u32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// The grid is not a permutation of `0..N²` on a supported square board.
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardDefect),
}

pub type PuzzleResult<T> = Result<T, PuzzleError>;
