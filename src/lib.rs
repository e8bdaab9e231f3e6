//! Sliding-tile puzzle search: board model, goal scoring, a breadth-first
//! solver with a lookahead priority boost, and a random-walk baseline.

pub mod error;
pub mod goal;
pub mod lookahead;
pub mod puzzle;
pub mod random_walk;
pub mod render;
pub mod search;

pub use error::{BoardDefect, PuzzleError, PuzzleResult};
pub use goal::{is_solved, score, tiles_correct};
pub use lookahead::is_promising;
pub use puzzle::{Board, BoardKey, Move};
pub use random_walk::{random_walk, WalkReport};
pub use search::{
    solve, ExhaustReason, Exhausted, Outcome, Path, SearchConfig, SearchStats, SearchTree,
    Solution,
};
