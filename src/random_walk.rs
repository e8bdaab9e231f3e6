use log::{debug, info};
use rand::{seq::SliceRandom, Rng};

use crate::goal::{is_solved, tiles_correct};
use crate::puzzle::{Board, BoardKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkReport {
    /// Key of every board stepped onto, in order. Revisits are kept.
    pub visited: Vec<BoardKey>,
    pub moves: u64,
    /// Tiles in place on the board the walk ended on.
    pub tiles_correct: usize,
    pub solved: bool,
    pub last: Board,
}

/// Walks from `start` by picking a uniformly random neighbor each step.
///
/// Without a `step_limit` this only returns once the goal is hit, which never
/// happens for a board of the wrong parity.
pub fn random_walk<R: Rng + ?Sized>(
    start: &Board,
    rng: &mut R,
    step_limit: Option<u64>,
) -> WalkReport {
    let mut current = start.clone();
    let mut visited = Vec::new();
    let mut moves = 0u64;

    while !is_solved(&current) {
        if step_limit.is_some_and(|limit| moves >= limit) {
            info!("Random walk gave up after {} moves", moves);
            break;
        }
        let neighbors = current.generate_neighbors();
        let Some(next) = neighbors.choose(rng) else {
            break;
        };
        current = next.clone();
        visited.push(current.key());
        moves += 1;
    }

    let solved = is_solved(&current);
    if solved {
        debug!("Random walk solved in {} moves", moves);
    }
    WalkReport {
        visited,
        moves,
        tiles_correct: tiles_correct(&current),
        solved,
        last: current,
    }
}
