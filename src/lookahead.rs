use crate::goal::{is_solved, score};
use crate::puzzle::Board;

/// Returns true when any of these hold, checked in order:
///
/// 1. `board` is solved,
/// 2. one of its neighbors is solved,
/// 3. one of its neighbors' neighbors is solved,
/// 4. one of its neighbors has a strictly higher prefix score.
///
/// This is a yes/no gate, not a ranking.
pub fn is_promising(board: &Board) -> bool {
    if is_solved(board) {
        return true;
    }

    let neighbors = board.generate_neighbors();
    if neighbors.iter().any(is_solved) {
        return true;
    }

    if neighbors
        .iter()
        .any(|n| n.generate_neighbors().iter().any(is_solved))
    {
        return true;
    }

    let current = score(board);
    neighbors.iter().any(|n| score(n) > current)
}
