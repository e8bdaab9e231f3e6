use crate::puzzle::Board;

/// True when the board reads `0, 1, …, N²-1` in row-major order.
pub fn is_solved(board: &Board) -> bool {
    board
        .cells()
        .enumerate()
        .all(|(index, value)| value as usize == index)
}

/// Length of the longest row-major prefix already matching the goal.
///
/// Scanning stops at the first misplaced cell, so `[[0,1,2],[3,5,4],[6,7,8]]`
/// scores 4 even though seven cells are in place.
pub fn score(board: &Board) -> usize {
    board
        .cells()
        .enumerate()
        .take_while(|&(index, value)| value as usize == index)
        .count()
}

/// Number of cells holding their goal value, wherever they are.
pub fn tiles_correct(board: &Board) -> usize {
    board
        .cells()
        .enumerate()
        .filter(|&(index, value)| value as usize == index)
        .count()
}
