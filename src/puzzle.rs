use rand::{seq::SliceRandom, Rng};
use std::collections::HashSet;
use std::fmt;

use crate::error::{BoardDefect, PuzzleResult};

pub const MIN_SIZE: usize = 2;
/// Largest board whose packed key still fits in a `u64` at four bits per cell.
pub const MAX_SIZE: usize = 4;

/// Direction the blank slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Down,
    Up,
    Right,
    Left,
}

impl Move {
    /// Fixed neighbor generation order.
    pub const ALL: [Move; 4] = [Move::Down, Move::Up, Move::Right, Move::Left];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Down => (1, 0),
            Move::Up => (-1, 0),
            Move::Right => (0, 1),
            Move::Left => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// Packed row-major encoding of a grid, four bits per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardKey(pub u64);

/// An N×N arrangement of `0..N²`, where `0` is the blank.
///
/// Equality and hashing only look at the tiles. Parent links are kept by the
/// search arena, not by the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    grid: Vec<Vec<u32>>,
    row: usize,
    col: usize,
}

impl Board {
    /// Builds a board after checking the permutation invariant.
    pub fn new(grid: Vec<Vec<u32>>) -> PuzzleResult<Self> {
        let size = grid.len();
        check_size(size)?;

        let mut seen = HashSet::with_capacity(size * size);
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != size {
                return Err(BoardDefect::NotSquare {
                    row,
                    len: cells.len(),
                    expected: size,
                }
                .into());
            }
            for &value in cells {
                if value as usize >= size * size {
                    return Err(BoardDefect::OutOfRange { value, size }.into());
                }
                if !seen.insert(value) {
                    return Err(BoardDefect::Duplicate(value).into());
                }
            }
        }

        Ok(Self::from_grid(grid))
    }

    /// The solved board: `0, 1, …, N²-1` in row-major order.
    pub fn goal(size: usize) -> PuzzleResult<Self> {
        check_size(size)?;
        Self::from_flat(size, (0..(size * size) as u32).collect())
    }

    /// Uniformly random permutation. Half of these cannot reach the goal.
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> PuzzleResult<Self> {
        check_size(size)?;
        let mut flattened: Vec<u32> = (0..(size * size) as u32).collect();
        flattened.shuffle(rng);
        Self::from_flat(size, flattened)
    }

    /// Reshuffles until the inversion parity says the goal is reachable.
    pub fn random_solvable<R: Rng + ?Sized>(size: usize, rng: &mut R) -> PuzzleResult<Self> {
        loop {
            let board = Self::random(size, rng)?;
            if board.is_solvable() {
                return Ok(board);
            }
        }
    }

    fn from_flat(size: usize, flattened: Vec<u32>) -> PuzzleResult<Self> {
        check_size(size)?;
        Self::new(flattened.chunks(size).map(|row| row.to_vec()).collect())
    }

    // Callers guarantee the permutation invariant.
    fn from_grid(grid: Vec<Vec<u32>>) -> Self {
        let size = grid.len();
        let (row, col) = locate_blank(&grid);
        Self {
            size,
            grid,
            row,
            col,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn grid(&self) -> &[Vec<u32>] {
        &self.grid
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.grid[row][col]
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = u32> + '_ {
        self.grid.iter().flat_map(|row| row.iter().copied())
    }

    pub fn get_blank_position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn key(&self) -> BoardKey {
        BoardKey(self.cells().fold(0u64, |acc, v| (acc << 4) | u64::from(v)))
    }

    pub fn can_move(&self, movement: Move) -> bool {
        match movement {
            Move::Down => self.row + 1 < self.size,
            Move::Up => self.row > 0,
            Move::Right => self.col + 1 < self.size,
            Move::Left => self.col > 0,
        }
    }

    /// Legal blank moves in the order down, up, right, left.
    pub fn legal_moves(&self) -> Vec<Move> {
        Move::ALL
            .iter()
            .copied()
            .filter(|&m| self.can_move(m))
            .collect()
    }

    /// Slides the blank one cell. Returns `false` and leaves the board as is
    /// when the blank sits on the corresponding edge.
    pub fn apply_move(&mut self, movement: Move) -> bool {
        if !self.can_move(movement) {
            return false;
        }
        let (dr, dc) = movement.as_offset();
        let new_row = (self.row as isize + dr) as usize;
        let new_col = (self.col as isize + dc) as usize;

        self.grid[self.row][self.col] = self.grid[new_row][new_col];
        self.grid[new_row][new_col] = 0;

        self.row = new_row;
        self.col = new_col;
        true
    }

    pub fn try_move(&self, movement: Move) -> Option<Self> {
        let mut new_board = self.clone();
        if new_board.apply_move(movement) {
            Some(new_board)
        } else {
            None
        }
    }

    /// Each legal successor paired with the move that produced it.
    pub fn successors(&self) -> Vec<(Move, Board)> {
        self.legal_moves()
            .into_iter()
            .filter_map(|m| self.try_move(m).map(|b| (m, b)))
            .collect()
    }

    pub fn generate_neighbors(&self) -> Vec<Board> {
        self.successors().into_iter().map(|(_, b)| b).collect()
    }

    pub fn is_solvable(&self) -> bool {
        let flattened: Vec<u32> = self.cells().collect();
        let inversions = count_inversions(&flattened);

        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            // Each vertical move flips inversion parity and the blank row
            // parity together; the goal has both at zero.
            (inversions + self.row) % 2 == 0
        }
    }
}

fn check_size(size: usize) -> PuzzleResult<()> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(BoardDefect::UnsupportedSize(size).into())
    }
}

fn locate_blank(grid: &[Vec<u32>]) -> (usize, usize) {
    for (i, row) in grid.iter().enumerate() {
        for (j, &cell) in row.iter().enumerate() {
            if cell == 0 {
                return (i, j);
            }
        }
    }
    (0, 0)
}

fn count_inversions(flattened: &[u32]) -> usize {
    flattened
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            flattened[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.grid.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, val) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", val)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;
    use rand::{rngs::StdRng, SeedableRng};

    fn board(grid: [[u32; 3]; 3]) -> Board {
        Board::new(grid.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn corner_blank_has_two_neighbors() {
        let b = board([[1, 2, 0], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(b.get_blank_position(), (0, 2));
        assert_eq!(b.legal_moves(), vec![Move::Down, Move::Left]);

        let neighbors = b.generate_neighbors();
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0], board([[1, 2, 5], [3, 4, 0], [6, 7, 8]]));
        assert_eq!(neighbors[1], board([[1, 0, 2], [3, 4, 5], [6, 7, 8]]));
    }

    #[test]
    fn centre_blank_keeps_fixed_order() {
        let b = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        let moves: Vec<Move> = b.successors().into_iter().map(|(m, _)| m).collect();
        assert_eq!(moves, Move::ALL.to_vec());
    }

    #[test]
    fn neighbors_differ_in_two_adjacent_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let b = Board::random(3, &mut rng).unwrap();
            let neighbors = b.generate_neighbors();
            assert!((2..=4).contains(&neighbors.len()));
            let (br, bc) = b.get_blank_position();
            for n in &neighbors {
                let diff: Vec<(usize, usize)> = (0..3)
                    .flat_map(|i| (0..3).map(move |j| (i, j)))
                    .filter(|&(i, j)| b.get(i, j) != n.get(i, j))
                    .collect();
                assert_eq!(diff.len(), 2);
                assert!(diff.contains(&(br, bc)));
                let (a, c) = (diff[0], diff[1]);
                assert_eq!(a.0.abs_diff(c.0) + a.1.abs_diff(c.1), 1);
            }
        }
    }

    #[test]
    fn opposite_move_restores_board() {
        let b = board([[4, 1, 2], [3, 0, 5], [6, 7, 8]]);
        for (m, n) in b.successors() {
            assert_eq!(n.try_move(m.opposite()).as_ref(), Some(&b));
        }
    }

    #[test]
    fn apply_move_on_edge_is_rejected() {
        let mut b = Board::goal(3).unwrap();
        let before = b.clone();
        assert!(!b.apply_move(Move::Up));
        assert!(!b.apply_move(Move::Left));
        assert_eq!(b, before);
    }

    #[test]
    fn key_is_row_major_packing() {
        let b = Board::goal(2).unwrap();
        assert_eq!(b.key(), BoardKey(0x0123));
        let other = board([[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        assert_ne!(Board::goal(3).unwrap().key(), other.key());
    }

    #[test]
    fn display_is_space_separated_rows() {
        let b = Board::goal(3).unwrap();
        assert_eq!(b.to_string(), "0 1 2\n3 4 5\n6 7 8");
    }

    #[test]
    fn rejects_invalid_grids() {
        let dup = Board::new(vec![vec![0, 1, 1], vec![3, 4, 5], vec![6, 7, 8]]);
        assert_eq!(
            dup.unwrap_err(),
            PuzzleError::InvalidBoard(BoardDefect::Duplicate(1))
        );

        let ragged = Board::new(vec![vec![0, 1, 2], vec![3, 4], vec![5, 6, 7]]);
        assert!(matches!(
            ragged,
            Err(PuzzleError::InvalidBoard(BoardDefect::NotSquare { row: 1, .. }))
        ));

        let big = Board::new(vec![vec![0, 9, 2], vec![3, 4, 5], vec![6, 7, 8]]);
        assert!(matches!(
            big,
            Err(PuzzleError::InvalidBoard(BoardDefect::OutOfRange { value: 9, .. }))
        ));

        assert_eq!(
            Board::goal(5).unwrap_err(),
            PuzzleError::InvalidBoard(BoardDefect::UnsupportedSize(5))
        );
    }

    #[test]
    fn oversized_boards_are_rejected_before_allocating() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            Board::random(65536, &mut rng).unwrap_err(),
            PuzzleError::InvalidBoard(BoardDefect::UnsupportedSize(65536))
        );
        assert_eq!(
            Board::goal(1usize << 33).unwrap_err(),
            PuzzleError::InvalidBoard(BoardDefect::UnsupportedSize(1usize << 33))
        );
        assert_eq!(
            Board::random_solvable(1, &mut rng).unwrap_err(),
            PuzzleError::InvalidBoard(BoardDefect::UnsupportedSize(1))
        );
        assert_eq!(
            Board::goal(0).unwrap_err(),
            PuzzleError::InvalidBoard(BoardDefect::UnsupportedSize(0))
        );
    }

    #[test]
    fn solvability_parity() {
        assert!(Board::goal(3).unwrap().is_solvable());
        assert!(!board([[0, 2, 1], [3, 4, 5], [6, 7, 8]]).is_solvable());
        assert!(Board::goal(4).unwrap().is_solvable());

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            assert!(Board::random_solvable(4, &mut rng).unwrap().is_solvable());
        }
    }

    #[test]
    fn solvability_tracks_moves_on_even_boards() {
        let mut b = Board::goal(4).unwrap();
        for m in [Move::Down, Move::Right, Move::Down, Move::Left, Move::Up] {
            assert!(b.apply_move(m));
            assert!(b.is_solvable());
        }
    }
}
