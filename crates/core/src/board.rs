//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Storage is a fixed 2D array indexed `[row][col]`, so it never allocates.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (y < 0) do not exist; pieces may overlap them only while
//! spawning or rotating near the top.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{Cell, Grid, Position, Row, BOARD_HEIGHT, BOARD_WIDTH};

/// Row indices returned by [`Board::full_lines`]
pub type FullLines = ArrayVec<usize, BOARD_HEIGHT>;

const EMPTY_ROW: Row = [None; BOARD_WIDTH];

/// The game board - 10 columns x 20 rows
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: Grid,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            rows: [EMPTY_ROW; BOARD_HEIGHT],
        }
    }

    /// Get width of the board
    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Check if position lies on the board
    pub fn is_position_valid(&self, pos: Position) -> bool {
        pos.x >= 0 && (pos.x as usize) < BOARD_WIDTH && pos.y >= 0 && (pos.y as usize) < BOARD_HEIGHT
    }

    /// Check if position is on the board and empty
    pub fn is_cell_empty(&self, pos: Position) -> bool {
        self.is_position_valid(pos) && self.rows[pos.y as usize][pos.x as usize].is_none()
    }

    /// Get cell at position; off-board positions read as empty
    pub fn cell(&self, pos: Position) -> Cell {
        if !self.is_position_valid(pos) {
            return None;
        }
        self.rows[pos.y as usize][pos.x as usize]
    }

    /// Set cell at position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        if !self.is_position_valid(pos) {
            return false;
        }
        self.rows[pos.y as usize][pos.x as usize] = cell;
        true
    }

    /// Check whether a piece fits
    ///
    /// Blocks above the board are accepted regardless of x; every other block
    /// must be on the board and empty.
    pub fn can_place(&self, piece: &Tetromino) -> bool {
        piece
            .absolute_blocks()
            .iter()
            .all(|&block| block.y < 0 || self.is_cell_empty(block))
    }

    /// Cement a piece into the grid
    ///
    /// Blocks that are off the board (including above it) are skipped.
    pub fn place(&mut self, piece: &Tetromino) {
        for block in piece.absolute_blocks() {
            self.set(block, Some(piece.kind()));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Indices of every full row, top to bottom
    pub fn full_lines(&self) -> FullLines {
        (0..BOARD_HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove all full rows and return how many were removed
    ///
    /// Remaining rows keep their order and settle at the bottom; empty rows
    /// fill the top. Two-pointer compaction, no allocation.
    pub fn clear_lines(&mut self) -> usize {
        let mut write_y = BOARD_HEIGHT;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                self.rows[write_y] = self.rows[read_y];
            }
        }

        // Everything above the last kept row is new and empty
        for row in &mut self.rows[..write_y] {
            *row = EMPTY_ROW;
        }

        write_y
    }

    /// Read-only view of the grid for rendering
    pub fn rows(&self) -> &Grid {
        &self.rows
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.rows = [EMPTY_ROW; BOARD_HEIGHT];
    }

    /// Build a board from a grid (test setups, replays)
    pub fn from_rows(rows: Grid) -> Self {
        Self { rows }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn fill_row(board: &mut Board, y: i32, kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i32 {
            board.set(Position::new(x, y), Some(kind));
        }
    }

    #[test]
    fn test_position_validity_bounds() {
        let board = Board::new();
        for y in -3..BOARD_HEIGHT as i32 + 3 {
            for x in -3..BOARD_WIDTH as i32 + 3 {
                let expected = (0..10).contains(&x) && (0..20).contains(&y);
                assert_eq!(board.is_position_valid(Position::new(x, y)), expected);
            }
        }
    }

    #[test]
    fn test_cell_empty_false_off_board() {
        let board = Board::new();
        assert!(board.is_cell_empty(Position::new(0, 0)));
        assert!(!board.is_cell_empty(Position::new(-1, 0)));
        assert!(!board.is_cell_empty(Position::new(0, 20)));
    }

    #[test]
    fn test_clear_lines_returns_removed_count() {
        let mut board = Board::new();
        fill_row(&mut board, 19, PieceKind::I);
        fill_row(&mut board, 17, PieceKind::J);
        board.set(Position::new(4, 18), Some(PieceKind::T));

        assert_eq!(board.full_lines().as_slice(), &[17, 19]);
        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.cell(Position::new(4, 19)), Some(PieceKind::T));
        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.clear_lines(), 0);
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let mut rows = [[None; BOARD_WIDTH]; BOARD_HEIGHT];
        rows[5][3] = Some(PieceKind::O);
        rows[10][7] = Some(PieceKind::L);

        let board = Board::from_rows(rows);
        assert_eq!(board.rows(), &rows);
        assert_eq!(board.cell(Position::new(3, 5)), Some(PieceKind::O));
    }
}
