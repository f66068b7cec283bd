//! Snapshot module - read-only copy of everything a renderer needs

use crate::board::FullLines;
use crate::pieces::Tetromino;
use crate::types::{GameStatus, Grid, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Progress through the two phases of a line-clear animation
///
/// Both values run 0.0..=1.0. The fade starts once the flash is complete.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClearProgress {
    pub flash: f32,
    pub fade: f32,
}

impl ClearProgress {
    /// Progress after `elapsed_ms` of a `flash_ms` + `fade_ms` animation
    pub fn at(elapsed_ms: u64, flash_ms: u32, fade_ms: u32) -> Self {
        let flash_ms = flash_ms as u64;
        if elapsed_ms < flash_ms {
            return Self {
                flash: elapsed_ms as f32 / flash_ms as f32,
                fade: 0.0,
            };
        }
        let into_fade = elapsed_ms - flash_ms;
        let fade = if fade_ms == 0 {
            1.0
        } else {
            (into_fade as f32 / fade_ms as f32).min(1.0)
        };
        Self { flash: 1.0, fade }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: Grid,
    pub current: Option<Tetromino>,
    pub ghost: Option<Tetromino>,
    pub next: Tetromino,
    pub next_next: Tetromino,
    pub status: GameStatus,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub clearing_rows: FullLines,
    pub clear_started_at_ms: Option<u64>,
    pub clear_progress: Option<ClearProgress>,
    pub clock_ms: u64,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Playing with a piece under control (not paused, over or clearing)
    pub fn is_playable(&self) -> bool {
        self.playable() && self.current.is_some()
    }

    pub fn is_row_clearing(&self, y: usize) -> bool {
        self.clearing_rows.contains(&y)
    }

    /// Cell contents including the falling piece, for renderers that
    /// draw the composed field
    pub fn composed_cell(&self, x: usize, y: usize) -> Option<PieceKind> {
        if x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
            return None;
        }
        if let Some(piece) = self.current {
            let hit = piece
                .absolute_blocks()
                .iter()
                .any(|b| b.x == x as i32 && b.y == y as i32);
            if hit {
                return Some(piece.kind());
            }
        }
        self.board[y][x]
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
            current: None,
            ghost: None,
            next: Tetromino::new(PieceKind::I),
            next_next: Tetromino::new(PieceKind::I),
            status: GameStatus::Playing,
            score: 0,
            lines: 0,
            level: 1,
            clearing_rows: FullLines::new(),
            clear_started_at_ms: None,
            clear_progress: None,
            clock_ms: 0,
            drop_interval_ms: 0,
        }
    }
}
