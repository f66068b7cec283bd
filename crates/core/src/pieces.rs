//! Pieces module - Tetromino shapes and rigid transforms
//!
//! Every kind has four rotation states of four block offsets relative to the
//! piece anchor; O has a single state used for every rotation. Offsets may be
//! negative, so a piece anchored at y = 0 can have blocks above the board.
//!
//! Transforms never check legality; the engine asks the board.

use crate::types::{PieceKind, Position, BOARD_WIDTH};

/// Offset of a single block relative to the piece anchor
pub type BlockOffset = (i32, i32);

/// Shape of a piece - 4 block offsets from the anchor
pub type PieceShape = [BlockOffset; 4];

/// Number of rotation states
pub const ROTATIONS: u8 = 4;

/// Anchor for newly spawned pieces
pub const SPAWN_POSITION: Position = Position::new(BOARD_WIDTH as i32 / 2 - 1, 0);

const I_SHAPES: [PieceShape; 4] = [
    [(-1, 0), (0, 0), (1, 0), (2, 0)],
    [(1, -1), (1, 0), (1, 1), (1, 2)],
    [(-1, 1), (0, 1), (1, 1), (2, 1)],
    [(0, -1), (0, 0), (0, 1), (0, 2)],
];

const O_SHAPES: [PieceShape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const T_SHAPES: [PieceShape; 4] = [
    [(0, 0), (-1, 0), (1, 0), (0, -1)],
    [(0, 0), (0, -1), (0, 1), (1, 0)],
    [(0, 0), (-1, 0), (1, 0), (0, 1)],
    [(0, 0), (0, -1), (0, 1), (-1, 0)],
];

// S and Z only have two distinct states; 2 and 3 repeat 0 and 1.
const S_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (0, 1), (-1, 1)],
    [(0, 0), (0, -1), (1, 0), (1, 1)],
    [(0, 0), (1, 0), (0, 1), (-1, 1)],
    [(0, 0), (0, -1), (1, 0), (1, 1)],
];

const Z_SHAPES: [PieceShape; 4] = [
    [(0, 0), (-1, 0), (0, 1), (1, 1)],
    [(0, 0), (1, -1), (1, 0), (0, 1)],
    [(0, 0), (-1, 0), (0, 1), (1, 1)],
    [(0, 0), (1, -1), (1, 0), (0, 1)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (-1, 0), (1, 0), (-1, -1)],
    [(0, 0), (0, -1), (0, 1), (1, -1)],
    [(0, 0), (-1, 0), (1, 0), (1, 1)],
    [(0, 0), (0, -1), (0, 1), (-1, 1)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(0, 0), (-1, 0), (1, 0), (1, -1)],
    [(0, 0), (0, -1), (0, 1), (1, 1)],
    [(0, 0), (-1, 0), (1, 0), (-1, 1)],
    [(0, 0), (0, -1), (0, 1), (-1, -1)],
];

/// All rotation states for a piece kind
pub fn shapes(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

/// Get the shape (block offsets) for a piece kind and rotation index
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    if kind == PieceKind::O {
        return O_SHAPES[0];
    }
    let table = shapes(kind);
    table[rotation as usize % table.len()]
}

/// Active or preview piece: kind, anchor and rotation index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    kind: PieceKind,
    position: Position,
    rotation: u8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, SPAWN_POSITION, 0)
    }

    /// Create a tetromino at an explicit anchor and rotation
    pub fn at(kind: PieceKind, position: Position, rotation: u8) -> Self {
        Self {
            kind,
            position,
            rotation: rotation % ROTATIONS,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Rotation index in `0..4`; O always reports 0
    pub fn rotation(&self) -> u8 {
        if self.kind == PieceKind::O {
            0
        } else {
            self.rotation
        }
    }

    /// Block offsets relative to the anchor
    pub fn blocks(&self) -> [Position; 4] {
        get_shape(self.kind, self.rotation).map(|(dx, dy)| Position::new(dx, dy))
    }

    /// Block positions on the board (may be off-board)
    pub fn absolute_blocks(&self) -> [Position; 4] {
        get_shape(self.kind, self.rotation).map(|(dx, dy)| self.position.translated(dx, dy))
    }

    /// Copy rotated by a quarter turn; O is returned unchanged
    pub fn rotated(&self, clockwise: bool) -> Self {
        if self.kind == PieceKind::O {
            return *self;
        }
        let rotation = if clockwise {
            (self.rotation + 1) % ROTATIONS
        } else {
            (self.rotation + ROTATIONS - 1) % ROTATIONS
        };
        Self { rotation, ..*self }
    }

    /// Copy with the anchor translated
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.translated(dx, dy),
            ..*self
        }
    }
}
