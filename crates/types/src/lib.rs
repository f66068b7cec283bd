//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the terminal front-end and the settings layer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn anchor**: (4, 0); pieces may poke above the board (y < 0) while spawning
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed simulation step (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval before level scaling |
//! | `DROP_STEP_MS` | 90 | Gravity speed-up per level |
//! | `SPEED_LEVEL_CAP` | 10 | Levels past this do not fall faster |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity floor |
//! | `CLEAR_FLASH_MS` | 350 | Line-clear flash phase |
//! | `CLEAR_FADE_MS` | 250 | Line-clear fade phase |
//!
//! # Drop Intervals by Level
//!
//! `max(100, 1000 - min(level, 10) * 90)`:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 910ms |
//! | 2 | 820ms |
//! | 5 | 550ms |
//! | 10+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use tetrix_types::{InputCommand, PieceKind, Position, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(PieceKind::from_str("t"), Some(piece));
//! assert_eq!(piece.color(), "purple");
//!
//! let p = Position::new(4, 0).translated(1, 2);
//! assert_eq!(p, Position::new(5, 2));
//!
//! assert_eq!(InputCommand::from_str("hardDrop"), Some(InputCommand::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval before any level scaling (1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const DROP_STEP_MS: u32 = 90;

/// Level at which gravity stops speeding up
pub const SPEED_LEVEL_CAP: u32 = 10;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Flash phase of the line-clear animation
pub const CLEAR_FLASH_MS: u32 = 350;

/// Fade phase of the line-clear animation, following the flash
pub const CLEAR_FADE_MS: u32 = 250;

/// Held soft-drop: delay before auto-repeat starts
pub const DOWN_REPEAT_DELAY_MS: u32 = 120;

/// Held soft-drop: interval between repeats
pub const DOWN_REPEAT_MS: u32 = 20;

/// Held horizontal movement: delay before auto-repeat starts
pub const HORIZONTAL_REPEAT_DELAY_MS: u32 = 150;

/// Held horizontal movement: interval between repeats
pub const HORIZONTAL_REPEAT_MS: u32 = 30;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per row travelled by a hard drop (not level-scaled)
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Line clear scoring table
///
/// Base points for clearing N lines, multiplied by the current level:
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
///
/// More than four lines score as four.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// Integer board coordinate
///
/// `x` grows to the right, `y` grows downwards. Negative `y` is above the
/// visible board, which is where freshly spawned pieces may stick out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a new position offset by `(dx, dy)`
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// Every kind, in declaration order (used by the randomizer)
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrix_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Semantic display color; front-ends map it to their own palette
    pub fn color(&self) -> &'static str {
        match self {
            PieceKind::I => "cyan",
            PieceKind::O => "yellow",
            PieceKind::T => "purple",
            PieceKind::S => "green",
            PieceKind::Z => "red",
            PieceKind::J => "blue",
            PieceKind::L => "orange",
        }
    }
}

/// Top-level game status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }
}

/// Discrete commands the engine accepts
///
/// This is the whole vocabulary; keyboard and gamepad translation happens in
/// the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputCommand {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    MoveDown,
    /// Rotate piece 90° clockwise (with wall kicks)
    Rotate,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Restart the game
    Reset,
}

impl InputCommand {
    pub const ALL: [InputCommand; 7] = [
        InputCommand::MoveLeft,
        InputCommand::MoveRight,
        InputCommand::MoveDown,
        InputCommand::Rotate,
        InputCommand::HardDrop,
        InputCommand::Pause,
        InputCommand::Reset,
    ];

    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrix_types::InputCommand;
    ///
    /// assert_eq!(InputCommand::from_str("moveLeft"), Some(InputCommand::MoveLeft));
    /// assert_eq!(InputCommand::from_str("ROTATE"), Some(InputCommand::Rotate));
    /// assert_eq!(InputCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(InputCommand::MoveLeft),
            "moveright" => Some(InputCommand::MoveRight),
            "movedown" => Some(InputCommand::MoveDown),
            "rotate" => Some(InputCommand::Rotate),
            "harddrop" => Some(InputCommand::HardDrop),
            "pause" => Some(InputCommand::Pause),
            "reset" => Some(InputCommand::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            InputCommand::MoveLeft => "moveLeft",
            InputCommand::MoveRight => "moveRight",
            InputCommand::MoveDown => "moveDown",
            InputCommand::Rotate => "rotate",
            InputCommand::HardDrop => "hardDrop",
            InputCommand::Pause => "pause",
            InputCommand::Reset => "reset",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// One board row, left to right
pub type Row = [Cell; BOARD_WIDTH];

/// The whole grid, indexed `[row][col]` with row 0 at the top
pub type Grid = [Row; BOARD_HEIGHT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(BASE_DROP_MS, 1000);
        assert_eq!(DROP_INTERVAL_MIN_MS, 100);
        assert_eq!(CLEAR_FLASH_MS + CLEAR_FADE_MS, 600);
        assert_eq!(BASE_DROP_MS - SPEED_LEVEL_CAP * DROP_STEP_MS, DROP_INTERVAL_MIN_MS);
    }

    #[test]
    fn position_translation_is_by_value() {
        let p = Position::new(3, -1);
        let q = p.translated(-2, 5);
        assert_eq!(p, Position::new(3, -1));
        assert_eq!(q, Position::new(1, 4));
    }

    #[test]
    fn input_command_round_trips_through_names() {
        for cmd in InputCommand::ALL {
            assert_eq!(InputCommand::from_str(cmd.as_str()), Some(cmd));
        }
        assert_eq!(InputCommand::from_str("jump"), None);
    }
}
