//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the game rules, state machine, and simulation clock.
//! It has no dependencies on terminals or I/O:
//!
//! - **Deterministic**: time advances only through [`Engine::update`] and
//!   pieces come from an injected [`PieceGenerator`], so a seed replays a game
//! - **Testable**: every rule has unit tests against scripted piece sequences
//! - **Portable**: the same engine backs the terminal front-end and headless runs
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision checks and line removal
//! - [`pieces`]: tetromino shape tables and rigid transforms
//! - [`rng`]: seeded uniform randomizer and the generator trait
//! - [`scoring`]: points, levels and gravity speed
//! - [`engine`]: the game state machine
//! - [`snapshot`]: read-only copies for rendering
//! - [`shared`]: engine behind a mutex with a FIFO input queue
//!
//! # Game Rules
//!
//! - **Uniform Randomizer**: every piece is an independent draw; no bag
//! - **Simple Rotation**: clockwise only, wall kicks try -1, +1, -2, +2 columns
//! - **Immediate Lock**: a piece locks as soon as it cannot move down
//! - **Ghost Piece**: shows where the current piece will land
//! - **Line-Clear Hold**: full rows flash and fade before they are removed
//! - **Scoring**: 100/300/500/800 times the level, plus 2 per hard-dropped row
//!
//! # Example
//!
//! ```
//! use tetrix_core::Engine;
//! use tetrix_core::types::{GameStatus, InputCommand};
//!
//! let mut game = Engine::new(12345);
//!
//! game.apply(InputCommand::MoveRight);
//! game.apply(InputCommand::Rotate);
//! let rows = game.hard_drop();
//!
//! assert!(rows > 0);
//! assert_eq!(game.score(), rows * 2);
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```
//!
//! # Timing
//!
//! - **Tick Rate**: hosts typically call `update` every 16ms
//! - **Gravity**: 910ms per row at level 1, 90ms faster per level, 100ms floor
//! - **Clear Hold**: 350ms flash then 250ms fade

pub mod board;
pub mod engine;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod shared;
pub mod snapshot;

pub use tetrix_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, FullLines};
pub use engine::{Engine, EngineConfig, LineClear, Phase, WALL_KICKS};
pub use pieces::{get_shape, Tetromino};
pub use rng::{PieceGenerator, SequenceGenerator, SimpleRng, UniformRandomizer};
pub use scoring::{drop_interval_ms, hard_drop_points, level_for_lines, line_clear_points};
pub use shared::SharedEngine;
pub use snapshot::{ClearProgress, GameSnapshot};
