//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget toolkits and renders into a plain framebuffer that is flushed to the
//! terminal as a diff.
//!
//! - [`game_view`]: pure snapshot-to-framebuffer drawing (unit-testable)
//! - [`fb`]: the framebuffer and style types
//! - [`renderer`]: crossterm output with changed-run diffing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tetrix_core as core;
pub use tetrix_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_rgb, GameView, PanelInfo, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
