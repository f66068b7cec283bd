//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::InputCommand`]s (plus the
//! front-end-only music toggle) and provides a held-key repeat handler suitable
//! for terminal environments, including terminals without key-release events.

pub mod handler;
pub mod map;

pub use tetrix_types as types;

pub use handler::{RepeatHandler, RepeatTiming};
pub use map::{map_key, should_quit, KeyAction};
