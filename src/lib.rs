//! Tetrix (workspace facade crate).
//!
//! Re-exports the workspace crates as `tetrix::{core, input, settings, term, types}`
//! so the binary, integration tests and benches share one import path.

pub use tetrix_core as core;
pub use tetrix_input as input;
pub use tetrix_settings as settings;
pub use tetrix_term as term;
pub use tetrix_types as types;
