//! Scoring module - points, levels and gravity speed
//!
//! - Line clears: `LINE_SCORES[n] * level`, with the level taken *before*
//!   the clear is counted.
//! - Hard drop: 2 points per row travelled, not level-scaled.
//! - Level: `lines / 10 + 1`.
//! - Gravity: `max(100, 1000 - min(level, 10) * 90)` ms per row.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, HARD_DROP_POINTS_PER_ROW, LINES_PER_LEVEL,
    LINE_SCORES, SPEED_LEVEL_CAP,
};

/// Points for clearing `lines` rows at `level`
///
/// Clears of more than four rows score as four.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    LINE_SCORES[lines.min(4)].saturating_mul(level)
}

/// Bonus for a hard drop of `distance` rows
pub fn hard_drop_points(distance: u32) -> u32 {
    distance.saturating_mul(HARD_DROP_POINTS_PER_ROW)
}

/// Level reached after clearing `lines` in total
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Milliseconds between gravity steps at `level`
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.min(SPEED_LEVEL_CAP) * DROP_STEP_MS;
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}
