//! Scoring module - line rewards, level and gravity derivation
//!
//! Level and gravity interval are pure functions of cumulative cleared lines:
//! - `level = 1 + lines / 10`
//! - `interval = max(120, 800 - (level - 1) * 70)` milliseconds

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, DROP_STEP_MS, LINES_PER_LEVEL, LINE_SCORES,
};

/// Points for clearing `lines` rows in one lock at `level`.
///
/// Clears larger than the table (impossible with 4-block pieces) score nothing.
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    LINE_SCORES
        .get(lines as usize)
        .map(|base| base.saturating_mul(level))
        .unwrap_or(0)
}

/// Level for a cumulative line count (starts at 1)
pub fn level_for_lines(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level, in milliseconds
pub fn drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_FLOOR_MS)
}
