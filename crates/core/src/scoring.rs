//! Scoring module - collapse points and fall speed
//!
//! Points depend only on how many rows one lock cleared. There is no level
//! multiplier and no combo. Speed increases a little with every locked piece.

/// Points for clearing `rows` rows at once. Counts outside the table score 0.
pub fn collapse_score(rows: u32, table: &[u32]) -> u32 {
    if rows == 0 {
        return 0;
    }
    table.get(rows as usize).copied().unwrap_or(0)
}

/// Fall interval after one more lock: divided by `factor`, never below `min_ms`.
pub fn tighten_drop_interval(current_ms: f64, factor: f64, min_ms: f64) -> f64 {
    if current_ms > min_ms {
        (current_ms / factor).max(min_ms)
    } else {
        min_ms
    }
}

/// Fall clock value at which the piece moves down.
///
/// Holding soft drop skips `soft_drop_factor` of the interval.
pub fn fall_threshold(interval_ms: f64, soft_drop: bool, soft_drop_factor: f64) -> f64 {
    if soft_drop {
        interval_ms * (1.0 - soft_drop_factor)
    } else {
        interval_ms
    }
}
