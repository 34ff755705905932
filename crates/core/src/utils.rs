//! Small time helpers shared by the derivation layer.

use chrono::NaiveDateTime;

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Whole days from `now` until `target`, rounded up (ceiling).
///
/// A target earlier today still counts as day 0; anything at least a full
/// day in the past goes negative.
pub fn days_until(now: NaiveDateTime, target: NaiveDateTime) -> i64 {
    ceil_div(target.signed_duration_since(now).num_seconds(), SECS_PER_DAY)
}

/// 30-day months from `now` until `target`, rounded up.
pub fn months_until(now: NaiveDateTime, target: NaiveDateTime) -> i64 {
    ceil_div(
        target.signed_duration_since(now).num_seconds(),
        30 * SECS_PER_DAY,
    )
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    if numerator > 0 && numerator % denominator != 0 {
        numerator / denominator + 1
    } else {
        numerator / denominator
    }
}
