//! Elapsed minutes between two same-day clock times.

use crate::{AppError, Result};

use super::{ClockTime, DurationMinutes, CLOCK_MINUTE_LIMIT, MAX_CLOCK_TIME, MINS_PER_HOUR};

/// Minutes from `start` to `end`, both `HHMM` values on the same day.
///
/// There is no wraparound across midnight: `start` must not come after
/// `end`.
///
/// # Errors
///
/// Returns `AppError::Range` if `start > end`, if either value lies outside
/// `[0, 2359]`, or if either minutes component exceeds 59.
pub fn compute_duration(start: ClockTime, end: ClockTime) -> Result<DurationMinutes> {
    if start > end {
        return Err(AppError::Range(format!(
            "start-time {start} must be at most equal to end-time {end}"
        )));
    }

    if !(0..=MAX_CLOCK_TIME).contains(&start) {
        return Err(AppError::Range(format!("start-time {start} is invalid")));
    }

    if !(0..=MAX_CLOCK_TIME).contains(&end) {
        return Err(AppError::Range(format!("end-time {end} is invalid")));
    }

    let (start_minutes, end_minutes) = (start % 100, end % 100);
    if start_minutes > CLOCK_MINUTE_LIMIT {
        return Err(AppError::Range(format!(
            "start-time {start} has invalid minutes of {start_minutes}"
        )));
    }

    if end_minutes > CLOCK_MINUTE_LIMIT {
        return Err(AppError::Range(format!(
            "end-time {end} has invalid minutes of {end_minutes}"
        )));
    }

    let hour = i64::from(MINS_PER_HOUR);
    let mut hours_between = i64::from(end / 100 - start / 100);
    let mut mins_till_hour = 0;
    if start_minutes != 0 {
        hours_between -= 1;
        mins_till_hour = hour - i64::from(start_minutes);
    }

    let total = mins_till_hour + hours_between * hour + i64::from(end_minutes);
    DurationMinutes::try_from(total)
        .map_err(|_| AppError::Range(format!("negative duration from {start} to {end}")))
}
