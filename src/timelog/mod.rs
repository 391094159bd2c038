//! Activity-log parsing and per-task time aggregation.
//!
//! Each log line starts with a 24-hour `HHMM` clock time. A line that also
//! carries a `#PREFIX-<digits>` marker opens an interval for that task,
//! closed by the next line's clock time.

pub mod aggregate;
pub mod duration;
pub mod parser;

pub use aggregate::{aggregate, split_lines, Aggregation, Interval, TaskTotal};
pub use duration::compute_duration;
pub use parser::{parse_card, parse_time};

/// Minutes in one hour.
pub const MINS_PER_HOUR: u32 = 60;

/// Seconds in one minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Largest valid `HHMM` clock value.
pub const MAX_CLOCK_TIME: ClockTime = 2359;

/// Largest valid minutes component of a clock value.
pub const CLOCK_MINUTE_LIMIT: ClockTime = 59;

/// Point in time within one day, encoded as `HHMM`.
///
/// Signed so that negative and out-of-range input stays representable
/// until it is rejected by validation.
pub type ClockTime = i32;

/// Elapsed whole minutes between two clock times.
pub type DurationMinutes = u32;

/// Convert minutes into fractional hours for display.
#[must_use]
pub fn minutes_to_hours(minutes: DurationMinutes) -> f64 {
    f64::from(minutes) / f64::from(MINS_PER_HOUR)
}

/// Convert seconds into fractional hours for display.
#[must_use]
pub fn seconds_to_hours(seconds: u64) -> f64 {
    // Worklog totals stay far below 2^52 seconds.
    #[allow(clippy::cast_precision_loss)]
    let seconds = seconds as f64;
    seconds / f64::from(SECONDS_PER_MINUTE * MINS_PER_HOUR)
}
