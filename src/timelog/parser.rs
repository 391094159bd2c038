//! Clock-time and task-marker extraction from a single log line.

use crate::{AppError, Result};

use super::{ClockTime, CLOCK_MINUTE_LIMIT};

/// Width of the leading `HHMM` field.
const TIME_FIELD_LEN: usize = 4;

/// Read the leading `HHMM` field of `line`.
///
/// The hour component is not checked here; [`compute_duration`] rejects
/// out-of-range values.
///
/// [`compute_duration`]: super::compute_duration
///
/// # Errors
///
/// Returns `AppError::Parse` if the line is shorter than four characters,
/// the field is not an integer, the value is negative, or its minutes
/// component exceeds 59.
pub fn parse_time(line: &str) -> Result<ClockTime> {
    let field = line
        .get(..TIME_FIELD_LEN)
        .ok_or_else(|| AppError::Parse(format!("line too short for a time: {line:?}")))?;

    let num: ClockTime = field
        .parse()
        .map_err(|err| AppError::Parse(format!("invalid time {field:?}: {err}")))?;

    if num < 0 {
        return Err(AppError::Parse(format!("negative time read: {num}")));
    }

    let minute = num % 100;
    if minute > CLOCK_MINUTE_LIMIT {
        return Err(AppError::Parse(format!("minute greater than 59: {minute}")));
    }

    Ok(num)
}

/// Extract the `PREFIX-<digits>` task id marked as `#PREFIX-<digits>`.
///
/// The marker is found by plain substring search, so `FooBar#BLAH-103` still
/// matches. It must be followed by a space, and the character before that
/// space must be a digit. Returns `None` when any of this does not hold.
#[must_use]
pub fn parse_card(line: &str, prefix: &str) -> Option<String> {
    let marker = format!("#{prefix}");
    let idx = line.find(&marker)?;
    let last_idx = idx + line[idx..].find(' ')?;

    if !line.as_bytes()[last_idx - 1].is_ascii_digit() {
        return None;
    }

    Some(line[idx + 1..last_idx].to_owned())
}
