//! Single-pass accumulation of per-task minutes from consecutive lines.

use std::collections::HashMap;

use tracing::debug;

use crate::Result;

use super::{compute_duration, parse_card, parse_time, ClockTime, DurationMinutes};

/// Running total for one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTotal {
    /// Sum of every interval attributed to the task.
    pub total_minutes: DurationMinutes,
    /// Start of the first interval seen for the task; never overwritten.
    pub first_start: ClockTime,
}

/// One line pair attributed to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    /// Clock time of the line carrying the task marker.
    pub start: ClockTime,
    /// Clock time of the following line.
    pub end: ClockTime,
    /// Task the interval is attributed to.
    pub task: String,
    /// Length of the interval.
    pub minutes: DurationMinutes,
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Attributed intervals in log order.
    pub intervals: Vec<Interval>,
    /// Per-task totals keyed by task id.
    pub totals: HashMap<String, TaskTotal>,
}

impl Aggregation {
    /// Totals ordered by first start time, then task id.
    #[must_use]
    pub fn sorted_totals(&self) -> Vec<(&str, TaskTotal)> {
        let mut totals: Vec<(&str, TaskTotal)> = self
            .totals
            .iter()
            .map(|(task, total)| (task.as_str(), *total))
            .collect();
        totals.sort_by(|a, b| a.1.first_start.cmp(&b.1.first_start).then(a.0.cmp(b.0)));
        totals
    }

    /// Whether no interval was attributed to any task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Walk `(line[i], line[i + 1])` pairs and total the minutes per task.
///
/// The task marker is read from the first line of each pair only. Pairs
/// whose first line carries no marker are skipped. The last line only ever
/// closes an interval.
///
/// # Errors
///
/// Returns `AppError::Parse` for a malformed timestamp on any line that
/// takes part in a pair, and `AppError::Range` for an invalid interval.
/// Either aborts the whole pass.
pub fn aggregate<S: AsRef<str>>(lines: &[S], prefix: &str) -> Result<Aggregation> {
    let mut aggregation = Aggregation::default();

    for pair in lines.windows(2) {
        let (first, second) = (pair[0].as_ref(), pair[1].as_ref());
        let start = parse_time(first)?;
        let end = parse_time(second)?;

        let Some(task) = parse_card(first, prefix) else {
            continue;
        };

        let minutes = compute_duration(start, end)?;
        debug!(task = %task, start, end, minutes, "interval attributed");

        aggregation
            .totals
            .entry(task.clone())
            .or_insert(TaskTotal {
                total_minutes: 0,
                first_start: start,
            })
            .total_minutes += minutes;

        aggregation.intervals.push(Interval {
            start,
            end,
            task,
            minutes,
        });
    }

    Ok(aggregation)
}

/// Split raw log text into lines the way [`aggregate`] expects.
///
/// Surrounding whitespace of the whole text is trimmed and each line loses
/// a trailing carriage return.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
