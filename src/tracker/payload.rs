//! Worklog request and response bodies.

use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::timelog::{ClockTime, DurationMinutes, SECONDS_PER_MINUTE};
use crate::{AppError, Result};

/// Timestamp layout the tracker accepts, e.g. `2021-01-17T12:34:00.000+0530`.
pub const STARTED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Body of `POST /issue/{task}/worklog`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorklogPayload {
    /// Start of the logged work.
    pub started: String,
    /// Logged duration.
    pub time_spent_seconds: u64,
}

impl WorklogPayload {
    /// Payload for `minutes` of work starting at `start` on `date` in `zone`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Range` if `start` is not a valid clock time or does
    /// not exist as a local time in `zone`.
    pub fn build(
        minutes: DurationMinutes,
        start: ClockTime,
        date: NaiveDate,
        zone: FixedOffset,
    ) -> Result<Self> {
        let (hour, minute) = (start / 100, start % 100);
        let time = u32::try_from(hour)
            .ok()
            .zip(u32::try_from(minute).ok())
            .and_then(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
            .ok_or_else(|| AppError::Range(format!("start-time {start} is invalid")))?;

        let started = zone
            .from_local_datetime(&date.and_time(time))
            .single()
            .ok_or_else(|| AppError::Range(format!("start-time {start} has no local time")))?;

        Ok(Self {
            started: started.format(STARTED_FORMAT).to_string(),
            time_spent_seconds: u64::from(minutes) * u64::from(SECONDS_PER_MINUTE),
        })
    }
}

/// Single entry of the worklog collection.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorklogEntry {
    /// Logged duration.
    #[serde(default)]
    pub time_spent_seconds: u64,
}

/// Body of `GET /issue/{task}/worklog`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct WorklogList {
    /// Every worklog recorded against the task.
    #[serde(default)]
    pub worklogs: Vec<WorklogEntry>,
}

impl WorklogList {
    /// Sum of `timeSpentSeconds` across all entries.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.worklogs.iter().map(|w| w.time_spent_seconds).sum()
    }
}
