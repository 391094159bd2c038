//! Per-task results handed between pipeline stages.

use crate::timelog::{minutes_to_hours, seconds_to_hours, ClockTime, DurationMinutes};

/// A confirmed task waiting to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    /// Task the worklog is recorded against.
    pub task: String,
    /// Minutes to log.
    pub minutes: DurationMinutes,
    /// Clock time the task was first started today.
    pub first_start: ClockTime,
}

/// Result of the upload stage.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadStatus {
    /// The tracker accepted the worklog.
    Uploaded {
        /// Task the worklog was recorded against.
        task: String,
        /// Hours just logged.
        confirmed_hours: f64,
        /// Tracker status text.
        status: String,
    },
    /// The upload did not go through.
    Failed {
        /// Task the upload was for.
        task: String,
        /// Human-readable reason.
        message: String,
    },
}

/// Final result of one task's pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    /// Worklog uploaded and the task's running total fetched.
    Success {
        /// Task the worklog was recorded against.
        task: String,
        /// Hours just logged.
        confirmed_hours: f64,
        /// Seconds on record for the task after the upload.
        total_logged_seconds: u64,
    },
    /// Upload or total fetch failed.
    Failure {
        /// Task the pipeline ran for.
        task: String,
        /// Human-readable reason.
        message: String,
    },
}

impl UploadJob {
    /// Hours this job logs.
    #[must_use]
    pub fn hours(&self) -> f64 {
        minutes_to_hours(self.minutes)
    }
}

impl UploadOutcome {
    /// Task this outcome belongs to.
    #[must_use]
    pub fn task(&self) -> &str {
        match self {
            Self::Success { task, .. } | Self::Failure { task, .. } => task,
        }
    }

    /// The single console line reported for this task.
    #[must_use]
    pub fn report_line(&self) -> String {
        match self {
            Self::Failure { message, .. } => message.clone(),
            Self::Success {
                task,
                confirmed_hours,
                total_logged_seconds,
            } => format!(
                "{task:>10} {confirmed_hours:5.2} h uploaded, total spent = {:5.2} h",
                seconds_to_hours(*total_logged_seconds)
            ),
        }
    }
}
