//! Confirmation-gated concurrent worklog upload.
//!
//! Every confirmed task runs its own three-stage chain:
//!
//! 1. **upload** — POST the worklog ([`upload_stage`]);
//! 2. **confirm** — fetch the task's running total ([`confirm_stage`]);
//! 3. **report** — format one console line and publish it on the shared
//!    result channel.
//!
//! Stages are separate tasks joined by one-shot channels, so a task's
//! stages run strictly in order while chains for different tasks overlap
//! freely. Report stages are spawned on a [`TaskTracker`]; the closer
//! returned by [`UploadPipeline::finish`] waits for the tracker to drain
//! and then drops the last result sender, which ends the printer's loop.

pub mod outcome;

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{info, warn};

use crate::tracker::{WorklogApi, WorklogPayload};

pub use outcome::{UploadJob, UploadOutcome, UploadStatus};

/// Fan-out point for confirmed tasks and owner of the merged result stream.
pub struct UploadPipeline {
    api: Arc<dyn WorklogApi>,
    date: NaiveDate,
    zone: FixedOffset,
    tracker: TaskTracker,
    results: mpsc::UnboundedSender<String>,
}

impl UploadPipeline {
    /// Create a pipeline stamping worklogs on `date` in `zone`.
    ///
    /// Returns the receiving end of the merged result stream. It yields one
    /// line per launched task and closes once [`finish`](Self::finish) has
    /// observed every report stage complete.
    #[must_use]
    pub fn new(
        api: Arc<dyn WorklogApi>,
        date: NaiveDate,
        zone: FixedOffset,
    ) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (results, rx) = mpsc::unbounded_channel();
        let pipeline = Self {
            api,
            date,
            zone,
            tracker: TaskTracker::new(),
            results,
        };
        (pipeline, rx)
    }

    /// Start the upload, confirm and report stages for `job`.
    ///
    /// Must be called from within a Tokio runtime. Returns immediately.
    pub fn launch(&self, job: UploadJob) {
        let (status_tx, status_rx) = oneshot::channel::<UploadStatus>();
        let (outcome_tx, outcome_rx) = oneshot::channel::<UploadOutcome>();
        let task = job.task.clone();

        let api = Arc::clone(&self.api);
        let (date, zone) = (self.date, self.zone);
        tokio::spawn(async move {
            let status = upload_stage(api.as_ref(), &job, date, zone).await;
            let _ = status_tx.send(status);
        });

        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let Ok(status) = status_rx.await else {
                return;
            };
            let outcome = confirm_stage(api.as_ref(), status).await;
            let _ = outcome_tx.send(outcome);
        });

        let results = self.results.clone();
        self.tracker.spawn(async move {
            let line = match outcome_rx.await {
                Ok(outcome) => outcome.report_line(),
                Err(_) => {
                    warn!(task = %task, "pipeline stage ended without an outcome");
                    format!("error logging to {task}: upload stage stopped unexpectedly")
                }
            };
            let _ = results.send(line);
        });
    }

    /// Stop accepting tasks and close the result stream once every launched
    /// chain has reported.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn finish(self) -> JoinHandle<()> {
        let Self {
            tracker, results, ..
        } = self;
        tokio::spawn(async move {
            tracker.close();
            tracker.wait().await;
            drop(results);
        })
    }
}

/// Upload `job` as one worklog.
pub async fn upload_stage(
    api: &dyn WorklogApi,
    job: &UploadJob,
    date: NaiveDate,
    zone: FixedOffset,
) -> UploadStatus {
    let failed = |err: crate::AppError| UploadStatus::Failed {
        task: job.task.clone(),
        message: format!("error logging to {}: {err}", job.task),
    };

    let payload = match WorklogPayload::build(job.minutes, job.first_start, date, zone) {
        Ok(payload) => payload,
        Err(err) => return failed(err),
    };

    info!(task = %job.task, minutes = job.minutes, started = %payload.started, "uploading worklog");
    match api.add_worklog(&job.task, &payload).await {
        Ok(status) => UploadStatus::Uploaded {
            task: job.task.clone(),
            confirmed_hours: job.hours(),
            status,
        },
        Err(err) => {
            warn!(task = %job.task, %err, "worklog upload failed");
            failed(err)
        }
    }
}

/// Follow a successful upload with the task's running total.
///
/// A failed upload passes through untouched and the tracker is not queried.
pub async fn confirm_stage(api: &dyn WorklogApi, status: UploadStatus) -> UploadOutcome {
    match status {
        UploadStatus::Failed { task, message } => UploadOutcome::Failure { task, message },
        UploadStatus::Uploaded {
            task,
            confirmed_hours,
            status,
        } => {
            info!(task = %task, status = %status, "worklog uploaded, fetching total");
            match api.total_seconds(&task).await {
                Ok(total_logged_seconds) => UploadOutcome::Success {
                    task,
                    confirmed_hours,
                    total_logged_seconds,
                },
                Err(err) => {
                    warn!(task = %task, %err, "fetching worklog total failed");
                    UploadOutcome::Failure {
                        message: format!("failed to get time spent: {err}"),
                        task,
                    }
                }
            }
        }
    }
}
