//! Issue-tracker worklog access.
//!
//! The [`WorklogApi`] trait decouples the upload pipeline from the HTTP
//! transport so the pipeline can run against [`JiraClient`] in production
//! and against in-memory doubles in tests.

pub mod client;
pub mod payload;

use std::future::Future;
use std::pin::Pin;

use crate::Result;

pub use client::JiraClient;
pub use payload::{WorklogEntry, WorklogList, WorklogPayload};

/// Worklog operations the upload pipeline needs from a tracker.
pub trait WorklogApi: Send + Sync {
    /// Record one worklog against `task`.
    ///
    /// Resolves to the tracker's status text (e.g. `201 Created`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Http`](crate::AppError::Http) on transport failure
    /// or a non-2xx response, carrying the status and body.
    fn add_worklog<'a>(
        &'a self,
        task: &'a str,
        payload: &'a WorklogPayload,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

    /// Sum of `timeSpentSeconds` across every worklog recorded on `task`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Http`](crate::AppError::Http) if the request fails
    /// or the response is not a worklog list.
    fn total_seconds<'a>(
        &'a self,
        task: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<u64>> + Send + 'a>>;
}
