//! `reqwest`-backed worklog client with Basic Auth.

use std::future::Future;
use std::pin::Pin;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use tracing::debug;

use crate::config::TrackerConfig;
use crate::{AppError, Result};

use super::payload::{WorklogList, WorklogPayload};
use super::WorklogApi;

const APPLICATION_JSON: &str = "application/json";

/// HTTP client for the tracker's worklog endpoints.
///
/// Cheap to share: the inner `reqwest::Client` is reference counted and the
/// configuration is only read.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    config: TrackerConfig,
}

impl JiraClient {
    /// Build a client for the tracker described by `config`.
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Configuration this client authenticates with.
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    fn request(&self, method: Method, task: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.worklog_url(task))
            .basic_auth(&self.config.username, Some(&self.config.key))
            .header(ACCEPT, APPLICATION_JSON)
            .header(CONTENT_TYPE, APPLICATION_JSON)
    }

    async fn post_worklog(&self, task: &str, payload: &WorklogPayload) -> Result<String> {
        let body = serde_json::to_vec(payload)
            .map_err(|err| AppError::Http(format!("error preparing payload: {err}")))?;

        let resp = self
            .request(Method::POST, task)
            .body(body)
            .send()
            .await
            .map_err(|err| AppError::Http(format!("error making request: {err}")))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|err| AppError::Http(format!("failed to read body: {err}")))?;
        debug!(task, status = status.as_u16(), "worklog upload answered");

        if !status.is_success() {
            return Err(AppError::Http(format!(
                "not successful ({}): {text}",
                status.as_u16()
            )));
        }

        Ok(status.to_string())
    }

    async fn get_total_seconds(&self, task: &str) -> Result<u64> {
        let resp = self
            .request(Method::GET, task)
            .send()
            .await
            .map_err(|err| AppError::Http(format!("error making request: {err}")))?;

        let bytes = resp
            .bytes()
            .await
            .map_err(|err| AppError::Http(format!("failed to read body: {err}")))?;

        let list: WorklogList = serde_json::from_slice(&bytes)
            .map_err(|err| AppError::Http(format!("JSON unmarshalling failed: {err}")))?;

        Ok(list.total_seconds())
    }
}

impl WorklogApi for JiraClient {
    fn add_worklog<'a>(
        &'a self,
        task: &'a str,
        payload: &'a WorklogPayload,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(self.post_worklog(task, payload))
    }

    fn total_seconds<'a>(
        &'a self,
        task: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<u64>> + Send + 'a>> {
        Box::pin(self.get_total_seconds(task))
    }
}
