//! `/focus` endpoints.
//!
//! Every transition is a single request; the caller adopts whatever
//! session the server returns.

use reqwest::{Method, StatusCode};
use serde_json::json;

use super::ApiClient;
use crate::error::ApiError;
use crate::focus::{FocusSession, FocusStats};

/// Optional parameters of `POST /focus/:id/stop`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopOptions {
    /// Self-rated session quality, 1-5
    pub feedback_score: Option<u8>,
    /// Also mark the linked task completed
    pub complete_task: bool,
}

impl StopOptions {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(score) = self.feedback_score.filter(|s| *s > 0) {
            params.push(("feedback_score", score.to_string()));
        }
        if self.complete_task {
            params.push(("complete_task", "true".to_string()));
        }
        params
    }
}

impl ApiClient {
    pub async fn start_focus(&self, task_id: Option<i64>) -> Result<FocusSession, ApiError> {
        let req = self
            .request(Method::POST, "/focus/start")?
            .json(&json!({ "task_id": task_id }));
        self.send_json(req).await
    }

    /// The session that is not yet completed, if any. 404 means none.
    pub async fn current_focus(&self) -> Result<Option<FocusSession>, ApiError> {
        let req = self.request(Method::GET, "/focus/current")?;
        self.send_json_optional(req, StatusCode::NOT_FOUND).await
    }

    pub async fn stop_focus(
        &self,
        id: i64,
        options: StopOptions,
    ) -> Result<FocusSession, ApiError> {
        let req = self
            .request(Method::POST, &format!("/focus/{id}/stop"))?
            .query(&options.params());
        self.send_json(req).await
    }

    pub async fn pause_focus(&self, id: i64) -> Result<FocusSession, ApiError> {
        let req = self.request(Method::POST, &format!("/focus/{id}/pause"))?;
        self.send_json(req).await
    }

    pub async fn resume_focus(&self, id: i64) -> Result<FocusSession, ApiError> {
        let req = self.request(Method::POST, &format!("/focus/{id}/resume"))?;
        self.send_json(req).await
    }

    pub async fn log_interruption(
        &self,
        id: i64,
        note: Option<&str>,
    ) -> Result<FocusSession, ApiError> {
        let mut req = self.request(Method::POST, &format!("/focus/{id}/interruption"))?;
        if let Some(note) = note.filter(|n| !n.trim().is_empty()) {
            req = req.query(&[("note", note)]);
        }
        self.send_json(req).await
    }

    pub async fn focus_stats(&self) -> Result<FocusStats, ApiError> {
        let req = self.request(Method::GET, "/focus/stats")?;
        self.send_json(req).await
    }
}
