//! User-facing notices and navigation requests.
//!
//! The API gateway never renders anything itself. It hands transient
//! notices and "go to login" requests to a [`Feedback`] implementation
//! supplied by the front end.

use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

pub const MSG_FORBIDDEN: &str = "You do not have permission to perform this action.";
pub const MSG_SERVER: &str = "Server error. Please try again later.";
pub const MSG_REQUEST: &str = "Request failed.";
pub const MSG_NETWORK: &str = "Connection error. Check your network.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient, dismissible message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Front-end routes the core may ask to navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Route {
    Login,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
        }
    }
}

/// Sink for notices and navigation requests.
pub trait Feedback: Send + Sync {
    fn notify(&self, notice: Notice);

    /// Route the front end is currently showing, if it tracks one.
    fn current_route(&self) -> Option<Route> {
        None
    }

    fn navigate(&self, route: Route);
}

/// Records everything it receives. Used by tests and by front ends
/// that drain notices after each command.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    notices: Mutex<Vec<Notice>>,
    routes: Mutex<Vec<Route>>,
    current: Mutex<Option<Route>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend the front end is already showing `route`.
    pub fn at(route: Route) -> Self {
        let feedback = Self::default();
        if let Ok(mut current) = feedback.current.lock() {
            *current = Some(route);
        }
        feedback
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl Feedback for RecordingFeedback {
    fn notify(&self, notice: Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice);
        }
    }

    fn current_route(&self) -> Option<Route> {
        self.current.lock().ok().and_then(|c| *c)
    }

    fn navigate(&self, route: Route) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route);
        }
        if let Ok(mut current) = self.current.lock() {
            *current = Some(route);
        }
    }
}

/// Best-effort human-readable message from an error response body.
///
/// FastAPI-style bodies carry `detail`, either a string or a structure
/// (validation errors); structures are JSON-encoded.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_used_verbatim() {
        assert_eq!(
            extract_detail(r#"{"detail": "Tarea no encontrada"}"#).as_deref(),
            Some("Tarea no encontrada")
        );
    }

    #[test]
    fn detail_object_is_json_encoded() {
        let body = r#"{"detail": [{"loc": ["body", "title"], "msg": "field required"}]}"#;
        let detail = extract_detail(body).unwrap();
        assert!(detail.starts_with('['));
        assert!(detail.contains("field required"));
    }

    #[test]
    fn missing_or_unparseable_detail_yields_none() {
        assert!(extract_detail("<html>oops</html>").is_none());
        assert!(extract_detail(r#"{"error": "x"}"#).is_none());
        assert!(extract_detail(r#"{"detail": ""}"#).is_none());
    }

    #[test]
    fn success_notice_carries_level_and_text() {
        let notice = Notice::success("Logged in as ana@example.com");
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(notice.to_string(), "Logged in as ana@example.com");
        assert_eq!(Notice::error("boom").level, NoticeLevel::Error);
    }

    #[test]
    fn recording_feedback_tracks_route() {
        let feedback = RecordingFeedback::new();
        assert_eq!(feedback.current_route(), None);
        feedback.navigate(Route::Login);
        assert_eq!(feedback.current_route(), Some(Route::Login));
        assert_eq!(feedback.routes(), vec![Route::Login]);
        assert_eq!(Route::Login.path(), "/login");
    }
}
