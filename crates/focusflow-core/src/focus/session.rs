//! Server-side focus session records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Task;

/// Status assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusStatus {
    Active,
    Paused,
    Completed,
}

/// Transition requests the UI can send for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAction {
    Pause,
    Resume,
    Stop,
    Interrupt,
}

impl FocusStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    /// Whether the controls for `action` are offered in this status.
    ///
    /// The server is still the judge; this only decides which buttons show.
    pub fn allows(&self, action: FocusAction) -> bool {
        match (self, action) {
            (Self::Active, FocusAction::Pause) => true,
            (Self::Paused, FocusAction::Resume) => true,
            (Self::Active | Self::Paused, FocusAction::Stop | FocusAction::Interrupt) => true,
            _ => false,
        }
    }

    pub fn available_actions(&self) -> Vec<FocusAction> {
        [
            FocusAction::Pause,
            FocusAction::Resume,
            FocusAction::Stop,
            FocusAction::Interrupt,
        ]
        .into_iter()
        .filter(|a| self.allows(*a))
        .collect()
    }
}

impl fmt::Display for FocusStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A timed, interruption-tracked work interval linked to zero or one task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FocusSession {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub task_id: Option<i64>,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: i64,
    #[serde(default)]
    pub interruptions: u32,
    #[serde(default)]
    pub interruption_notes: Option<String>,
    #[serde(default)]
    pub feedback_score: Option<u8>,
    pub status: FocusStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
}

/// Aggregates from `GET /focus/stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FocusStats {
    pub total_sessions: u32,
    pub total_minutes: i64,
    pub avg_score: f64,
    pub total_interruptions: u32,
}

impl FocusStats {
    /// Mean minutes per session, 0 when there are none.
    pub fn average_minutes(&self) -> f64 {
        if self.total_sessions == 0 {
            return 0.0;
        }
        self.total_minutes as f64 / self.total_sessions as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_follow_status() {
        assert_eq!(
            FocusStatus::Active.available_actions(),
            vec![FocusAction::Pause, FocusAction::Stop, FocusAction::Interrupt]
        );
        assert_eq!(
            FocusStatus::Paused.available_actions(),
            vec![FocusAction::Resume, FocusAction::Stop, FocusAction::Interrupt]
        );
        assert!(FocusStatus::Completed.available_actions().is_empty());
    }

    #[test]
    fn session_decodes_with_embedded_task() {
        let json = r#"{
            "id": 2, "user_id": 1, "task_id": 5,
            "start_time": "2024-03-15T09:00:00Z",
            "duration_minutes": 0, "interruptions": 2,
            "interruption_notes": "door; phone",
            "status": "paused",
            "task": {"id": 5, "title": "Read", "energy_required": "low", "is_completed": false}
        }"#;
        let session: FocusSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.status, FocusStatus::Paused);
        assert_eq!(session.task.as_ref().map(|t| t.title.as_str()), Some("Read"));
        assert_eq!(session.interruptions, 2);
    }

    #[test]
    fn stats_average() {
        let stats = FocusStats {
            total_sessions: 4,
            total_minutes: 100,
            avg_score: 3.5,
            total_interruptions: 2,
        };
        assert_eq!(stats.average_minutes(), 25.0);
        assert_eq!(FocusStats::default().average_minutes(), 0.0);
    }
}
