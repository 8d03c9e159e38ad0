//! Elapsed-time display for the current focus session.
//!
//! Elapsed time is re-derived from the wall clock on every tick
//! (`now - start_time`), never accumulated. It therefore survives a
//! reload, and it also counts paused intervals: the server does not
//! report them.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{FocusSession, FocusStatus};

/// Mirror of one server session plus the last displayed elapsed value.
#[derive(Debug, Clone)]
pub struct FocusTimer {
    session: FocusSession,
    elapsed_secs: u64,
}

/// What a front end renders for the timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusSnapshot {
    pub session_id: i64,
    pub status: FocusStatus,
    pub elapsed_secs: u64,
    pub display: String,
    pub label: &'static str,
    pub interruptions: u32,
}

impl FocusTimer {
    /// Start from the server's recorded duration until the first tick.
    pub fn new(session: FocusSession) -> Self {
        let elapsed_secs = u64::try_from(session.duration_minutes.max(0))
            .unwrap_or(0)
            .saturating_mul(60);
        Self {
            session,
            elapsed_secs,
        }
    }

    pub fn session(&self) -> &FocusSession {
        &self.session
    }

    pub fn status(&self) -> FocusStatus {
        self.session.status
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Adopt the session the server returned after a transition.
    pub fn adopt(&mut self, session: FocusSession) {
        self.session = session;
    }

    /// Recompute elapsed time if the session is active.
    ///
    /// Paused and completed sessions keep their last displayed value.
    pub fn tick(&mut self, now: DateTime<Utc>) -> u64 {
        if self.session.status == FocusStatus::Active {
            self.elapsed_secs = elapsed_since(self.session.start_time, now);
        }
        self.elapsed_secs
    }

    pub fn snapshot(&self) -> FocusSnapshot {
        FocusSnapshot {
            session_id: self.session.id,
            status: self.session.status,
            elapsed_secs: self.elapsed_secs,
            display: format_elapsed(self.elapsed_secs),
            label: status_label(self.session.status),
            interruptions: self.session.interruptions,
        }
    }
}

/// Whole seconds from `start` to `now`, clamped at zero.
pub fn elapsed_since(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - start).num_seconds()).unwrap_or(0)
}

/// `MM:SS` below one hour, `H:MM:SS` from one hour on.
pub fn format_elapsed(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

pub fn status_label(status: FocusStatus) -> &'static str {
    match status {
        FocusStatus::Active => "Focus",
        FocusStatus::Paused => "Paused",
        FocusStatus::Completed => "Done",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn session(status: FocusStatus, start: DateTime<Utc>) -> FocusSession {
        FocusSession {
            id: 1,
            user_id: Some(1),
            task_id: None,
            start_time: start,
            end_time: None,
            duration_minutes: 0,
            interruptions: 0,
            interruption_notes: None,
            feedback_score: None,
            status,
            task: None,
        }
    }

    #[test]
    fn active_session_shows_at_least_n_seconds_and_never_decreases() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let n = 754;
        let mut timer = FocusTimer::new(session(FocusStatus::Active, now - Duration::seconds(n)));

        let mut last = timer.tick(now);
        assert!(last >= n as u64);
        for step in 1..=5 {
            let shown = timer.tick(now + Duration::milliseconds(step * 400));
            assert!(shown >= last);
            last = shown;
        }
        assert_eq!(last, n as u64 + 2);
    }

    #[test]
    fn paused_session_freezes_display() {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let mut timer = FocusTimer::new(session(FocusStatus::Active, start));
        assert_eq!(timer.tick(start + Duration::seconds(90)), 90);

        timer.adopt(session(FocusStatus::Paused, start));
        assert_eq!(timer.tick(start + Duration::seconds(600)), 90);
        assert_eq!(timer.snapshot().label, "Paused");

        // Resuming re-derives from start_time, paused time included.
        timer.adopt(session(FocusStatus::Active, start));
        assert_eq!(timer.tick(start + Duration::seconds(600)), 600);
    }

    #[test]
    fn clock_skew_clamps_to_zero() {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let mut timer = FocusTimer::new(session(FocusStatus::Active, start));
        assert_eq!(timer.tick(start - Duration::seconds(5)), 0);
    }

    #[test]
    fn initial_value_comes_from_recorded_duration() {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let mut s = session(FocusStatus::Completed, start);
        s.duration_minutes = 25;
        let mut timer = FocusTimer::new(s);
        assert_eq!(timer.tick(start + Duration::hours(3)), 1500);
        assert_eq!(timer.snapshot().display, "25:00");
    }

    #[test]
    fn absurd_recorded_duration_saturates() {
        let start = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let mut s = session(FocusStatus::Completed, start);
        s.duration_minutes = i64::MAX;
        let timer = FocusTimer::new(s);
        assert_eq!(timer.elapsed_secs(), u64::MAX);
        assert!(!timer.snapshot().display.is_empty());

        let mut s = session(FocusStatus::Completed, start);
        s.duration_minutes = -5;
        assert_eq!(FocusTimer::new(s).elapsed_secs(), 0);
    }

    #[test]
    fn formats_minutes_and_hours() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(65), "01:05");
        assert_eq!(format_elapsed(3599), "59:59");
        assert_eq!(format_elapsed(3600), "1:00:00");
        assert_eq!(format_elapsed(3 * 3600 + 7 * 60 + 9), "3:07:09");
    }
}
