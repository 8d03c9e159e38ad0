//! Calendar navigation state: a reference date and a view mode.

use chrono::{Duration, Months, NaiveDateTime};
use serde::Serialize;

use super::range::{view_range, ViewMode, ViewRange, AGENDA_DAYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigate {
    Prev,
    Next,
    Today,
}

/// What the dashboard calendar is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarCursor {
    reference: NaiveDateTime,
    view: ViewMode,
}

impl CalendarCursor {
    pub fn new(reference: NaiveDateTime, view: ViewMode) -> Self {
        Self { reference, view }
    }

    pub fn reference(&self) -> NaiveDateTime {
        self.reference
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Switch view; the reference date stays where it is.
    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    /// Move by one period of the current view, or jump to `now`.
    pub fn navigate(&mut self, action: Navigate, now: NaiveDateTime) {
        self.reference = match action {
            Navigate::Today => now,
            Navigate::Prev => self.step(false).unwrap_or(self.reference),
            Navigate::Next => self.step(true).unwrap_or(self.reference),
        };
    }

    fn step(&self, forward: bool) -> Option<NaiveDateTime> {
        let days = |n: i64| {
            let delta = Duration::days(n);
            if forward {
                self.reference.checked_add_signed(delta)
            } else {
                self.reference.checked_sub_signed(delta)
            }
        };
        match self.view {
            ViewMode::Day => days(1),
            ViewMode::Week => days(7),
            ViewMode::Agenda => days(AGENDA_DAYS),
            ViewMode::Month => {
                if forward {
                    self.reference.checked_add_months(Months::new(1))
                } else {
                    self.reference.checked_sub_months(Months::new(1))
                }
            }
        }
    }

    pub fn range(&self) -> ViewRange {
        view_range(self.reference, self.view)
    }
}
