//! Query windows for calendar views.
//!
//! All arithmetic is in local wall-clock time; conversion to instants
//! happens only when a query is built.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Days of padding around a month so partially visible weeks are filled.
pub const MONTH_PADDING_DAYS: i64 = 7;
/// Length of the agenda view.
pub const AGENDA_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    #[default]
    Month,
    Agenda,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] =
        [ViewMode::Day, ViewMode::Week, ViewMode::Month, ViewMode::Agenda];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Agenda => "agenda",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "agenda" => Ok(Self::Agenda),
            other => Err(ValidationError::InvalidValue {
                field: "view".into(),
                message: format!("expected day, week, month or agenda, got '{other}'"),
            }),
        }
    }
}

/// Inclusive `[start, end]` window in local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ViewRange {
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    /// Instants for the query, resolving the local times in `tz`.
    pub fn to_utc<Tz: TimeZone>(&self, tz: &Tz) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            resolve_local(tz, self.start, true),
            resolve_local(tz, self.end, false),
        )
    }
}

/// Compute the query window for `reference` shown in `mode`.
///
/// - day: midnight to 23:59:59.999 of the reference date
/// - week, month: the reference month padded by a week on both sides,
///   ending at 23:59:59 of the last padded day
/// - agenda: the reference instant to 30 days later
pub fn view_range(reference: NaiveDateTime, mode: ViewMode) -> ViewRange {
    let date = reference.date();
    match mode {
        ViewMode::Day => ViewRange {
            start: start_of_day(date),
            end: end_of_day(date)
                .checked_add_signed(Duration::milliseconds(999))
                .unwrap_or(NaiveDateTime::MAX),
        },
        ViewMode::Week | ViewMode::Month => {
            let first = date - Duration::days(i64::from(date.day0()));
            let last = first
                .checked_add_months(Months::new(1))
                .map(|next| next - Duration::days(1))
                .unwrap_or(NaiveDate::MAX);
            ViewRange {
                start: start_of_day(shift_days(first, -MONTH_PADDING_DAYS)),
                end: end_of_day(shift_days(last, MONTH_PADDING_DAYS)),
            }
        }
        ViewMode::Agenda => ViewRange {
            start: reference,
            end: reference
                .checked_add_signed(Duration::days(AGENDA_DAYS))
                .unwrap_or(NaiveDateTime::MAX),
        },
    }
}

fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(if days < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 23:59:59 of `date`.
fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date)
        .checked_add_signed(Duration::seconds(86_399))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Map a local wall time to an instant.
///
/// Ambiguous times (DST fall-back) take the earliest reading for window
/// starts and the latest for window ends, so the window only widens.
/// Nonexistent times (DST spring-forward) move an hour later.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime, is_start: bool) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(early, late) => {
            if is_start {
                early.with_timezone(&Utc)
            } else {
                late.with_timezone(&Utc)
            }
        }
        LocalResult::None => naive
            .checked_add_signed(Duration::hours(1))
            .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}
