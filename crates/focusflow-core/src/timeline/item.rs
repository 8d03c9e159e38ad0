//! Timeline item types as produced by `GET /timeline/`.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::HasId;

/// Kind of timeline item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineItemType {
    Event,   // Calendar event
    Task,    // Time-blocked task
    Holiday, // Public holiday for the user's country
}

impl TimelineItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Task => "task",
            Self::Holiday => "holiday",
        }
    }

    /// Color used when neither the item nor its category has one.
    pub fn default_color(&self) -> &'static str {
        match self {
            Self::Event => "#2196f3",
            Self::Task => "#ff9800",
            Self::Holiday => "#e91e63",
        }
    }
}

impl fmt::Display for TimelineItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single backend-aggregated item on the timeline.
///
/// `start` and `end` are kept as the backend sent them. Holidays arrive
/// as naive local timestamps; [`parse_instant`] handles both shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineItem {
    pub id: i64,
    pub title: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "type", default = "default_item_type")]
    pub item_type: TimelineItemType,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

fn default_item_type() -> TimelineItemType {
    TimelineItemType::Event
}

impl HasId for TimelineItem {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Response of `GET /timeline/now`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NowView {
    #[serde(default)]
    pub current: Option<TimelineItem>,
    #[serde(default)]
    pub next: Option<TimelineItem>,
}

impl NowView {
    /// Whole minutes until the next item starts, if there is one.
    pub fn minutes_until_next(&self, now: DateTime<Utc>) -> Option<i64> {
        let next = self.next.as_ref()?;
        let start = parse_instant(&next.start)?;
        Some((start - now).num_minutes().max(0))
    }
}

/// Parse an RFC 3339 timestamp, or a naive ISO timestamp taken as UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_offset_and_naive_timestamps() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        assert_eq!(parse_instant("2024-03-15T09:00:00Z"), Some(expected));
        assert_eq!(parse_instant("2024-03-15T11:00:00+02:00"), Some(expected));
        assert_eq!(parse_instant("2024-03-15T09:00:00"), Some(expected));
        assert_eq!(parse_instant("2024-03-15T09:00:00.000000"), Some(expected));
        assert_eq!(parse_instant("2024-03-15T09:00"), Some(expected));
        assert_eq!(parse_instant("yesterday"), None);
    }

    #[test]
    fn holiday_item_decodes() {
        let json = r##"{"id": -20240101, "title": "New Year's Day",
            "start": "2024-01-01T00:00:00", "end": "2024-01-01T23:59:59.999999",
            "type": "holiday", "color": "#e91e63", "is_completed": false}"##;
        let item: TimelineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, TimelineItemType::Holiday);
        assert!(parse_instant(&item.end).is_some());
    }

    #[test]
    fn minutes_until_next() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let view = NowView {
            current: None,
            next: Some(TimelineItem {
                id: 1,
                title: "Class".into(),
                start: "2024-03-15T09:45:00Z".into(),
                end: "2024-03-15T11:00:00Z".into(),
                item_type: TimelineItemType::Event,
                color: None,
                is_completed: false,
                category_id: None,
            }),
        };
        assert_eq!(view.minutes_until_next(now), Some(45));
        assert_eq!(NowView::default().minutes_until_next(now), None);
    }
}
