//! Hour-grid layout for the single-day view.
//!
//! Pure geometry: vertical offsets and heights in pixels for entries on
//! one local day, plus the current-time indicator.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use serde::Serialize;

use super::composer::CalendarEntry;
use crate::calendar::ViewRange;
use crate::error::ValidationError;
use crate::storage::DayGridConfig;

/// Entries shorter than this still get a clickable block.
pub const MIN_BLOCK_MINUTES: i64 = 30;

/// Upper bound on `pixels_per_hour`.
pub const MAX_PIXELS_PER_HOUR: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayGrid {
    pub start_hour: u32,
    pub end_hour: u32,
    pub pixels_per_hour: u32,
}

impl Default for DayGrid {
    fn default() -> Self {
        Self {
            start_hour: 6,
            end_hour: 22,
            pixels_per_hour: 60,
        }
    }
}

impl TryFrom<&DayGridConfig> for DayGrid {
    type Error = ValidationError;

    fn try_from(config: &DayGridConfig) -> Result<Self, Self::Error> {
        DayGrid::new(config.start_hour, config.end_hour, config.pixels_per_hour)
    }
}

/// One positioned block on the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEntry<'a> {
    pub entry: &'a CalendarEntry,
    pub top: f64,
    pub height: f64,
}

/// A labelled hour line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourMarker {
    pub hour: u32,
    pub label: String,
    pub top: f64,
}

impl DayGrid {
    pub fn new(
        start_hour: u32,
        end_hour: u32,
        pixels_per_hour: u32,
    ) -> Result<Self, ValidationError> {
        if end_hour > 24 || start_hour >= end_hour {
            return Err(ValidationError::InvalidValue {
                field: "day_grid".into(),
                message: format!("hours {start_hour}..{end_hour} must satisfy start < end <= 24"),
            });
        }
        if pixels_per_hour == 0 || pixels_per_hour > MAX_PIXELS_PER_HOUR {
            return Err(ValidationError::InvalidValue {
                field: "day_grid.pixels_per_hour".into(),
                message: format!("must be between 1 and {MAX_PIXELS_PER_HOUR}"),
            });
        }
        Ok(Self {
            start_hour,
            end_hour,
            pixels_per_hour,
        })
    }

    pub fn total_height(&self) -> f64 {
        self.hour_offset(self.end_hour)
    }

    fn hour_offset(&self, hour: u32) -> f64 {
        (f64::from(hour) - f64::from(self.start_hour)) * f64::from(self.pixels_per_hour)
    }

    fn px_per_minute(&self) -> f64 {
        f64::from(self.pixels_per_hour) / 60.0
    }

    /// Pixels from the top of the grid for a local time of day.
    ///
    /// Times before the first grid hour give a negative offset.
    pub fn offset_for(&self, time: NaiveTime) -> f64 {
        let minutes =
            i64::from(time.hour() * 60 + time.minute()) - i64::from(self.start_hour) * 60;
        minutes as f64 * self.px_per_minute()
    }

    pub fn height_for(&self, duration_minutes: i64) -> f64 {
        duration_minutes.max(MIN_BLOCK_MINUTES) as f64 * self.px_per_minute()
    }

    /// Position every entry that starts on `day` in zone `tz`.
    ///
    /// Blocks are clipped to the visible hours; entries wholly outside
    /// them are left out.
    pub fn place<'a, Tz: TimeZone>(
        &self,
        entries: &'a [CalendarEntry],
        day: NaiveDate,
        tz: &Tz,
    ) -> Vec<PlacedEntry<'a>> {
        let total = self.total_height();
        entries
            .iter()
            .filter_map(|entry| {
                let local_start = entry.start.with_timezone(tz).naive_local();
                if local_start.date() != day {
                    return None;
                }
                let top = self.offset_for(local_start.time());
                let height = self.height_for(entry.duration_minutes());
                let bottom = (top + height).min(total);
                let top = top.max(0.0);
                (bottom > top).then_some(PlacedEntry {
                    entry,
                    top,
                    height: bottom - top,
                })
            })
            .collect()
    }

    pub fn hour_markers(&self) -> Vec<HourMarker> {
        (self.start_hour..self.end_hour)
            .map(|hour| HourMarker {
                hour,
                label: format!("{hour:02}:00"),
                top: self.hour_offset(hour),
            })
            .collect()
    }

    /// Offset of the now-line, shown only when `now` falls on the
    /// displayed day within the grid hours.
    pub fn now_indicator<Tz: TimeZone>(
        &self,
        now: DateTime<Utc>,
        day: &ViewRange,
        tz: &Tz,
    ) -> Option<f64> {
        let local = now.with_timezone(tz).naive_local();
        if !day.contains(local) {
            return None;
        }
        let hour = local.hour();
        (self.start_hour..self.end_hour)
            .contains(&hour)
            .then(|| self.offset_for(local.time()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{view_range, ViewMode};
    use crate::timeline::{TimelineItem, TimelineItemType};

    fn entry(id: i64, start: DateTime<Utc>, minutes: i64) -> CalendarEntry {
        let end = start + chrono::Duration::minutes(minutes);
        CalendarEntry {
            id,
            kind: TimelineItemType::Event,
            title: "block".into(),
            start,
            end,
            color: "#2196f3".into(),
            is_completed: false,
            resource: TimelineItem {
                id,
                title: "block".into(),
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
                item_type: TimelineItemType::Event,
                color: None,
                is_completed: false,
                category_id: None,
            },
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, h, m, 0).unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn default_grid_geometry() {
        let grid = DayGrid::default();
        assert_eq!(grid.total_height(), 960.0);
        assert_eq!(grid.offset_for(NaiveTime::from_hms_opt(9, 30, 0).unwrap()), 210.0);
        assert_eq!(grid.hour_markers().len(), 16);
        assert_eq!(grid.hour_markers()[0].label, "06:00");
    }

    #[test]
    fn short_entries_get_minimum_height() {
        let grid = DayGrid::default();
        assert_eq!(grid.height_for(10), 30.0);
        assert_eq!(grid.height_for(90), 90.0);
    }

    #[test]
    fn place_clips_and_filters() {
        let grid = DayGrid::default();
        let entries = vec![
            entry(1, at(9, 0), 60),
            entry(2, at(5, 0), 120),  // straddles the grid start
            entry(3, at(23, 0), 30),  // after the grid
            entry(4, at(21, 30), 60), // runs past the grid end
        ];
        let placed = grid.place(&entries, day(), &Utc);
        let summary: Vec<(i64, f64, f64)> =
            placed.iter().map(|p| (p.entry.id, p.top, p.height)).collect();
        assert_eq!(summary, vec![(1, 180.0, 60.0), (2, 0.0, 60.0), (4, 930.0, 30.0)]);
    }

    #[test]
    fn now_indicator_only_inside_grid_hours() {
        let grid = DayGrid::default();
        let range = view_range(day().and_hms_opt(12, 0, 0).unwrap(), ViewMode::Day);
        assert_eq!(grid.now_indicator(at(7, 0), &range, &Utc), Some(60.0));
        assert_eq!(grid.now_indicator(at(23, 0), &range, &Utc), None);
        let tomorrow = at(7, 0) + chrono::Duration::days(1);
        assert_eq!(grid.now_indicator(tomorrow, &range, &Utc), None);
    }

    #[test]
    fn rejects_inverted_hours() {
        assert!(DayGrid::new(22, 6, 60).is_err());
        assert!(DayGrid::new(0, 25, 60).is_err());
        assert!(DayGrid::new(0, 24, 0).is_err());
        let config = DayGridConfig {
            start_hour: 8,
            end_hour: 18,
            pixels_per_hour: 48,
        };
        assert_eq!(DayGrid::try_from(&config).unwrap().total_height(), 480.0);
    }

    #[test]
    fn huge_pixels_per_hour_is_rejected_and_never_overflows() {
        let config = DayGridConfig {
            start_hour: 0,
            end_hour: 24,
            pixels_per_hour: 500_000_000,
        };
        assert!(DayGrid::try_from(&config).is_err());
        assert!(DayGrid::new(0, 24, MAX_PIXELS_PER_HOUR).is_ok());

        let grid = DayGrid {
            start_hour: 0,
            end_hour: 24,
            pixels_per_hour: u32::MAX,
        };
        assert_eq!(grid.total_height(), 24.0 * f64::from(u32::MAX));
        let markers = grid.hour_markers();
        assert_eq!(markers[23].top, 23.0 * f64::from(u32::MAX));
    }
}
