//! Turns backend timeline items into render-ready calendar entries.
//!
//! There is no incremental update. Any change means refetch and recompose.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::item::{parse_instant, TimelineItem, TimelineItemType};
use crate::models::Category;

/// Visual treatment of an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryStyle {
    pub background: String,
    pub opacity: f32,
    pub line_through: bool,
}

/// One item ready for a calendar or list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub id: i64,
    pub kind: TimelineItemType,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub color: String,
    pub is_completed: bool,
    /// The item as the backend sent it
    pub resource: TimelineItem,
}

impl CalendarEntry {
    pub fn style(&self) -> EntryStyle {
        EntryStyle {
            background: self.color.clone(),
            opacity: if self.is_completed { 0.6 } else { 1.0 },
            line_through: self.is_completed,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Coerce timestamps, resolve colors, keep a back-reference.
///
/// Items whose timestamps cannot be parsed are dropped with a warning.
pub fn compose(items: &[TimelineItem], categories: &[Category]) -> Vec<CalendarEntry> {
    let category_colors: HashMap<i64, &str> = categories
        .iter()
        .map(|c| (c.id, c.color_hex.as_str()))
        .collect();

    items
        .iter()
        .filter_map(|item| {
            let (Some(start), Some(end)) = (parse_instant(&item.start), parse_instant(&item.end))
            else {
                warn!(
                    id = item.id,
                    start = %item.start,
                    end = %item.end,
                    "skipping timeline item with bad timestamps"
                );
                return None;
            };
            let color = item
                .color
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .or_else(|| item.category_id.and_then(|id| category_colors.get(&id).copied()))
                .unwrap_or(item.item_type.default_color())
                .to_string();
            Some(CalendarEntry {
                id: item.id,
                kind: item.item_type,
                title: item.title.clone(),
                start,
                end,
                color,
                is_completed: item.is_completed,
                resource: item.clone(),
            })
        })
        .collect()
}

/// Events starting at or after `now`, at most `limit`, in input order.
pub fn upcoming_events(
    entries: &[CalendarEntry],
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<&CalendarEntry> {
    entries
        .iter()
        .filter(|e| e.kind == TimelineItemType::Event && e.start >= now)
        .take(limit)
        .collect()
}
