//! Timeline items and their calendar rendering.

mod composer;
mod grid;
mod item;

pub use composer::{compose, upcoming_events, CalendarEntry, EntryStyle};
pub use grid::{DayGrid, HourMarker, PlacedEntry, MAX_PIXELS_PER_HOUR, MIN_BLOCK_MINUTES};
pub use item::{parse_instant, NowView, TimelineItem, TimelineItemType};
