//! Calendar views: query windows and navigation state.

mod cursor;
mod range;

pub use cursor::{CalendarCursor, Navigate};
pub use range::{view_range, ViewMode, ViewRange, AGENDA_DAYS, MONTH_PADDING_DAYS};
