//! Focus sessions: server records and the local elapsed-time display.

mod display;
mod session;

pub use display::{elapsed_since, format_elapsed, status_label, FocusSnapshot, FocusTimer};
pub use session::{FocusAction, FocusSession, FocusStats, FocusStatus};
