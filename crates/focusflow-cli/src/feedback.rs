//! Terminal rendering of notices raised by the API client.

use focusflow_core::notify::{Feedback, Notice, NoticeLevel, Route};
use tracing::debug;

/// Prints notices to stderr so stdout stays machine-readable.
#[derive(Debug, Default, Clone, Copy)]
pub struct CliFeedback;

impl Feedback for CliFeedback {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => eprintln!("! {notice}"),
            NoticeLevel::Success | NoticeLevel::Info => eprintln!("{notice}"),
        }
    }

    fn navigate(&self, route: Route) {
        // The only redirect is to login; main prints the hint on exit.
        debug!(route = route.path(), "navigation requested");
    }
}
