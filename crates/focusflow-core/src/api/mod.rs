//! Typed access to the backend REST API.
//!
//! [`ApiClient`] is the gateway; each submodule adds the endpoints of one
//! resource as an `impl ApiClient` block.

mod auth;
mod categories;
pub mod client;
mod events;
mod focus;
mod notifications;
mod tasks;
mod timeline;

pub use client::{classify, normalize_base_url, ApiClient};
pub use focus::StopOptions;
pub use timeline::TimelineQuery;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::ApiClient;
    use crate::notify::RecordingFeedback;
    use crate::storage::{MemoryStore, TokenStore};

    /// Client against `url` backed by an in-memory token store.
    pub(crate) fn client_for(
        url: &str,
        token: Option<&str>,
    ) -> (ApiClient, Arc<RecordingFeedback>) {
        let tokens = TokenStore::new(Arc::new(MemoryStore::new()));
        if let Some(t) = token {
            tokens.save(t).unwrap();
        }
        let feedback = Arc::new(RecordingFeedback::new());
        let client = ApiClient::new(url, tokens, feedback.clone()).unwrap();
        (client, feedback)
    }
}
