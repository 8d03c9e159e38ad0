//! Push notification subscription.

use reqwest::Method;
use tracing::warn;

use super::ApiClient;
use crate::models::PushSubscription;

impl ApiClient {
    /// `POST /notifications/subscribe`.
    ///
    /// Failures are logged and swallowed; push is optional.
    pub async fn subscribe_push(
        &self,
        subscription: &PushSubscription,
    ) -> Option<serde_json::Value> {
        let req = match self.request(Method::POST, "/notifications/subscribe") {
            Ok(req) => req.json(subscription),
            Err(e) => {
                warn!(error = %e, "push subscription skipped");
                return None;
            }
        };
        match self.send_json(req).await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(error = %e, "push subscription failed");
                None
            }
        }
    }
}
