//! `/events` endpoints.

use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Event, EventDraft, EventPatch};

impl ApiClient {
    pub async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        let req = self.request(Method::GET, "/events/")?;
        self.send_json(req).await
    }

    pub async fn get_event(&self, id: i64) -> Result<Event, ApiError> {
        let req = self.request(Method::GET, &format!("/events/{id}"))?;
        self.send_json(req).await
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        let req = self.request(Method::POST, "/events/")?.json(draft);
        self.send_json(req).await
    }

    pub async fn update_event(&self, id: i64, patch: &EventPatch) -> Result<Event, ApiError> {
        let req = self.request(Method::PUT, &format!("/events/{id}"))?.json(patch);
        self.send_json(req).await
    }

    pub async fn delete_event(&self, id: i64) -> Result<(), ApiError> {
        let req = self.request(Method::DELETE, &format!("/events/{id}"))?;
        self.send_empty(req).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::client_for;
    use crate::models::EventPatch;

    #[tokio::test]
    async fn update_sends_only_changed_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/events/4")
            .match_body(mockito::Matcher::Json(serde_json::json!({ "title": "Moved" })))
            .with_status(200)
            .with_body(
                r#"{"id": 4, "title": "Moved", "start_time": "2024-03-15T09:00:00Z",
                    "end_time": "2024-03-15T10:00:00Z", "category_id": 1}"#,
            )
            .create_async()
            .await;

        let (client, _) = client_for(&server.url(), Some("t"));
        let patch = EventPatch {
            title: Some("Moved".into()),
            ..EventPatch::default()
        };
        let event = client.update_event(4, &patch).await.unwrap();
        assert_eq!(event.title, "Moved");
        mock.assert_async().await;
    }
}
