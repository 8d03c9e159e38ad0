//! `/tasks` endpoints.

use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{EnergyLevel, Task, TaskDraft, TaskPatch};

impl ApiClient {
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let req = self.request(Method::GET, "/tasks/")?;
        self.send_json(req).await
    }

    pub async fn get_task(&self, id: i64) -> Result<Task, ApiError> {
        let req = self.request(Method::GET, &format!("/tasks/{id}"))?;
        self.send_json(req).await
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        let req = self.request(Method::POST, "/tasks/")?.json(draft);
        self.send_json(req).await
    }

    pub async fn update_task(&self, id: i64, patch: &TaskPatch) -> Result<Task, ApiError> {
        let req = self.request(Method::PUT, &format!("/tasks/{id}"))?.json(patch);
        self.send_json(req).await
    }

    pub async fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        let req = self.request(Method::DELETE, &format!("/tasks/{id}"))?;
        self.send_empty(req).await
    }

    /// `PATCH /tasks/:id/complete` toggles completion server-side.
    pub async fn toggle_task(&self, id: i64) -> Result<Task, ApiError> {
        let req = self.request(Method::PATCH, &format!("/tasks/{id}/complete"))?;
        self.send_json(req).await
    }

    /// Energy-aware suggestions, best first.
    pub async fn task_suggestions(&self, energy: EnergyLevel) -> Result<Vec<Task>, ApiError> {
        let req = self
            .request(Method::GET, "/tasks/suggestions")?
            .query(&[("energy", energy.as_str())]);
        self.send_json(req).await
    }

    /// Aggregate counters; the shape is backend-defined.
    pub async fn task_stats(&self) -> Result<serde_json::Value, ApiError> {
        let req = self.request(Method::GET, "/tasks/stats")?;
        self.send_json(req).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::client_for;
    use crate::models::{replace_by_id, EnergyLevel, TaskDraft};

    const TASKS: &str = r#"[
        {"id": 1, "title": "Email", "energy_required": "low",
         "is_completed": false, "status": "pending"},
        {"id": 2, "title": "Essay", "energy_required": "high",
         "is_completed": false, "status": "pending"}
    ]"#;

    #[tokio::test]
    async fn toggle_updates_only_that_entry() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/tasks/")
            .with_status(200)
            .with_body(TASKS)
            .create_async()
            .await;
        let toggle = server
            .mock("PATCH", "/tasks/2/complete")
            .with_status(200)
            .with_body(
                r#"{"id": 2, "title": "Essay", "energy_required": "high",
                    "is_completed": true, "status": "completed"}"#,
            )
            .create_async()
            .await;

        let (client, _) = client_for(&server.url(), Some("t"));
        let mut tasks = client.list_tasks().await.unwrap();
        let first_before = tasks[0].clone();

        let updated = client.toggle_task(2).await.unwrap();
        assert!(replace_by_id(&mut tasks, updated));

        assert_eq!(tasks[0], first_before);
        assert!(tasks[1].is_completed);
        toggle.assert_async().await;
    }

    #[tokio::test]
    async fn suggestions_pass_energy_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/tasks/suggestions")
            .match_query(mockito::Matcher::UrlEncoded("energy".into(), "low".into()))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let (client, _) = client_for(&server.url(), Some("t"));
        assert!(client.task_suggestions(EnergyLevel::Low).await.unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_sends_draft_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/tasks/")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "title": "Laundry",
                "energy_required": "low"
            })))
            .with_status(201)
            .with_body(
                r#"{"id": 9, "title": "Laundry", "energy_required": "low", "is_completed": false}"#,
            )
            .create_async()
            .await;

        let (client, _) = client_for(&server.url(), Some("t"));
        let draft = TaskDraft {
            energy_required: EnergyLevel::Low,
            ..TaskDraft::new("Laundry")
        };
        let task = client.create_task(&draft).await.unwrap();
        assert_eq!(task.id, 9);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/tasks/3")
            .with_status(204)
            .create_async()
            .await;

        let (client, _) = client_for(&server.url(), Some("t"));
        client.delete_task(3).await.unwrap();
        mock.assert_async().await;
    }
}
