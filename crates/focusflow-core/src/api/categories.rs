//! `/categories` endpoints.

use reqwest::Method;

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Category, CategoryDraft};

impl ApiClient {
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let req = self.request(Method::GET, "/categories/")?;
        self.send_json(req).await
    }

    pub async fn get_category(&self, id: i64) -> Result<Category, ApiError> {
        let req = self.request(Method::GET, &format!("/categories/{id}"))?;
        self.send_json(req).await
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ApiError> {
        let req = self.request(Method::POST, "/categories/")?.json(draft);
        self.send_json(req).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        draft: &CategoryDraft,
    ) -> Result<Category, ApiError> {
        let req = self.request(Method::PUT, &format!("/categories/{id}"))?.json(draft);
        self.send_json(req).await
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), ApiError> {
        let req = self.request(Method::DELETE, &format!("/categories/{id}"))?;
        self.send_empty(req).await
    }
}
