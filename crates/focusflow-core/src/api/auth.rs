//! Login, registration and the current user's profile.

use reqwest::Method;
use tracing::info;

use super::ApiClient;
use crate::error::{ApiError, Result};
use crate::models::{LoginResponse, Registration, User, UserUpdate};

impl ApiClient {
    /// `POST /token` (form encoded). Stores the returned token on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let req = self
            .request(Method::POST, "/token")?
            .form(&[("username", email), ("password", password)]);
        let resp: LoginResponse = self.send_json(req).await?;
        self.tokens().save(&resp.access_token)?;
        info!(email, "logged in");
        Ok(resp)
    }

    /// Forget the stored token. The backend keeps no session to end.
    pub fn logout(&self) -> Result<()> {
        self.tokens().clear()?;
        Ok(())
    }

    /// `POST /users/`
    pub async fn register(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let body = Registration {
            email: email.to_string(),
            password: password.to_string(),
        };
        let req = self.request(Method::POST, "/users/")?.json(&body);
        self.send_json(req).await
    }

    /// `GET /users/me`
    pub async fn me(&self) -> Result<User, ApiError> {
        let req = self.request(Method::GET, "/users/me")?;
        self.send_json(req).await
    }

    /// `PUT /users/me`
    pub async fn update_me(&self, update: &UserUpdate) -> Result<User, ApiError> {
        let req = self.request(Method::PUT, "/users/me")?.json(update);
        self.send_json(req).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::client_for;

    #[tokio::test]
    async fn login_posts_form_and_stores_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/token")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("username".into(), "ana@example.com".into()),
                mockito::Matcher::UrlEncoded("password".into(), "s3cret".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"access_token": "jwt-1", "token_type": "bearer"}"#)
            .create_async()
            .await;

        let (client, _) = client_for(&server.url(), None);
        let resp = client.login("ana@example.com", "s3cret").await.unwrap();
        assert_eq!(resp.access_token, "jwt-1");
        assert_eq!(client.tokens().token().unwrap().as_deref(), Some("jwt-1"));
        mock.assert_async().await;

        client.logout().unwrap();
        assert!(!client.tokens().is_present());
    }

    #[tokio::test]
    async fn update_me_sends_country() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/users/me")
            .match_body(mockito::Matcher::Json(serde_json::json!({ "country": "ES" })))
            .with_status(200)
            .with_body(r#"{"id": 1, "email": "a@b.c", "country": "ES", "is_active": true}"#)
            .create_async()
            .await;

        let (client, _) = client_for(&server.url(), Some("t"));
        let user = client
            .update_me(&crate::models::UserUpdate {
                country: Some("ES".into()),
            })
            .await
            .unwrap();
        assert_eq!(user.country, "ES");
        mock.assert_async().await;
    }
}
