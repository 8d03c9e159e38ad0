//! The single outbound HTTP gateway.
//!
//! Every request goes through [`ApiClient`], which:
//! 1. attaches `Authorization: Bearer <token>` when a token is stored
//! 2. on 401 removes the token and asks the front end to show `/login`
//! 3. on any other failure hands a notice to [`Feedback`]
//!
//! Failures are always returned to the caller. There is no retry,
//! backoff or queueing.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use url::Url;

use crate::error::ApiError;
use crate::notify::{
    extract_detail, Feedback, Notice, Route, MSG_FORBIDDEN, MSG_NETWORK, MSG_REQUEST, MSG_SERVER,
};
use crate::storage::{Config, TokenStore};

/// HTTP client for the FocusFlow backend.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    http_client: Client,
    tokens: TokenStore,
    feedback: Arc<dyn Feedback>,
}

impl ApiClient {
    /// Create a client for `base_url` with default timeouts.
    pub fn new(
        base_url: &str,
        tokens: TokenStore,
        feedback: Arc<dyn Feedback>,
    ) -> Result<Self, ApiError> {
        Self::with_http_client(base_url, Client::new(), tokens, feedback)
    }

    /// Create a client from `[api]` settings.
    pub fn from_config(
        config: &Config,
        tokens: TokenStore,
        feedback: Arc<dyn Feedback>,
    ) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::with_http_client(&config.api.base_url, http_client, tokens, feedback)
    }

    pub fn with_http_client(
        base_url: &str,
        http_client: Client,
        tokens: TokenStore,
        feedback: Arc<dyn Feedback>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            http_client,
            tokens,
            feedback,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn feedback(&self) -> &Arc<dyn Feedback> {
        &self.feedback
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Start a request with the bearer token attached.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        debug!(%method, %url, "api request");
        let builder = self.http_client.request(method, url);
        match self.tokens.token() {
            Ok(Some(token)) => Ok(builder.bearer_auth(token)),
            Ok(None) => Ok(builder),
            Err(e) => {
                warn!(error = %e, "could not read stored token, sending anonymously");
                Ok(builder)
            }
        }
    }

    /// Send and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let resp = self.send(builder, &[]).await?;
        self.decode(resp).await
    }

    /// Send, treating `quiet` statuses as `Ok(None)` without a notice.
    pub(crate) async fn send_json_optional<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        quiet: StatusCode,
    ) -> Result<Option<T>, ApiError> {
        let resp = self.send(builder, &[quiet]).await?;
        if resp.status() == quiet {
            return Ok(None);
        }
        self.decode(resp).await.map(Some)
    }

    /// Send and discard the body.
    pub(crate) async fn send_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(builder, &[]).await.map(|_| ())
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        passthrough: &[StatusCode],
    ) -> Result<Response, ApiError> {
        let resp = match builder.send().await {
            Ok(resp) => resp,
            Err(e) => return Err(self.transport_failure(e)),
        };

        let status = resp.status();
        if status.is_success() || passthrough.contains(&status) {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(self.status_failure(status, &body))
    }

    async fn decode<T: DeserializeOwned>(&self, resp: Response) -> Result<T, ApiError> {
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| self.transport_failure(e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            let err = ApiError::Decode(e.to_string());
            self.feedback.notify(Notice::error(err.to_string()));
            err
        })
    }

    fn transport_failure(&self, err: reqwest::Error) -> ApiError {
        if err.is_decode() {
            let mapped = ApiError::Decode(err.to_string());
            self.feedback.notify(Notice::error(mapped.to_string()));
            return mapped;
        }
        warn!(error = %err, "no response from server");
        self.feedback.notify(Notice::error(MSG_NETWORK));
        ApiError::Network(err.to_string())
    }

    /// Map a non-2xx response and deliver its side effects.
    pub(crate) fn status_failure(&self, status: StatusCode, body: &str) -> ApiError {
        let code = status.as_u16();
        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return ApiError::Unauthorized;
        }

        let mapped = classify(status, body);
        warn!(status = code, error = %mapped, "api request failed");
        let message = match &mapped {
            ApiError::Forbidden(_) => MSG_FORBIDDEN.to_string(),
            ApiError::Server { .. } => MSG_SERVER.to_string(),
            ApiError::Request { message, .. } => message.clone(),
            other => other.to_string(),
        };
        self.feedback.notify(Notice::error(message));
        mapped
    }

    fn expire_session(&self) {
        if let Err(e) = self.tokens.clear() {
            error!(error = %e, "failed to remove rejected token");
        }
        if self.feedback.current_route() != Some(Route::Login) {
            self.feedback.navigate(Route::Login);
        }
    }
}

/// Turn a failed status and its body into an [`ApiError`].
pub fn classify(status: StatusCode, body: &str) -> ApiError {
    let code = status.as_u16();
    match code {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden(extract_detail(body).unwrap_or_else(|| MSG_FORBIDDEN.into())),
        500..=599 => ApiError::Server {
            status: code,
            message: extract_detail(body).unwrap_or_else(|| MSG_SERVER.into()),
        },
        _ => ApiError::Request {
            status: code,
            message: extract_detail(body).unwrap_or_else(|| MSG_REQUEST.into()),
        },
    }
}

/// Accept `api.example.com`, `https://api.example.com/api` and so on.
///
/// A value without a scheme is assumed to be HTTPS. The result always ends
/// in `/` so relative joins keep any path prefix.
pub fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::InvalidUrl("base URL is empty".into()));
    }
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let with_slash = if with_scheme.ends_with('/') {
        with_scheme
    } else {
        format!("{with_scheme}/")
    };
    Url::parse(&with_slash).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
}
