//! HTTP client for the habit tracker REST API.
//!
//! Every call goes through [`ApiClient::request`], which attaches the JSON
//! content type and the bearer token from client storage, and maps failures
//! to [`ApiError`]. Single attempt, no retries.

pub mod error;
pub mod models;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use self::error::{ApiError, ApiResult};
use self::error::classify_reqwest_error;
pub use self::models::{
    DailyTrack, Habit, HabitStatus, LoginResponse, MessageResponse, RegisterHabitResponse,
    SignUpResponse, User,
};
use self::models::{LoginRequest, MarkDoneRequest, RegisterHabitRequest, SignUpRequest};
use crate::config::Config;
use crate::storage::Storage;

/// True when the path addresses an endpoint behind the auth middleware.
pub fn is_authenticated_path(path: &str) -> bool {
    path.trim_start_matches('/').split('/').next() == Some("auth")
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, storage: Arc<dyn Storage>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            storage,
        }
    }

    /// Builds a client for the configured (or env-overridden) base URL.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid.
    pub fn from_config(config: &Config, storage: Arc<dyn Storage>) -> anyhow::Result<Self> {
        Ok(Self::new(config.effective_base_url()?, storage))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Request headers: JSON content type plus the bearer token when stored.
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.storage.token()
            && let Ok(value) = HeaderValue::from_str(&format!("Bearer {token}"))
        {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }

    /// Performs one API call and decodes the JSON body.
    ///
    /// # Errors
    /// - `Authentication` when an `auth/` path has no stored token (no request
    ///   is sent) or the server answers 400/401.
    /// - `Request` for any other non-2xx status or transport failure.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<T> {
        let path = path.trim_start_matches('/');
        let headers = self.auth_headers();

        if is_authenticated_path(path) && !headers.contains_key(AUTHORIZATION) {
            tracing::warn!(path, "No stored token for authenticated endpoint");
            return Err(ApiError::authentication("Not logged in"));
        }

        let url = format!("{}/{path}", self.base_url);
        tracing::debug!(method = %method, path, "api request");

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|e| {
            let err = classify_reqwest_error(&e);
            tracing::debug!(method = %method, path, error = %err, "api transport failure");
            err
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        if !status.is_success() {
            let err = ApiError::http_status(status.as_u16(), &text);
            if err.is_authentication() {
                tracing::warn!(method = %method, path, status = status.as_u16(), "api authentication failure");
            } else {
                tracing::debug!(method = %method, path, status = status.as_u16(), error = %err, "api request failed");
            }
            return Err(err);
        }

        decode_body(&text)
    }

    /// # Errors
    /// Fails when the credentials are rejected or the request fails.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        self.request(
            Method::POST,
            "login",
            Some(to_body(&LoginRequest { username, password })?),
        )
        .await
    }

    /// # Errors
    /// Fails when the server rejects the sign-up or the request fails.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> ApiResult<SignUpResponse> {
        self.request(
            Method::POST,
            "signup",
            Some(to_body(&SignUpRequest {
                username,
                password,
                confirm_password,
            })?),
        )
        .await
    }

    /// # Errors
    /// Fails on authentication or request failure.
    pub async fn fetch_user(&self) -> ApiResult<User> {
        self.request(Method::GET, "auth/user", None).await
    }

    /// # Errors
    /// Fails on authentication or request failure.
    pub async fn fetch_habits(&self) -> ApiResult<Vec<Habit>> {
        let habits: Option<Vec<Habit>> = self.request(Method::GET, "auth/habit/list", None).await?;
        Ok(habits.unwrap_or_default())
    }

    /// # Errors
    /// Fails on authentication or request failure.
    pub async fn register_habit(&self, name: &str) -> ApiResult<RegisterHabitResponse> {
        self.request(
            Method::POST,
            "auth/habit/register",
            Some(to_body(&RegisterHabitRequest { id: "0", name })?),
        )
        .await
    }

    /// # Errors
    /// Fails on authentication or request failure.
    pub async fn delete_habit(&self, id: &str) -> ApiResult<MessageResponse> {
        self.request(Method::DELETE, &format!("auth/habit/{id}/delete"), None)
            .await
    }

    /// `date` is `YYYY-MM-DD` in local time.
    ///
    /// # Errors
    /// Fails on authentication or request failure.
    pub async fn fetch_daily_track(&self, date: &str) -> ApiResult<DailyTrack> {
        self.request(Method::GET, &format!("auth/daily_track/{date}"), None)
            .await
    }

    /// # Errors
    /// Fails on authentication or request failure.
    pub async fn mark_done(&self, date: &str, habit_id: &str) -> ApiResult<MessageResponse> {
        self.request(
            Method::POST,
            "auth/daily_track/done",
            Some(to_body(&MarkDoneRequest { date, habit_id })?),
        )
        .await
    }
}

fn to_body<T: Serialize>(body: &T) -> ApiResult<Value> {
    serde_json::to_value(body).map_err(|e| ApiError::request(format!("Failed to encode request: {e}")))
}

/// Decodes a success body; an empty body decodes as `{}`.
fn decode_body<T: DeserializeOwned>(text: &str) -> ApiResult<T> {
    let value = if text.trim().is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_str(text)
            .map_err(|e| ApiError::request(format!("Failed to decode response: {e}")))?
    };
    serde_json::from_value(value)
        .map_err(|e| ApiError::request(format!("Unexpected response shape: {e}")))
}
