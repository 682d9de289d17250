//! Authenticated HTTP client for the Stripe REST API.
//!
//! Both the secret store and the record store talk to the same API, so
//! request construction, version pinning and error mapping live here.
//! Stripe reports errors as `{"error": {"code": ..., "message": ...}}`;
//! a 404 or a `resource_missing` code becomes [`StoreError::NotFound`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::constants::STRIPE_API_VERSION;
use crate::error::StoreError;

/// Stripe error envelope.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Thin wrapper over [`reqwest::Client`] bound to one API base and key.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Builds a client with an explicit per-request timeout.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Remote(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts an authenticated GET against `path`.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(self.url(path)))
    }

    /// Starts an authenticated POST against `path`.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.url(path)))
    }

    /// Sends `request` and decodes a 2xx body as `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| StoreError::Decode(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.api_key)
            .header("Stripe-Version", STRIPE_API_VERSION)
    }
}

/// Maps a non-2xx response onto [`StoreError`].
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> StoreError {
    let parsed = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error);

    let resource_missing = parsed
        .as_ref()
        .and_then(|e| e.code.as_deref())
        .is_some_and(|code| code == "resource_missing");

    if status == StatusCode::NOT_FOUND || resource_missing {
        return StoreError::NotFound;
    }

    let message = parsed.and_then(|e| e.message).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    });
    StoreError::Remote(format!("{}: {}", status.as_u16(), message))
}
