//! Thin edge-function invocation pass-through.
//!
//! Like the storage surface, this is an independent HTTP call site that
//! reads the shared [`SessionStore`] for bearer-header injection and carries
//! no state of its own.
//!
//! [`SessionStore`]: restbase_core::SessionStore

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value as JsonValue;
use url::Url;

use restbase_core::{Client, SessionStore};

/// Functions-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum FunctionsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("function error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid functions configuration: {0}")]
    InvalidConfig(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// HTTP client for the edge-function endpoints at `/functions/v1/...`.
#[derive(Debug, Clone)]
pub struct FunctionsClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Arc<str>,
    session: Arc<SessionStore>,
}

impl FunctionsClient {
    pub fn new(
        base_url: &str,
        api_key: Arc<str>,
        session: Arc<SessionStore>,
    ) -> Result<Self, FunctionsError> {
        let base = base_url.trim_end_matches('/');
        let base_url = Url::parse(&format!("{base}/functions/v1"))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Invoke a deployed function with a JSON body, returning raw bytes.
    pub async fn invoke(&self, name: &str, body: JsonValue) -> Result<Vec<u8>, FunctionsError> {
        let url = format!("{}/{name}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status >= 400 {
            let message = resp.text().await.unwrap_or_default();
            return Err(FunctionsError::Api { status, message });
        }
        Ok(resp.bytes().await?.to_vec())
    }

    fn headers(&self) -> Result<HeaderMap, FunctionsError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| FunctionsError::InvalidConfig(format!("invalid API key: {e}")))?,
        );
        let session = self.session.get();
        let bearer = if session.is_authenticated() {
            session.access_token
        } else {
            self.api_key.to_string()
        };
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {bearer}"))
                .map_err(|e| FunctionsError::InvalidConfig(format!("invalid bearer token: {e}")))?,
        );
        Ok(headers)
    }
}

/// Extension trait to create a [`FunctionsClient`] from a [`Client`].
pub trait ClientFunctionsExt {
    /// Create a [`FunctionsClient`] sharing this client's session store.
    fn functions(&self) -> Result<FunctionsClient, FunctionsError>;
}

impl ClientFunctionsExt for Client {
    fn functions(&self) -> Result<FunctionsClient, FunctionsError> {
        FunctionsClient::new(
            self.base_url().as_str(),
            self.api_key_arc(),
            Arc::clone(self.session_store()),
        )
    }
}
