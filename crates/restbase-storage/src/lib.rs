//! Thin storage-bucket pass-through.
//!
//! An independent HTTP call site that reads the shared [`SessionStore`] for
//! bearer-header injection, exactly like the query executor does. No state
//! machine of its own.
//!
//! [`SessionStore`]: restbase_core::SessionStore

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use url::Url;

use restbase_core::{Client, SessionStore};

/// Storage-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid storage configuration: {0}")]
    InvalidConfig(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A storage bucket.
#[derive(Debug, Clone, Deserialize)]
pub struct Bucket {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// HTTP client for the storage endpoints at `/storage/v1/...`.
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: Arc<str>,
    session: Arc<SessionStore>,
}

impl StorageClient {
    pub fn new(
        base_url: &str,
        api_key: Arc<str>,
        session: Arc<SessionStore>,
    ) -> Result<Self, StorageError> {
        let base = base_url.trim_end_matches('/');
        let base_url = Url::parse(&format!("{base}/storage/v1"))?;
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

    /// List all buckets.
    pub async fn list_buckets(&self) -> Result<Vec<Bucket>, StorageError> {
        let url = format!("{}/bucket", self.base_url);
        let resp = self
            .http
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Fetch a single bucket by id.
    pub async fn get_bucket(&self, id: &str) -> Result<Bucket, StorageError> {
        let url = format!("{}/bucket/{id}", self.base_url);
        let resp = self
            .http
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await?;
        Self::decode(resp).await
    }

    // Storage requires an Authorization header on every call: the session
    // token when present, the static API key otherwise.
    fn headers(&self) -> Result<HeaderMap, StorageError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| StorageError::InvalidConfig(format!("invalid API key: {e}")))?,
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
                .map_err(|e| StorageError::InvalidConfig(format!("invalid bearer token: {e}")))?,
        );
        Ok(headers)
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, StorageError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            let message = resp.text().await.unwrap_or_default();
            return Err(StorageError::Api { status, message });
        }
        Ok(resp.json().await?)
    }
}

/// Extension trait to create a [`StorageClient`] from a [`Client`].
pub trait ClientStorageExt {
    /// Create a [`StorageClient`] sharing this client's session store.
    fn storage(&self) -> Result<StorageClient, StorageError>;
}

impl ClientStorageExt for Client {
    fn storage(&self) -> Result<StorageClient, StorageError> {
        StorageClient::new(
            self.base_url().as_str(),
            self.api_key_arc(),
            Arc::clone(self.session_store()),
        )
    }
}

#[cfg(test)]
mod tests {
    use restbase_core::{ClientConfig, Session};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn get_bucket_uses_session_bearer_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/storage/v1/bucket/photos"))
            .and(header("authorization", "Bearer user-jwt"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"id":"photos","name":"photos","public":true}"#,
                "application/json",
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(ClientConfig::new(server.uri(), "anon-key")).unwrap();
        client.update_session(Session::new("user-jwt", "refresh"));
        let bucket = client.storage().unwrap().get_bucket("photos").await.unwrap();
        assert_eq!(bucket.id, "photos");
        assert!(bucket.public);
    }

    #[tokio::test]
    async fn list_buckets_falls_back_to_api_key_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/storage/v1/bucket"))
            .and(header("authorization", "Bearer anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(ClientConfig::new(server.uri(), "anon-key")).unwrap();
        let buckets = client.storage().unwrap().list_buckets().await.unwrap();
        assert!(buckets.is_empty());
    }
}
