use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{RestbaseError, RestbaseResult};
use crate::session::{Session, SessionStore};

/// The composition root binding base URL, API key, and session state.
///
/// Cheap to clone; clones share the same [`SessionStore`], so a session
/// published through one clone is observed by requests issued from any other.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    api_key: Arc<str>,
    schema: String,
    session: Arc<SessionStore>,
}

impl Client {
    /// Create a new client from a configuration.
    ///
    /// Validates the URL and key up front; performs no I/O. The session store
    /// starts empty (unauthenticated).
    pub fn new(config: ClientConfig) -> RestbaseResult<Self> {
        if config.key.is_empty() {
            return Err(RestbaseError::config("API key must not be empty"));
        }
        let base_url = Url::parse(config.url.trim_end_matches('/'))?;
        if !base_url.has_host() {
            return Err(RestbaseError::config(format!(
                "URL has no host: {}",
                config.url
            )));
        }

        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RestbaseError::config(format!("invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| RestbaseError::config(format!("invalid header value: {e}")))?;
            default_headers.insert(name, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: Arc::from(config.key.as_str()),
            schema: config.schema,
            session: Arc::new(SessionStore::new()),
        })
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The project base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The static API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Shared handle on the API key.
    pub fn api_key_arc(&self) -> Arc<str> {
        Arc::clone(&self.api_key)
    }

    /// The default schema.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// The session store shared by every request path of this client.
    pub fn session_store(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Snapshot of the current session.
    pub fn current_session(&self) -> Session {
        self.session.get()
    }

    /// Publish a new session, wholesale replacing the previous one.
    ///
    /// This is the hook the auth collaborator calls after sign-in, sign-up,
    /// or token refresh. Requests started after this call carry the new
    /// bearer token.
    pub fn update_session(&self, session: Session) {
        self.session.replace(session);
    }

    /// Drop the current session, returning to API-key-only identity.
    pub fn clear_session(&self) {
        self.session.clear();
    }
}
