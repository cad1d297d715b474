/// All errors that can occur in the restbase core crates.
#[derive(Debug, thiserror::Error)]
pub enum RestbaseError {
    /// Malformed builder usage, caught before any I/O is attempted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network or connection-level failure from the transport.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend returned a non-success status. The body is carried
    /// verbatim for diagnostics; no retry is performed.
    #[error("request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl RestbaseError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// The backend status code, when this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RestbaseError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result alias using RestbaseError.
pub type RestbaseResult<T> = Result<T, RestbaseError>;
