use serde::Deserialize;

/// Error response body from the auth server.
///
/// The server returns errors in several shapes; this covers the common
/// fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}

impl AuthApiErrorBody {
    /// The most informative message present in the body.
    pub fn message(&self) -> String {
        self.msg
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error_description.as_deref())
            .or(self.error.as_deref())
            .unwrap_or("unknown error")
            .to_string()
    }
}

/// Auth-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The auth server returned an error response.
    #[error("auth API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        error_code: Option<String>,
    },

    #[error("invalid auth configuration: {0}")]
    InvalidConfig(String),

    /// No active session to refresh or sign out of.
    #[error("no active session")]
    NoSession,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
}
