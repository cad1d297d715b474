use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A user session returned from sign-in, sign-up, or token refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    /// Unix timestamp of token expiry, when the server reports one.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: User,
}

impl AuthSession {
    /// The credential tuple this session publishes into the client's
    /// session store.
    pub fn credential(&self) -> restbase_core::Session {
        restbase_core::Session {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            expires_at: self.expires_at.and_then(|at| DateTime::from_timestamp(at, 0)),
            user_id: Some(self.user.id.clone()),
        }
    }
}

/// An auth-server user object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub aud: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub user_metadata: Option<JsonValue>,
    #[serde(default)]
    pub app_metadata: Option<JsonValue>,
}

/// Result of a sign-up call: a full session when the server auto-confirms,
/// otherwise the created user pending confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(AuthSession),
    User(User),
}

impl SignUpResponse {
    pub fn session(&self) -> Option<&AuthSession> {
        match self {
            Self::Session(session) => Some(session),
            Self::User(_) => None,
        }
    }

    pub fn user(&self) -> &User {
        match self {
            Self::Session(session) => &session.user,
            Self::User(user) => user,
        }
    }
}
