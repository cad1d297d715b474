use std::sync::RwLock;

use chrono::{DateTime, Utc};

/// The credential tuple for the current user session.
///
/// An empty access token means "unauthenticated": requests fall back to the
/// static API key only and carry no bearer header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token injected into outgoing requests.
    pub access_token: String,
    /// Opaque token used to obtain a new access token.
    pub refresh_token: String,
    /// When the access token expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
    /// Identifier of the principal the session belongs to, if known.
    pub user_id: Option<String>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at: None,
            user_id: None,
        }
    }

    /// Whether this session carries a usable access token.
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Whether the access token has expired, judged against `now`.
    ///
    /// Sessions without a known expiry are never considered expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

/// Single source of truth for the current [`Session`].
///
/// Safe to read concurrently with writes. Reads return a full snapshot clone,
/// so callers never observe a half-updated state; writes swap the whole
/// session atomically. There is no partial-field mutation path: sign-in,
/// token refresh, and sign-out all go through [`SessionStore::replace`]
/// (sign-out replaces with the empty session).
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Session>,
}

impl SessionStore {
    /// Create an empty (unauthenticated) store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current session.
    pub fn get(&self) -> Session {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Atomically swap in a new session, wholesale.
    ///
    /// Every request whose header assembly starts after this returns observes
    /// the new session; requests already in flight keep the snapshot they
    /// captured.
    pub fn replace(&self, session: Session) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = session;
    }

    /// Replace with the empty session (sign-out).
    pub fn clear(&self) {
        self.replace(Session::default());
    }
}
