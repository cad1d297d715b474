//! Authentication collaborator for restbase.
//!
//! Talks to the auth endpoints at `/auth/v1/...` and returns sessions; the
//! facade crate wires those sessions into the client's [`SessionStore`]
//! (sign-in and refresh replace the stored credential wholesale, sign-out
//! clears it). The query core never initiates a refresh itself.
//!
//! [`SessionStore`]: restbase_core::SessionStore

pub mod client;
pub mod error;
pub mod types;

pub use client::AuthClient;
pub use error::{AuthApiErrorBody, AuthError};
pub use types::{AuthSession, SignUpResponse, User};

use restbase_core::Client;

/// Extension trait to create an [`AuthClient`] from a [`Client`].
pub trait ClientAuthExt {
    /// Create an [`AuthClient`] from the client's base URL and API key.
    fn auth(&self) -> Result<AuthClient, AuthError>;
}

impl ClientAuthExt for Client {
    fn auth(&self) -> Result<AuthClient, AuthError> {
        AuthClient::new(self.base_url().as_str(), self.api_key())
    }
}
