use restbase_auth::{AuthError, AuthSession, ClientAuthExt};
use restbase_core::Client;

/// Convenience operations that wire auth results into the client's session
/// store.
///
/// Each success path ends in exactly one wholesale `SessionStore` replace;
/// there is no partial credential mutation and no automatic
/// refresh-and-retry — a request that fails with an expired token stays
/// failed until the caller refreshes explicitly and re-issues it.
#[allow(async_fn_in_trait)]
pub trait ClientSessionExt {
    /// Sign in with email and password and publish the resulting session.
    async fn sign_in_with_email_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Sign in with phone and password and publish the resulting session.
    async fn sign_in_with_phone_password(
        &self,
        phone: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError>;

    /// Exchange the stored refresh token for a new session and publish it.
    ///
    /// Fails with [`AuthError::NoSession`] when no refresh token is stored.
    async fn refresh_session(&self) -> Result<AuthSession, AuthError>;

    /// Revoke the current session on the server and clear the store.
    async fn sign_out(&self) -> Result<(), AuthError>;
}

impl ClientSessionExt for Client {
    async fn sign_in_with_email_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let session = self
            .auth()?
            .sign_in_with_password_email(email, password)
            .await?;
        self.update_session(session.credential());
        Ok(session)
    }

    async fn sign_in_with_phone_password(
        &self,
        phone: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let session = self
            .auth()?
            .sign_in_with_password_phone(phone, password)
            .await?;
        self.update_session(session.credential());
        Ok(session)
    }

    async fn refresh_session(&self) -> Result<AuthSession, AuthError> {
        let current = self.current_session();
        if current.refresh_token.is_empty() {
            return Err(AuthError::NoSession);
        }
        let session = self.auth()?.refresh_session(&current.refresh_token).await?;
        self.update_session(session.credential());
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let current = self.current_session();
        if current.is_authenticated() {
            self.auth()?.sign_out(&current.access_token).await?;
        }
        self.clear_session();
        Ok(())
    }
}
