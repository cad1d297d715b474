use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::json;
use url::Url;

use crate::error::{AuthApiErrorBody, AuthError};
use crate::types::{AuthSession, SignUpResponse, User};

/// HTTP client for the auth endpoints at `/auth/v1/...`.
///
/// Stateless: it performs the credential exchange and hands back sessions.
/// Publishing a session into a client's store is the caller's (or the facade
/// extension trait's) responsibility; this client never mutates session
/// state and never retries on its own.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl AuthClient {
    /// Create a new auth client from the project URL and static API key.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AuthError> {
        let base = base_url.trim_end_matches('/');
        let base_url = Url::parse(&format!("{base}/auth/v1"))?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            "apikey",
            HeaderValue::from_str(api_key)
                .map_err(|e| AuthError::InvalidConfig(format!("invalid API key header: {e}")))?,
        );
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(default_headers)
            .build()
            .map_err(AuthError::Http)?;

        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    // ─── Sign Up ───────────────────────────────────────────────

    /// Register a new user with email and password.
    pub async fn sign_up_with_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignUpResponse, AuthError> {
        let body = json!({ "email": email, "password": password });
        let resp = self.http.post(self.url("/signup")).json(&body).send().await?;
        self.handle_json_response(resp).await
    }

    /// Register a new user with phone and password.
    pub async fn sign_up_with_phone(
        &self,
        phone: &str,
        password: &str,
    ) -> Result<SignUpResponse, AuthError> {
        let body = json!({ "phone": phone, "password": password });
        let resp = self.http.post(self.url("/signup")).json(&body).send().await?;
        self.handle_json_response(resp).await
    }

    // ─── Sign In ───────────────────────────────────────────────

    /// Sign in with email and password (password grant).
    pub async fn sign_in_with_password_email(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let body = json!({ "email": email, "password": password });
        let resp = self
            .http
            .post(self.url("/token?grant_type=password"))
            .json(&body)
            .send()
            .await?;
        self.handle_json_response(resp).await
    }

    /// Sign in with phone and password (password grant).
    pub async fn sign_in_with_password_phone(
        &self,
        phone: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let body = json!({ "phone": phone, "password": password });
        let resp = self
            .http
            .post(self.url("/token?grant_type=password"))
            .json(&body)
            .send()
            .await?;
        self.handle_json_response(resp).await
    }

    // ─── Session Management ────────────────────────────────────

    /// Exchange a refresh token for a new session.
    ///
    /// The core never calls this on its own; refresh is an explicit caller
    /// decision.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let body = json!({ "refresh_token": refresh_token });
        let resp = self
            .http
            .post(self.url("/token?grant_type=refresh_token"))
            .json(&body)
            .send()
            .await?;
        self.handle_json_response(resp).await
    }

    /// Fetch the user associated with an access token.
    pub async fn get_user(&self, access_token: &str) -> Result<User, AuthError> {
        let resp = self
            .http
            .get(self.url("/user"))
            .bearer_auth(access_token)
            .send()
            .await?;
        self.handle_json_response(resp).await
    }

    /// Revoke the session behind an access token.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let resp = self
            .http
            .post(self.url("/logout"))
            .bearer_auth(access_token)
            .send()
            .await?;
        self.handle_empty_response(resp).await
    }

    // ─── Internal Helpers ──────────────────────────────────────

    pub(crate) fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let current = url.path().to_string();
        // path may carry a query string (e.g. "/token?grant_type=password")
        if let Some(query_start) = path.find('?') {
            url.set_path(&format!("{current}{}", &path[..query_start]));
            url.set_query(Some(&path[query_start + 1..]));
        } else {
            url.set_path(&format!("{current}{path}"));
        }
        url
    }

    async fn handle_json_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, AuthError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(self.parse_error(status, resp).await);
        }
        Ok(resp.json().await?)
    }

    async fn handle_empty_response(&self, resp: reqwest::Response) -> Result<(), AuthError> {
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(self.parse_error(status, resp).await);
        }
        Ok(())
    }

    async fn parse_error(&self, status: u16, resp: reqwest::Response) -> AuthError {
        match resp.json::<AuthApiErrorBody>().await {
            Ok(body) => AuthError::Api {
                status,
                message: body.message(),
                error_code: body.error_code,
            },
            Err(_) => AuthError::Api {
                status,
                message: format!("HTTP {status}"),
                error_code: None,
            },
        }
    }
}
