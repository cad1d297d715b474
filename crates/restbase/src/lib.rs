//! restbase: a client for PostgREST-compatible hosted backends.
//!
//! ```ignore
//! use restbase::prelude::*;
//!
//! let client = Client::new(ClientConfig::new(url, anon_key))?;
//!
//! client.sign_in_with_email_password(email, password).await?;
//!
//! let (rooms, _count) = client
//!     .from("rooms")
//!     .select("*", CountOption::None, false)
//!     .execute_string()
//!     .await?;
//!
//! let (greeting, _) = client
//!     .rpc("hello_world", CountOption::None, serde_json::json!({"name": "world"}))
//!     .execute_string()
//!     .await?;
//! ```

// Re-export core (always available)
pub use restbase_core::*;

// Re-export the query builder
pub use restbase_query::*;

#[cfg(feature = "auth")]
pub use restbase_auth;

#[cfg(feature = "storage")]
pub use restbase_storage;

#[cfg(feature = "functions")]
pub use restbase_functions;

#[cfg(feature = "auth")]
mod session_ext;

#[cfg(feature = "auth")]
pub use session_ext::ClientSessionExt;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use restbase::prelude::*;
/// ```
pub mod prelude {
    pub use restbase_core::{
        Client, ClientConfig, QueryResponse, RestbaseError, RestbaseResult, Session, SessionStore,
    };

    pub use restbase_query::{
        ClientQueryExt, CountOption, FilterBuilder, IsValue, RequestDescription, RpcBuilder,
    };

    #[cfg(feature = "auth")]
    pub use restbase_auth::{AuthClient, AuthError, AuthSession, ClientAuthExt, SignUpResponse, User};
    #[cfg(feature = "auth")]
    pub use crate::ClientSessionExt;

    #[cfg(feature = "storage")]
    pub use restbase_storage::{Bucket, ClientStorageExt, StorageClient, StorageError};

    #[cfg(feature = "functions")]
    pub use restbase_functions::{ClientFunctionsExt, FunctionsClient, FunctionsError};
}
