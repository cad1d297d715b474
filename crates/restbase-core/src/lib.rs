//! Core types for the restbase client: the [`Client`] composition root, the
//! session store injected into every request path, the error taxonomy, and
//! the raw query response type.

pub mod client;
pub mod config;
pub mod error;
pub mod response;
pub mod session;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{RestbaseError, RestbaseResult};
pub use response::QueryResponse;
pub use session::{Session, SessionStore};
