//! Fluent query construction and execution for PostgREST-compatible backends.
//!
//! A chain of filter/selection calls on a [`FilterBuilder`] becomes a single
//! well-formed HTTP request; the response decodes into raw payload bytes plus
//! an optional out-of-band total-row count. RPC calls share the same executor
//! path via [`RpcBuilder`].
//!
//! ```ignore
//! use restbase_core::{Client, ClientConfig};
//! use restbase_query::{ClientQueryExt, CountOption};
//!
//! let client = Client::new(ClientConfig::new(url, key))?;
//! let (rows, count) = client
//!     .from("countries")
//!     .select("*", CountOption::Exact, false)
//!     .eq("code", "NZ")
//!     .execute_string()
//!     .await?;
//! ```

pub mod builder;
pub mod execute;
pub mod request;
pub mod rpc;

pub use builder::FilterBuilder;
pub use execute::RequestExecutor;
pub use request::{CountOption, IsValue, RequestDescription};
pub use rpc::RpcBuilder;

use serde_json::Value as JsonValue;

use restbase_core::Client;

/// Extension trait adding query entry points to [`Client`].
pub trait ClientQueryExt {
    /// Begin a query builder bound to `table`. Performs no I/O; an empty
    /// table name fails at finalize time.
    fn from(&self, table: &str) -> FilterBuilder;

    /// Begin a stored-procedure call to `function` with `args` as the
    /// parameter object (or null for none).
    fn rpc(&self, function: &str, count: CountOption, args: JsonValue) -> RpcBuilder;
}

impl ClientQueryExt for Client {
    fn from(&self, table: &str) -> FilterBuilder {
        FilterBuilder::new(RequestExecutor::new(self), table)
    }

    fn rpc(&self, function: &str, count: CountOption, args: JsonValue) -> RpcBuilder {
        RpcBuilder::new(RequestExecutor::new(self), function, count, args)
    }
}
