use reqwest::Method;
use serde_json::Value as JsonValue;

use restbase_core::{QueryResponse, RestbaseError, RestbaseResult};

use crate::execute::RequestExecutor;
use crate::request::{CountOption, RequestDescription};

/// Builder for stored-procedure calls.
///
/// A constrained specialization of the query path: serializes a function name
/// and a parameter object into a POST to `rpc/<name>` and routes it through
/// the shared [`RequestExecutor`]. Count mode behaves exactly as it does for
/// [`FilterBuilder`](crate::FilterBuilder).
#[derive(Debug, Clone)]
pub struct RpcBuilder {
    executor: RequestExecutor,
    function: String,
    count: CountOption,
    args: JsonValue,
}

impl RpcBuilder {
    pub(crate) fn new(
        executor: RequestExecutor,
        function: impl Into<String>,
        count: CountOption,
        args: JsonValue,
    ) -> Self {
        Self {
            executor,
            function: function.into(),
            count,
            args,
        }
    }

    /// Finalize the request description without executing it.
    ///
    /// Absent parameters serialize as an empty object; anything other than an
    /// object or null is rejected, as is an empty function name.
    pub fn build(&self) -> RestbaseResult<RequestDescription> {
        if self.function.is_empty() {
            return Err(RestbaseError::invalid_request(
                "function name must not be empty",
            ));
        }
        let body = match &self.args {
            JsonValue::Null => JsonValue::Object(serde_json::Map::new()),
            JsonValue::Object(_) => self.args.clone(),
            _ => {
                return Err(RestbaseError::invalid_request(
                    "RPC arguments must be a JSON object or null",
                ))
            }
        };

        Ok(RequestDescription {
            path: format!("rpc/{}", self.function),
            method: Method::POST,
            query: Vec::new(),
            count: self.count,
            body: Some(body),
        })
    }

    /// Finalize and execute, returning the raw payload and optional count.
    pub async fn execute(self) -> RestbaseResult<QueryResponse> {
        let desc = self.build()?;
        self.executor.execute(desc).await
    }

    /// Same call and error semantics as [`execute`](Self::execute), with the
    /// payload decoded as UTF-8 text.
    pub async fn execute_string(self) -> RestbaseResult<(String, Option<i64>)> {
        self.execute().await?.into_string()
    }
}
