use std::fmt;

use reqwest::Method;

use restbase_core::{QueryResponse, RestbaseError, RestbaseResult};

use crate::execute::RequestExecutor;
use crate::request::{CountOption, IsValue, RequestDescription};

/// Fluent builder accumulating a query description for one table.
///
/// Nothing is executed until [`execute`](Self::execute) or
/// [`execute_string`](Self::execute_string) is called. Each filter method
/// appends one `(column, operator.value)` pair at call time; repeated calls
/// on the same column accumulate in call order (conjunctive on the backend),
/// never overwrite. A builder belongs to a single call chain and is consumed
/// by execution.
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    executor: RequestExecutor,
    table: String,
    columns: String,
    count: CountOption,
    head: bool,
    filters: Vec<(String, String)>,
}

impl FilterBuilder {
    pub(crate) fn new(executor: RequestExecutor, table: impl Into<String>) -> Self {
        Self {
            executor,
            table: table.into(),
            columns: "*".to_string(),
            count: CountOption::None,
            head: false,
            filters: Vec::new(),
        }
    }

    /// Set the column projection, count mode, and head-only flag.
    ///
    /// An empty `columns` selects everything (`*`). With `head` set, the
    /// request uses the HEAD verb and the response body is suppressed; only
    /// headers (and thus the count) come back.
    pub fn select(mut self, columns: &str, count: CountOption, head: bool) -> Self {
        self.columns = if columns.is_empty() {
            "*".to_string()
        } else {
            columns.to_string()
        };
        self.count = count;
        self.head = head;
        self
    }

    fn filter(mut self, column: &str, operator: &str, value: impl fmt::Display) -> Self {
        self.filters
            .push((column.to_string(), format!("{operator}.{value}")));
        self
    }

    /// Filter: column = value
    pub fn eq(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, "eq", value)
    }

    /// Filter: column != value
    pub fn neq(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, "neq", value)
    }

    /// Filter: column > value
    pub fn gt(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, "gt", value)
    }

    /// Filter: column >= value
    pub fn gte(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, "gte", value)
    }

    /// Filter: column < value
    pub fn lt(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, "lt", value)
    }

    /// Filter: column <= value
    pub fn lte(self, column: &str, value: impl fmt::Display) -> Self {
        self.filter(column, "lte", value)
    }

    /// Filter: column LIKE pattern
    pub fn like(self, column: &str, pattern: impl fmt::Display) -> Self {
        self.filter(column, "like", pattern)
    }

    /// Filter: column ILIKE pattern (case-insensitive)
    pub fn ilike(self, column: &str, pattern: impl fmt::Display) -> Self {
        self.filter(column, "ilike", pattern)
    }

    /// Filter: column IS NULL / NOT NULL / TRUE / FALSE
    pub fn is_(mut self, column: &str, value: IsValue) -> Self {
        self.filters
            .push((column.to_string(), format!("is.{}", value.render())));
        self
    }

    /// Filter: column IN (v1, v2, ...)
    pub fn in_<V: fmt::Display>(mut self, column: &str, values: &[V]) -> Self {
        let list = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.filters
            .push((column.to_string(), format!("in.({list})")));
        self
    }

    /// Order the result by a column.
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.filters
            .push(("order".to_string(), format!("{column}.{direction}")));
        self
    }

    /// Limit the number of returned rows.
    pub fn limit(mut self, n: u64) -> Self {
        self.filters.push(("limit".to_string(), n.to_string()));
        self
    }

    /// Skip the first `n` rows.
    pub fn offset(mut self, n: u64) -> Self {
        self.filters.push(("offset".to_string(), n.to_string()));
        self
    }

    /// Return rows `from..=to` (zero-based, inclusive).
    pub fn range(self, from: u64, to: u64) -> Self {
        self.offset(from).limit(to.saturating_sub(from) + 1)
    }

    /// Finalize the request description without executing it.
    ///
    /// Fails with [`RestbaseError::InvalidRequest`] on an empty table name,
    /// before any network call is attempted.
    pub fn build(&self) -> RestbaseResult<RequestDescription> {
        if self.table.is_empty() {
            return Err(RestbaseError::invalid_request("table name must not be empty"));
        }

        let mut query = Vec::with_capacity(self.filters.len() + 1);
        query.push(("select".to_string(), self.columns.clone()));
        query.extend(self.filters.iter().cloned());

        Ok(RequestDescription {
            path: self.table.clone(),
            method: if self.head { Method::HEAD } else { Method::GET },
            query,
            count: self.count,
            body: None,
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
