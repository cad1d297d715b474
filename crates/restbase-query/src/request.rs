use reqwest::Method;
use serde_json::Value as JsonValue;

/// Row-count reporting mode, carried on the wire in the `Prefer` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountOption {
    /// No count requested; the response count is always absent.
    #[default]
    None,
    /// Exact count via `count(*)`.
    Exact,
    /// Planner estimate.
    Planned,
    /// Statistics-based estimate.
    Estimated,
}

impl CountOption {
    /// The `Prefer` header value, or `None` when no count was requested.
    pub fn prefer(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Exact => Some("count=exact"),
            Self::Planned => Some("count=planned"),
            Self::Estimated => Some("count=estimated"),
        }
    }

    pub fn is_requested(self) -> bool {
        self != Self::None
    }
}

/// Right-hand side of an `IS` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsValue {
    Null,
    NotNull,
    True,
    False,
}

impl IsValue {
    pub(crate) fn render(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::NotNull => "not.null",
            Self::True => "true",
            Self::False => "false",
        }
    }
}

/// A finalized description of one backend request.
///
/// Produced by [`FilterBuilder::build`](crate::FilterBuilder::build) or
/// [`RpcBuilder::build`](crate::RpcBuilder::build) and handed to the
/// [`RequestExecutor`](crate::RequestExecutor). Query parameters keep their
/// append order; repeated keys are conjunctive on the backend. A description
/// is executed exactly once per execute call and never replayed by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescription {
    /// Path under `/rest/v1/`: a table name or `rpc/<function>`.
    pub path: String,
    /// GET for reads, HEAD for head-only reads, POST for RPC.
    pub method: Method,
    /// Ordered query parameters; keys may repeat.
    pub query: Vec<(String, String)>,
    /// Count mode requested at build time.
    pub count: CountOption,
    /// JSON body, present only for RPC.
    pub body: Option<JsonValue>,
}

impl RequestDescription {
    /// Whether the response body should be suppressed entirely.
    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}
