use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Method;
use url::Url;

use restbase_core::{Client, QueryResponse, RestbaseError, RestbaseResult, SessionStore};

use crate::request::RequestDescription;

/// Turns a [`RequestDescription`] into a transport call and a decoded
/// [`QueryResponse`].
///
/// Holds everything header assembly needs: the HTTP client, the base URL, the
/// static API key, the configured schema, and a handle on the session store.
/// The session is read exactly once per execution, at header-assembly time,
/// so a concurrent session replacement never swaps credentials mid-request.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    http: reqwest::Client,
    base_url: Url,
    api_key: Arc<str>,
    schema: String,
    session: Arc<SessionStore>,
}

impl RequestExecutor {
    /// Build an executor from a client's configuration and session store.
    pub fn new(client: &Client) -> Self {
        Self {
            http: client.http().clone(),
            base_url: client.base_url().clone(),
            api_key: client.api_key_arc(),
            schema: client.schema().to_string(),
            session: Arc::clone(client.session_store()),
        }
    }

    /// Render the full URL for a description, query parameters in list order.
    pub fn endpoint_url(&self, desc: &RequestDescription) -> RestbaseResult<Url> {
        let mut url = Url::parse(&format!(
            "{}/rest/v1/{}",
            self.base_url.as_str().trim_end_matches('/'),
            desc.path
        ))?;
        for (key, value) in &desc.query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// Execute the description once and decode the response.
    ///
    /// Non-2xx statuses become [`RestbaseError::Api`] with the body carried
    /// verbatim; no retry is attempted. An unparsable count header degrades
    /// to an absent count, never an error.
    pub async fn execute(&self, desc: RequestDescription) -> RestbaseResult<QueryResponse> {
        let url = self.endpoint_url(&desc)?;
        let headers = self.assemble_headers(&desc)?;

        tracing::debug!(method = %desc.method, url = %url, "executing request");

        let mut request = self.http.request(desc.method.clone(), url).headers(headers);
        if let Some(ref body) = desc.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let resp_headers = response.headers().clone();

        if !status.is_success() {
            let body = if desc.is_head() {
                String::new()
            } else {
                response.text().await.unwrap_or_default()
            };
            return Err(RestbaseError::api(status.as_u16(), body));
        }

        let count = if desc.count.is_requested() {
            parse_total_count(&resp_headers)
        } else {
            None
        };

        // Head-only reads never touch the body.
        let data = if desc.is_head() {
            Vec::new()
        } else {
            response.bytes().await?.to_vec()
        };

        Ok(QueryResponse::new(data, count))
    }

    fn assemble_headers(&self, desc: &RequestDescription) -> RestbaseResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| RestbaseError::config(format!("invalid API key header: {e}")))?,
        );

        // One snapshot per request: credentials are fixed from here on.
        let session = self.session.get();
        if session.is_authenticated() {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", session.access_token)).map_err(
                    |e| RestbaseError::invalid_request(format!("invalid access token: {e}")),
                )?,
            );
        }

        if let Some(prefer) = desc.count.prefer() {
            headers.insert("Prefer", HeaderValue::from_static(prefer));
        }

        if desc.body.is_some() {
            headers.insert(
                reqwest::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }

        if self.schema != "public" {
            let name = if desc.method == Method::POST {
                "Content-Profile"
            } else {
                "Accept-Profile"
            };
            headers.insert(
                name,
                HeaderValue::from_str(&self.schema)
                    .map_err(|e| RestbaseError::config(format!("invalid schema header: {e}")))?,
            );
        }

        Ok(headers)
    }
}

/// Extract the total row count from a `Content-Range` header ("0-9/97" or
/// "*/97"). A missing or unparsable value degrades to `None`.
pub(crate) fn parse_total_count(headers: &HeaderMap) -> Option<i64> {
    let raw = headers.get("content-range")?.to_str().ok()?;
    let total = &raw[raw.rfind('/')? + 1..];
    if total == "*" {
        return None;
    }
    match total.parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => {
            tracing::debug!(header = raw, "unparsable content-range total: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use restbase_core::ClientConfig;

    use super::*;
    use crate::request::CountOption;

    fn executor() -> RequestExecutor {
        let client =
            Client::new(ClientConfig::new("https://example.supacorp.co", "anon-key")).unwrap();
        RequestExecutor::new(&client)
    }

    fn desc(path: &str, query: Vec<(&str, &str)>) -> RequestDescription {
        RequestDescription {
            path: path.to_string(),
            method: Method::GET,
            query: query
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            count: CountOption::None,
            body: None,
        }
    }

    #[test]
    fn url_renders_path_and_params_in_order() {
        let url = executor()
            .endpoint_url(&desc(
                "countries",
                vec![("select", "*"), ("name", "eq.NZ"), ("name", "neq.AU")],
            ))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.supacorp.co/rest/v1/countries?select=*&name=eq.NZ&name=neq.AU"
        );
    }

    #[test]
    fn url_encodes_reserved_characters() {
        let url = executor()
            .endpoint_url(&desc("cities", vec![("name", "eq.São Paulo")]))
            .unwrap();
        assert!(url.query().unwrap().contains("eq.S%C3%A3o+Paulo"));
    }

    #[test]
    fn content_range_total_is_parsed() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Range", HeaderValue::from_static("0-9/97"));
        assert_eq!(parse_total_count(&headers), Some(97));
    }

    #[test]
    fn content_range_wildcard_total_degrades_to_none() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Range", HeaderValue::from_static("*/*"));
        assert_eq!(parse_total_count(&headers), None);
    }

    #[test]
    fn garbage_content_range_degrades_to_none() {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Range", HeaderValue::from_static("0-9/many"));
        assert_eq!(parse_total_count(&headers), None);

        headers.insert("Content-Range", HeaderValue::from_static("no-slash"));
        assert_eq!(parse_total_count(&headers), None);
    }

    #[test]
    fn missing_content_range_is_none() {
        assert_eq!(parse_total_count(&HeaderMap::new()), None);
    }
}
