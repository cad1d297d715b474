/// Configuration for connecting to a PostgREST-compatible hosted backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Project base URL (e.g. "https://your-project.example.co").
    pub url: String,
    /// Static API key, sent as the `apikey` header on every request.
    pub key: String,
    /// Default schema (defaults to "public").
    pub schema: String,
    /// Extra headers applied to every outgoing request.
    pub headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Create a new config from a project URL and API key.
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            schema: "public".to_string(),
            headers: Vec::new(),
        }
    }

    /// Set the default schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Add a default header applied to every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::new("https://example.co", "key");
        assert_eq!(config.schema, "public");
        assert!(config.headers.is_empty());
    }

    #[test]
    fn builder_chain() {
        let config = ClientConfig::new("https://example.co", "key")
            .schema("tenant")
            .header("x-client-info", "restbase-rs");
        assert_eq!(config.schema, "tenant");
        assert_eq!(
            config.headers,
            vec![("x-client-info".to_string(), "restbase-rs".to_string())]
        );
    }
}
