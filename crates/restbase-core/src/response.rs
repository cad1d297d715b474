use serde::de::DeserializeOwned;

use crate::error::{RestbaseError, RestbaseResult};

/// Decoded result of one executed query.
///
/// The payload is the raw JSON bytes from the backend, returned undecoded;
/// mapping into domain types is the caller's job. The count is the total-row
/// signal extracted from the `Content-Range` response header when a count
/// mode was requested at build time, and `None` otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    /// Raw response body bytes.
    pub data: Vec<u8>,
    /// Total row count, when a count mode was requested and the header parsed.
    pub count: Option<i64>,
}

impl QueryResponse {
    pub fn new(data: Vec<u8>, count: Option<i64>) -> Self {
        Self { data, count }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the payload as UTF-8 text.
    pub fn as_str(&self) -> RestbaseResult<&str> {
        std::str::from_utf8(&self.data)
            .map_err(|e| RestbaseError::serialization(format!("response is not UTF-8: {e}")))
    }

    /// Consume into the textual form of the payload plus the count.
    pub fn into_string(self) -> RestbaseResult<(String, Option<i64>)> {
        let count = self.count;
        let text = String::from_utf8(self.data)
            .map_err(|e| RestbaseError::serialization(format!("response is not UTF-8: {e}")))?;
        Ok((text, count))
    }

    /// Deserialize the payload into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> RestbaseResult<T> {
        Ok(serde_json::from_slice(&self.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_string_carries_count() {
        let resp = QueryResponse::new(b"[{\"id\":1}]".to_vec(), Some(97));
        let (text, count) = resp.into_string().unwrap();
        assert_eq!(text, "[{\"id\":1}]");
        assert_eq!(count, Some(97));
    }

    #[test]
    fn invalid_utf8_is_a_serialization_error() {
        let resp = QueryResponse::new(vec![0xff, 0xfe], None);
        assert!(matches!(
            resp.into_string(),
            Err(RestbaseError::Serialization(_))
        ));
    }

    #[test]
    fn json_decodes_payload() {
        #[derive(serde::Deserialize, PartialEq, Debug)]
        struct Row {
            id: i64,
        }
        let resp = QueryResponse::new(b"[{\"id\":7}]".to_vec(), None);
        let rows: Vec<Row> = resp.json().unwrap();
        assert_eq!(rows, vec![Row { id: 7 }]);
    }
}
