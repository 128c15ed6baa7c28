//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::RecordError;
use crate::method::Method;

/// An incoming HTTP request with its body fully buffered and its path
/// parameters extracted by the router.
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: HeaderMap,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self { method, path, headers, body, params }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }

    /// Case-insensitive header lookup. Non-UTF-8 values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/people/{id}`, `req.param("id")` on `/people/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Decodes the body as JSON.
    ///
    /// An empty or malformed body is rejected rather than defaulted.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RecordError> {
        serde_json::from_slice(&self.body).map_err(|e| RecordError::InvalidInput(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &'static [u8]) -> Request {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        Request::new(
            Method::Post,
            "/people/7".to_owned(),
            headers,
            Bytes::from_static(body),
            HashMap::from([("id".to_owned(), "7".to_owned())]),
        )
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = request(b"{}");
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
        assert_eq!(req.param("id"), Some("7"));
    }

    #[test]
    fn malformed_body_is_invalid_input() {
        let req = request(b"{\"name\":");
        let err = req.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, RecordError::InvalidInput(_)));

        let empty = request(b"");
        assert!(empty.json::<serde_json::Value>().is_err());
    }
}
