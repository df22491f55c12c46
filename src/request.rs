//! Incoming HTTP request type.

use std::collections::HashMap;
use std::str::FromStr;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// An incoming HTTP request with its body fully read.
pub struct Request {
    pub(crate) query: Option<String>,
    pub(crate) headers: http::HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(req: http::Request<Bytes>, params: HashMap<String, String>) -> Self {
        let (parts, body) = req.into_parts();
        Self {
            query: parts.uri.query().map(str::to_owned),
            headers: parts.headers,
            body,
            params,
        }
    }

    pub fn query(&self) -> Option<&str> { self.query.as_deref() }

    /// Header lookup. Names are case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/products/{id}`, `req.param("id")` on `/products/42`
    /// returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses a path parameter, rejecting the request with `400` when it is
    /// missing or malformed.
    pub fn param_as<T: FromStr>(&self, key: &str) -> Result<T, ApiError> {
        let raw = self
            .param(key)
            .ok_or_else(|| ApiError::BadRequest(format!("missing path parameter `{key}`")))?;
        raw.parse()
            .map_err(|_| ApiError::BadRequest(format!("invalid {key}: `{raw}`")))
    }

    /// First value of a percent-decoded query-string parameter.
    pub fn query_param(&self, key: &str) -> Option<String> {
        url::form_urlencoded::parse(self.query()?.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Decodes the body as JSON. An empty body decodes as `{}`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let body: &[u8] = if self.body.is_empty() { b"{}" } else { &self.body };
        serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
    }
}
