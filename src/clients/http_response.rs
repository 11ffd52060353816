//! HTTP response types for Services calls.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::errors::ServicesError;

/// A successful response from a Services endpoint.
///
/// Only 200 and 201 responses become an `HttpResponse`; every other status is
/// turned into a [`ServicesError`] by the executor.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name.
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded body (`Value::Null` for an empty body).
    pub body: Value,
    /// The raw body text.
    pub raw_body: String,
}

impl HttpResponse {
    /// Decodes a raw body.
    ///
    /// An empty (or whitespace only) body decodes to `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::Protocol`] if the body is not valid JSON.
    pub fn from_raw(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        raw_body: String,
    ) -> Result<Self, ServicesError> {
        let body = if raw_body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&raw_body).map_err(|e| {
                ServicesError::protocol(code, format!("invalid JSON body: {e}"), raw_body.as_str())
            })?
        };

        Ok(Self {
            code,
            headers,
            body,
            raw_body,
        })
    }

    /// Returns `true` for the statuses Services reports on success.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self.code, 200 | 201)
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Decodes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::Protocol`] if the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ServicesError> {
        serde_json::from_value(self.body.clone()).map_err(|e| {
            ServicesError::protocol(
                self.code,
                format!("unexpected response shape: {e}"),
                self.raw_body.as_str(),
            )
        })
    }

    /// Consumes the response and returns the decoded body.
    #[must_use]
    pub fn into_body(self) -> Value {
        self.body
    }
}
