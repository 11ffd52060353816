//! HTTP request types for Services calls.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests against a Services endpoint.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::error::InputError;
use crate::query::QueryParams;

/// HTTP methods used by Services resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Retrieve or index a resource.
    Get,
    /// Create a resource or call an action.
    Post,
    /// Update a resource.
    Put,
    /// Delete a resource.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods that must carry a body.
    #[must_use]
    pub const fn requires_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request to be sent to a Services endpoint.
///
/// Use [`HttpRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use drupal_services::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "node.json")
///     .query_param("page", "2")
///     .build()
///     .unwrap();
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "node.json")
///     .body(json!({"type": "article", "title": "Hello"}))
///     .build()
///     .unwrap();
///
/// assert!(HttpRequest::builder(HttpMethod::Put, "node/1.json").build().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The endpoint, relative to the base URL (e.g. `node/1.json`).
    pub path: String,
    /// The JSON body, if any.
    pub body: Option<Value>,
    /// Query parameters. Only sent with GET requests.
    pub query: Option<QueryParams>,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
    /// Hide the body from debug traces.
    pub redact_body: bool,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingBody`] if `http_method` is `Post` or
    /// `Put` but `body` is `None`.
    pub fn verify(&self) -> Result<(), InputError> {
        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InputError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<Value>,
    query: Option<QueryParams>,
    extra_headers: Option<HashMap<String, String>>,
    redact_body: bool,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            body: None,
            query: None,
            extra_headers: None,
            redact_body: false,
        }
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the body only when `body` is `Some`.
    #[must_use]
    pub fn maybe_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter, replacing an existing value for `key`.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query
            .get_or_insert_with(QueryParams::new)
            .insert(key, value);
        self
    }

    /// Adds a single extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Keeps the body out of debug traces (used for login).
    #[must_use]
    pub const fn redact_body(mut self) -> Self {
        self.redact_body = true;
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MissingBody`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InputError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
            extra_headers: self.extra_headers,
            redact_body: self.redact_body,
        };
        request.verify()?;
        Ok(request)
    }
}
