//! Error taxonomy for Services calls.
//!
//! Every operation returns [`ServicesError`]. HTTP failures are classified
//! by status code by [`classify_status`]:
//!
//! | status | variant |
//! |---|---|
//! | 200, 201 | success |
//! | 400 | [`ServicesError::BadRequest`], or [`ServicesError::Conflict`] for the duplicate-SKU body |
//! | 401, 403 | [`ServicesError::Authentication`] |
//! | 404 | [`ServicesError::NotFound`] |
//! | 409 | [`ServicesError::Conflict`] |
//! | 500 | [`ServicesError::Internal`] |
//! | anything else | [`ServicesError::Service`] |
//!
//! # Example
//!
//! ```rust,ignore
//! use drupal_services::ServicesError;
//!
//! match client.get_product(42).await {
//!     Ok(product) => println!("{product}"),
//!     Err(ServicesError::NotFound(e)) => println!("no such product: {}", e.body),
//!     Err(ServicesError::Authentication(_)) => println!("log in first"),
//!     Err(e) => println!("failed with status {}: {e}", e.status()),
//! }
//! ```

use thiserror::Error;

use crate::error::{ConfigError, InputError};

/// Response body Commerce Services returns when a product SKU already exists.
///
/// Matching on an exact message is fragile: any change in wording or a
/// translated message on the server turns the conflict back into a plain
/// [`ServicesError::BadRequest`].
pub const SKU_IN_USE_BODY: &str = r#"["You must specify a unique sku value"]"#;

/// Status sentinel reported for failures where no response was received.
pub const NO_STATUS: u16 = 0;

/// Details of a non-successful HTTP response.
///
/// # Example
///
/// ```rust
/// use drupal_services::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     message: "Requested item not found".to_string(),
///     body: r#"["Node 7 not found"]"#.to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Requested item not found");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// Human readable description of the failure.
    pub message: String,
    /// The raw response body.
    pub body: String,
}

impl HttpResponseError {
    fn new(code: u16, message: impl Into<String>, body: &str) -> Self {
        Self {
            code,
            message: message.into(),
            body: body.to_string(),
        }
    }
}

/// Unified error type for all Services operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServicesError {
    /// Local validation failed before any request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// No response was received.
    #[error("Transport error: {message}")]
    Transport {
        /// The underlying error text.
        message: String,
    },

    /// The server rejected the credentials or session (401, 403).
    #[error(transparent)]
    Authentication(HttpResponseError),

    /// The requested item does not exist (404).
    #[error(transparent)]
    NotFound(HttpResponseError),

    /// The request conflicts with existing data (409, or a duplicate SKU).
    #[error(transparent)]
    Conflict(HttpResponseError),

    /// The server rejected the request (400).
    #[error(transparent)]
    BadRequest(HttpResponseError),

    /// The server failed internally (500).
    #[error(transparent)]
    Internal(HttpResponseError),

    /// Any other unsuccessful status.
    #[error("Service error {}: {}", .0.code, .0.message)]
    Service(HttpResponseError),

    /// A successful response did not have the expected shape.
    #[error("Unexpected response ({code}): {reason}")]
    Protocol {
        /// The HTTP status code of the response.
        code: u16,
        /// What was wrong with the body.
        reason: String,
        /// The raw response body.
        body: String,
    },
}

impl ServicesError {
    /// Returns the HTTP status, or [`NO_STATUS`] when no response was received.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::InvalidInput(_) | Self::Transport { .. } => NO_STATUS,
            Self::Authentication(e)
            | Self::NotFound(e)
            | Self::Conflict(e)
            | Self::BadRequest(e)
            | Self::Internal(e)
            | Self::Service(e) => e.code,
            Self::Protocol { code, .. } => *code,
        }
    }

    /// Returns the raw response body, if a response was received.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::InvalidInput(_) | Self::Transport { .. } => None,
            Self::Authentication(e)
            | Self::NotFound(e)
            | Self::Conflict(e)
            | Self::BadRequest(e)
            | Self::Internal(e)
            | Self::Service(e) => Some(&e.body),
            Self::Protocol { body, .. } => Some(body),
        }
    }

    pub(crate) fn protocol(code: u16, reason: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Protocol {
            code,
            reason: reason.into(),
            body: body.into(),
        }
    }
}

impl From<ConfigError> for ServicesError {
    fn from(error: ConfigError) -> Self {
        Self::InvalidInput(InputError::Config(error))
    }
}

/// Maps an HTTP status and raw body onto the error taxonomy.
///
/// Returns `Ok(())` for 200 and 201 only.
///
/// # Errors
///
/// Returns the [`ServicesError`] variant matching `code`.
///
/// # Example
///
/// ```rust
/// use drupal_services::{classify_status, ServicesError, SKU_IN_USE_BODY};
///
/// assert!(classify_status(201, "{}").is_ok());
/// assert!(matches!(classify_status(400, SKU_IN_USE_BODY), Err(ServicesError::Conflict(_))));
/// assert!(matches!(classify_status(400, "[]"), Err(ServicesError::BadRequest(_))));
/// ```
pub fn classify_status(code: u16, body: &str) -> Result<(), ServicesError> {
    match code {
        200 | 201 => Ok(()),
        400 if body == SKU_IN_USE_BODY => Err(ServicesError::Conflict(HttpResponseError::new(
            code,
            "SKU in use",
            body,
        ))),
        400 => Err(ServicesError::BadRequest(HttpResponseError::new(
            code,
            format!("Bad request: {body}"),
            body,
        ))),
        401 | 403 => Err(ServicesError::Authentication(HttpResponseError::new(
            code,
            format!("Authentication error: {body}"),
            body,
        ))),
        404 => Err(ServicesError::NotFound(HttpResponseError::new(
            code,
            "Requested item not found",
            body,
        ))),
        409 => Err(ServicesError::Conflict(HttpResponseError::new(
            code,
            "Conflict in request",
            body,
        ))),
        500 => Err(ServicesError::Internal(HttpResponseError::new(
            code,
            "Internal error",
            body,
        ))),
        _ => Err(ServicesError::Service(HttpResponseError::new(
            code, body, body,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_statuses() {
        assert!(classify_status(200, "").is_ok());
        assert!(classify_status(201, "{}").is_ok());
    }

    #[test]
    fn test_other_success_like_statuses_are_service_errors() {
        assert!(matches!(
            classify_status(204, ""),
            Err(ServicesError::Service(e)) if e.code == 204
        ));
    }

    #[test]
    fn test_duplicate_sku_is_conflict() {
        let error = classify_status(400, SKU_IN_USE_BODY).unwrap_err();
        assert!(matches!(&error, ServicesError::Conflict(e) if e.message == "SKU in use"));
        assert_eq!(error.status(), 400);
        assert_eq!(error.body(), Some(SKU_IN_USE_BODY));
    }

    #[test]
    fn test_sku_match_is_exact() {
        let body = r#"["You must specify a unique SKU value"]"#;
        assert!(matches!(
            classify_status(400, body),
            Err(ServicesError::BadRequest(_))
        ));
    }

    #[test]
    fn test_bad_request_carries_body() {
        let error = classify_status(400, r#"["title missing"]"#).unwrap_err();
        assert!(matches!(&error, ServicesError::BadRequest(_)));
        assert!(error.to_string().contains("title missing"));
        assert_eq!(error.body(), Some(r#"["title missing"]"#));
    }

    #[test]
    fn test_authentication_statuses() {
        for code in [401, 403] {
            let error = classify_status(code, "denied").unwrap_err();
            assert!(matches!(error, ServicesError::Authentication(_)));
            assert_eq!(error.status(), code);
        }
    }

    #[test]
    fn test_not_found_conflict_internal() {
        assert!(matches!(
            classify_status(404, ""),
            Err(ServicesError::NotFound(e)) if e.code == 404
        ));
        assert!(matches!(
            classify_status(409, ""),
            Err(ServicesError::Conflict(e)) if e.code == 409
        ));
        assert!(matches!(
            classify_status(500, "boom"),
            Err(ServicesError::Internal(e)) if e.body == "boom"
        ));
    }

    #[test]
    fn test_unknown_status_is_service_error() {
        let error = classify_status(418, "teapot").unwrap_err();
        assert!(matches!(&error, ServicesError::Service(e) if e.code == 418));
        assert!(error.to_string().contains("418"));
        assert!(error.to_string().contains("teapot"));
    }

    #[test]
    fn test_local_errors_have_no_status() {
        let error: ServicesError = InputError::MissingCredentials.into();
        assert_eq!(error.status(), NO_STATUS);
        assert!(error.body().is_none());

        let error = ServicesError::Transport {
            message: "connection refused".to_string(),
        };
        assert_eq!(error.status(), NO_STATUS);
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn test_config_error_becomes_invalid_input() {
        let error: ServicesError = ConfigError::InvalidUsername {
            username: " x".to_string(),
        }
        .into();
        assert!(matches!(
            error,
            ServicesError::InvalidInput(InputError::Config(ConfigError::InvalidUsername { .. }))
        ));
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &ServicesError::Transport {
            message: "x".to_string(),
        };
        let _: &dyn std::error::Error = &HttpResponseError::new(400, "x", "");
    }
}
