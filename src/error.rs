//! Configuration and input validation errors.
//!
//! This module contains the error types raised before any request is sent:
//! configuration problems ([`ConfigError`]) and local argument validation
//! failures ([`InputError`]). Both surface to callers through
//! [`ServicesError::InvalidInput`](crate::ServicesError::InvalidInput).
//!
//! # Example
//!
//! ```rust
//! use drupal_services::{ConfigError, Username};
//!
//! let result = Username::new(" bob");
//! assert!(matches!(result, Err(ConfigError::InvalidUsername { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building or changing client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://shop.example.com/api').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// Username failed the Drupal username rules.
    #[error("Invalid username '{username}'. Usernames may not start, end or contain double spaces, and may only use letters, digits, spaces and @+_.'-")]
    InvalidUsername {
        /// The rejected username.
        username: String,
    },

    /// Currency code is not a three letter ISO 4217 code.
    #[error("Invalid currency code '{code}'. Expected three letters (e.g., 'EUR').")]
    InvalidCurrency {
        /// The rejected code.
        code: String,
    },

    /// Language tag is empty or contains whitespace.
    #[error("Invalid language code '{code}'. Expected a language tag such as 'en' or 'und'.")]
    InvalidLanguage {
        /// The rejected code.
        code: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to initialize HTTP client: {reason}")]
    HttpClientInit {
        /// The reason reported by the HTTP library.
        reason: String,
    },
}

/// Errors raised by local argument validation before a request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A configuration value was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// `login` was called before `set_auth`.
    #[error("No credentials configured. Call set_auth() before login().")]
    MissingCredentials,

    /// The operation needs an authenticated session but none is present.
    #[error("No authenticated session. Log in or inject session data first.")]
    NotAuthenticated,

    /// A POST or PUT request was built without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// Product SKU failed validation.
    #[error("Invalid product SKU '{sku}'")]
    InvalidSku {
        /// The rejected SKU.
        sku: String,
    },

    /// Product price is negative.
    #[error("Invalid product price {price}")]
    InvalidPrice {
        /// The rejected price.
        price: i64,
    },

    /// A numeric identifier is out of range.
    #[error("Invalid {kind} ID {id}")]
    InvalidId {
        /// What the identifier refers to (e.g., "product").
        kind: &'static str,
        /// The rejected identifier.
        id: u64,
    },

    /// Quantity must be at least one.
    #[error("Invalid product quantity {quantity}")]
    InvalidQuantity {
        /// The rejected quantity.
        quantity: u32,
    },

    /// A required name or label is blank.
    #[error("Invalid {kind}: value cannot be blank")]
    BlankValue {
        /// What the value names (e.g., "product title").
        kind: &'static str,
    },

    /// A local file could not be read for upload.
    #[error("Cannot read file '{path}': {reason}")]
    UnreadableFile {
        /// The path that was requested.
        path: String,
        /// Why reading failed.
        reason: String,
    },

    /// A composite API token could not be parsed.
    #[error("Malformed API token. Expected 'sessid:session_name:token:uid'.")]
    MalformedApiToken,
}
