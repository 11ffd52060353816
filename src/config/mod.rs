//! Configuration types for the Services client.
//!
//! This module provides the configuration used to construct a
//! [`ServicesClient`](crate::ServicesClient).
//!
//! # Overview
//!
//! - [`ServicesConfig`]: All client settings
//! - [`ServicesConfigBuilder`]: A builder for constructing [`ServicesConfig`]
//! - [`BaseUrl`]: The validated Services endpoint URL
//! - [`Username`], [`Password`], [`Credentials`]: Login credentials
//! - [`ApiCredentials`]: HTTP basic auth credentials
//! - [`CurrencyCode`], [`LanguageCode`]: Commerce currency and content language
//!
//! # Example
//!
//! ```rust
//! use drupal_services::{BaseUrl, CurrencyCode, ServicesConfig};
//!
//! let config = ServicesConfig::builder()
//!     .base_url(BaseUrl::new("https://shop.example.com/api").unwrap())
//!     .currency(CurrencyCode::new("USD").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.currency().as_ref(), "USD");
//! assert_eq!(config.language().as_ref(), "und");
//! ```

mod newtypes;

pub use newtypes::{
    ApiCredentials, BaseUrl, Credentials, CurrencyCode, LanguageCode, Password, Username,
    DEFAULT_CURRENCY, LANGUAGE_NONE,
};

use crate::error::ConfigError;

/// Configuration for a Services client.
///
/// The base URL is fixed for the lifetime of a client. Language, currency,
/// debug mode and credentials can be changed later through the client's
/// setters.
#[derive(Clone, Debug)]
pub struct ServicesConfig {
    base_url: BaseUrl,
    language: LanguageCode,
    currency: CurrencyCode,
    debug: bool,
    credentials: Option<Credentials>,
    api_credentials: Option<ApiCredentials>,
    user_agent_prefix: Option<String>,
}

impl ServicesConfig {
    /// Creates a new builder for constructing a `ServicesConfig`.
    #[must_use]
    pub fn builder() -> ServicesConfigBuilder {
        ServicesConfigBuilder::new()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the content language.
    #[must_use]
    pub const fn language(&self) -> &LanguageCode {
        &self.language
    }

    /// Returns the product currency.
    #[must_use]
    pub const fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Returns whether request tracing is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns the login credentials, if configured.
    #[must_use]
    pub const fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns the basic auth credentials, if configured.
    #[must_use]
    pub const fn api_credentials(&self) -> Option<&ApiCredentials> {
        self.api_credentials.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    pub(crate) fn set_language(&mut self, language: LanguageCode) {
        self.language = language;
    }

    pub(crate) fn set_currency(&mut self, currency: CurrencyCode) {
        self.currency = currency;
    }

    pub(crate) fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub(crate) fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    pub(crate) fn set_api_credentials(&mut self, credentials: ApiCredentials) {
        self.api_credentials = Some(credentials);
    }
}

// Verify ServicesConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ServicesConfig>();
};

/// Builder for constructing [`ServicesConfig`] instances.
///
/// `base_url` is required. Defaults:
///
/// - `language`: `und`
/// - `currency`: `EUR`
/// - `debug`: `false`
/// - `credentials`, `api_credentials`, `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ServicesConfigBuilder {
    base_url: Option<BaseUrl>,
    language: Option<LanguageCode>,
    currency: Option<CurrencyCode>,
    debug: Option<bool>,
    credentials: Option<Credentials>,
    api_credentials: Option<ApiCredentials>,
    user_agent_prefix: Option<String>,
}

impl ServicesConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Services endpoint base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the content language used for node fields.
    #[must_use]
    pub fn language(mut self, language: LanguageCode) -> Self {
        self.language = Some(language);
        self
    }

    /// Sets the currency used for product prices.
    #[must_use]
    pub fn currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = Some(currency);
        self
    }

    /// Enables or disables request tracing.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Sets the login credentials.
    #[must_use]
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets HTTP basic auth credentials.
    #[must_use]
    pub fn api_credentials(mut self, credentials: ApiCredentials) -> Self {
        self.api_credentials = Some(credentials);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ServicesConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<ServicesConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(ServicesConfig {
            base_url,
            language: self.language.unwrap_or_default(),
            currency: self.currency.unwrap_or_default(),
            debug: self.debug.unwrap_or(false),
            credentials: self.credentials,
            api_credentials: self.api_credentials,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
