//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::auth::validate_username;
use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Language tag Drupal uses for content without a language.
pub const LANGUAGE_NONE: &str = "und";

/// Default commerce currency.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// A validated base URL for the Services endpoint.
///
/// The URL must carry a scheme and host. A trailing `/` is stripped so that
/// endpoint paths can be joined with a single separator.
///
/// # Example
///
/// ```rust
/// use drupal_services::BaseUrl;
///
/// let url = BaseUrl::new("https://shop.example.com/api/").unwrap();
/// assert_eq!(url.as_ref(), "https://shop.example.com/api");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), "shop.example.com");
/// assert_eq!(url.join("node/1.json"), "https://shop.example.com/api/node/1.json");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidBaseUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        let host_start = scheme_end + 3;
        if host_start >= url.len() {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        // Query strings and fragments cannot be joined with endpoint paths.
        if url[host_end..].contains(['?', '#']) {
            return Err(ConfigError::InvalidBaseUrl { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }

    /// Joins an endpoint path onto the base URL with a single `/`.
    #[must_use]
    pub fn join(&self, endpoint: &str) -> String {
        format!("{}/{}", self.url, endpoint.trim_start_matches('/'))
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A username that passes the Drupal username rules.
///
/// See [`validate_username`](crate::auth::validate_username) for the rules.
///
/// # Example
///
/// ```rust
/// use drupal_services::Username;
///
/// assert!(Username::new("jane.doe").is_ok());
/// assert!(Username::new("jane  doe").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Creates a new validated username.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUsername`] if the name fails validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if !validate_username(&name) {
            return Err(ConfigError::InvalidUsername { username: name });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Username {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// An opaque password.
///
/// The `Debug` implementation masks the value, displaying only
/// `Password(*****)`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wraps a password. Any string is accepted.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}

/// Username and password used by `login`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// The validated username.
    pub username: Username,
    /// The password.
    pub password: Password,
}

impl Credentials {
    /// Validates `username` and pairs it with `password`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUsername`] if the username fails validation.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password),
        })
    }
}

/// HTTP basic auth credentials sent with every request.
///
/// These are attached only when both parts are non-empty. The password is
/// masked in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    username: String,
    password: Password,
}

impl ApiCredentials {
    /// Creates basic auth credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Password::new(password),
        }
    }

    /// Returns the basic auth username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the basic auth password.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_ref()
    }

    /// Returns `true` if both username and password are non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.as_ref().is_empty()
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("username", &self.username)
            .field("password", &self.password)
            .finish()
    }
}

/// A three letter currency code, stored uppercase.
///
/// # Example
///
/// ```rust
/// use drupal_services::CurrencyCode;
///
/// let code = CurrencyCode::new("usd").unwrap();
/// assert_eq!(code.as_ref(), "USD");
/// assert_eq!(CurrencyCode::default().as_ref(), "EUR");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a validated currency code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCurrency`] unless the code is exactly
    /// three ASCII letters.
    pub fn new(code: impl Into<String>) -> Result<Self, ConfigError> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::InvalidCurrency { code });
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self(DEFAULT_CURRENCY.to_string())
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A content language tag such as `en`, `pt-br` or `und`.
///
/// # Example
///
/// ```rust
/// use drupal_services::LanguageCode;
///
/// assert_eq!(LanguageCode::default().as_ref(), "und");
/// assert!(LanguageCode::default().is_none());
/// assert_eq!(LanguageCode::new("en").unwrap().as_ref(), "en");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Creates a validated language tag.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLanguage`] if the tag is empty or
    /// contains characters other than ASCII letters, digits, `-` and `_`.
    pub fn new(code: impl Into<String>) -> Result<Self, ConfigError> {
        let code = code.into();
        if code.is_empty()
            || !code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::InvalidLanguage { code });
        }
        Ok(Self(code))
    }

    /// Returns `true` for the "no language" sentinel.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.0 == LANGUAGE_NONE
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(LANGUAGE_NONE.to_string())
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let url = BaseUrl::new("https://shop.example.com/services/").unwrap();
        assert_eq!(url.as_ref(), "https://shop.example.com/services");
    }

    #[test]
    fn test_base_url_with_port_and_path() {
        let url = BaseUrl::new("http://localhost:8080/api").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), "localhost");
        assert_eq!(url.join("/user/login.json"), "http://localhost:8080/api/user/login.json");
    }

    #[test]
    fn test_base_url_rejects_invalid() {
        assert!(BaseUrl::new("shop.example.com").is_err());
        assert!(BaseUrl::new("https://").is_err());
        assert!(BaseUrl::new("://example.com").is_err());
        assert!(BaseUrl::new("https://example.com/api?x=1").is_err());
        assert!(BaseUrl::new("").is_err());
    }

    #[test]
    fn test_username_rejects_invalid() {
        assert!(matches!(
            Username::new("bad name "),
            Err(ConfigError::InvalidUsername { username }) if username == "bad name "
        ));
    }

    #[test]
    fn test_username_deserialize_validates() {
        let ok: Result<Username, _> = serde_json::from_str(r#""bob""#);
        assert!(ok.is_ok());
        let bad: Result<Username, _> = serde_json::from_str(r#""bo  b""#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_password_masks_value_in_debug() {
        let password = Password::new("hunter2");
        let debug_output = format!("{password:?}");
        assert_eq!(debug_output, "Password(*****)");
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_api_credentials_masks_password() {
        let creds = ApiCredentials::new("api", "s3cret");
        let debug_output = format!("{creds:?}");
        assert!(debug_output.contains("api"));
        assert!(!debug_output.contains("s3cret"));
    }

    #[test]
    fn test_api_credentials_completeness() {
        assert!(ApiCredentials::new("u", "p").is_complete());
        assert!(!ApiCredentials::new("", "p").is_complete());
        assert!(!ApiCredentials::new("u", "").is_complete());
    }

    #[test]
    fn test_currency_code_normalizes_case() {
        assert_eq!(CurrencyCode::new("gbp").unwrap().as_ref(), "GBP");
        assert!(CurrencyCode::new("EURO").is_err());
        assert!(CurrencyCode::new("E1R").is_err());
    }

    #[test]
    fn test_language_code_validation() {
        assert!(LanguageCode::new("pt-br").is_ok());
        assert!(LanguageCode::new("").is_err());
        assert!(LanguageCode::new("e n").is_err());
        assert!(!LanguageCode::new("en").unwrap().is_none());
    }
}
