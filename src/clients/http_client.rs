//! HTTP client for Services communication.
//!
//! This module provides the [`HttpClient`] type, which sends exactly one
//! request per call, attaches the current session and basic auth
//! credentials, and classifies the response.

use std::collections::HashMap;

use crate::auth::SessionState;
use crate::clients::errors::{classify_status, ServicesError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{BaseUrl, ServicesConfig};
use crate::error::ConfigError;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying the Drupal CSRF token.
pub const CSRF_TOKEN_HEADER: &str = "X-CSRF-Token";

const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP client for a single Services endpoint.
///
/// The client handles:
/// - URL construction from the configured base URL
/// - Default headers (User-Agent, Accept, Content-Type)
/// - Session cookie, CSRF token and basic auth injection
/// - Status classification into [`ServicesError`]
///
/// There is no retry logic; every call is one round trip.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Services endpoint, without a trailing slash.
    base_url: BaseUrl,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client with a default rustls-backed transport.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the transport cannot be
    /// created (for example when TLS initialization fails).
    pub fn new(config: &ServicesConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .map_err(|e| ConfigError::HttpClientInit {
                reason: e.to_string(),
            })?;

        Ok(Self::with_client(config, client))
    }

    /// Creates a client around a caller-supplied transport.
    ///
    /// Use this to configure timeouts, proxies or connection pooling.
    #[must_use]
    pub fn with_client(config: &ServicesConfig, client: reqwest::Client) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Drupal Services Client v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), JSON_CONTENT_TYPE.to_string());
        default_headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());

        Self {
            client,
            base_url: config.base_url().clone(),
            default_headers,
        }
    }

    /// Returns the base URL for this client.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the full URL a request is sent to, including GET parameters.
    #[must_use]
    pub fn url_for(&self, request: &HttpRequest) -> String {
        let url = self.base_url.join(&request.path);
        match &request.query {
            Some(query) if request.http_method == HttpMethod::Get && !query.is_empty() => {
                format!("{url}?{}", query.to_query_string())
            }
            _ => url,
        }
    }

    /// Sends a request to the Services endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] if:
    /// - Request validation fails (`InvalidInput`)
    /// - No response is received (`Transport`)
    /// - The status is anything but 200 or 201 (HTTP variants)
    /// - The body is not valid JSON (`Protocol`)
    pub async fn request(
        &self,
        request: &HttpRequest,
        session: &SessionState,
        config: &ServicesConfig,
    ) -> Result<HttpResponse, ServicesError> {
        request.verify()?;

        let url = self.url_for(request);

        if config.debug() {
            let payload = match (&request.body, request.redact_body) {
                (Some(_), true) => "<redacted>".to_string(),
                (Some(body), false) => body.to_string(),
                (None, _) => String::new(),
            };
            tracing::debug!(
                method = %request.http_method,
                url = %url,
                payload = %payload,
                "Sending Services request"
            );
        }

        let mut headers = self.default_headers.clone();
        if let Some(token) = session.csrf_token() {
            headers.insert(CSRF_TOKEN_HEADER.to_string(), token.to_string());
        }
        if let Some(cookie) = session.cookie() {
            headers.insert("Cookie".to_string(), cookie);
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(credentials) = config.api_credentials().filter(|c| c.is_complete()) {
            req_builder = req_builder.basic_auth(credentials.username(), Some(credentials.password()));
        }

        if request.http_method.requires_body() {
            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }
        }

        let res = req_builder.send().await.map_err(|e| ServicesError::Transport {
            message: e.to_string(),
        })?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await.map_err(|e| ServicesError::Transport {
            message: e.to_string(),
        })?;

        if let Err(error) = classify_status(code, &body_text) {
            if config.debug() {
                tracing::debug!(status = code, body = %body_text, "Services request failed");
            }
            return Err(error);
        }

        HttpResponse::from_raw(code, res_headers, body_text)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
