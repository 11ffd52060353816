//! Services client implementation.
//!
//! This module provides the [`ServicesClient`] type, which owns the
//! configuration, the session state and the HTTP transport for one Drupal
//! Services endpoint.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{AuthMode, SessionState};
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse, ServicesError};
use crate::config::{ApiCredentials, Credentials, CurrencyCode, LanguageCode, ServicesConfig};
use crate::error::ConfigError;
use crate::query::QueryParams;

/// Client for a Drupal 7 Services endpoint.
///
/// One client holds one logical session. Requests borrow the client
/// immutably and may run concurrently; logging in, injecting a session and
/// changing settings need `&mut self`.
///
/// Resource operations (nodes, products, carts, ...) are implemented as
/// methods on this type in the [`resources`](crate::resources) module.
///
/// # Thread Safety
///
/// `ServicesClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use drupal_services::{BaseUrl, ServicesClient, ServicesConfig};
///
/// let config = ServicesConfig::builder()
///     .base_url(BaseUrl::new("https://shop.example.com/api")?)
///     .build()?;
///
/// let mut client = ServicesClient::new(config)?;
/// client.set_auth("editor", "secret")?;
/// let user = client.login().await?;
///
/// let node = client.retrieve_node(1).await?;
/// ```
#[derive(Debug)]
pub struct ServicesClient {
    http_client: HttpClient,
    config: ServicesConfig,
    session: SessionState,
}

// Verify ServicesClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ServicesClient>();
};

impl ServicesClient {
    /// Creates a new client for the configured endpoint.
    ///
    /// If the configuration carries login credentials they are used by
    /// [`login`](Self::login); no request is made here.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the HTTP transport cannot
    /// be created.
    pub fn new(config: ServicesConfig) -> Result<Self, ConfigError> {
        let http_client = HttpClient::new(&config)?;

        Ok(Self {
            http_client,
            config,
            session: SessionState::new(),
        })
    }

    /// Creates a new client using a caller-supplied `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(config: ServicesConfig, client: reqwest::Client) -> Self {
        let http_client = HttpClient::with_client(&config, client);

        Self {
            http_client,
            config,
            session: SessionState::new(),
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ServicesConfig {
        &self.config
    }

    /// Returns the current session state.
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Returns how requests are currently authenticated.
    #[must_use]
    pub fn auth_mode(&self) -> AuthMode {
        if self.session.is_authenticated() {
            AuthMode::Session
        } else if self.config.api_credentials().is_some() {
            AuthMode::Basic
        } else {
            AuthMode::Anonymous
        }
    }

    /// Returns the raw user payload from the last successful login.
    #[must_use]
    pub const fn user_data(&self) -> Option<&Value> {
        self.session.user()
    }

    /// Sets the content language used for node fields.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] if `language` is not a valid tag.
    pub fn set_language(&mut self, language: &str) -> Result<(), ServicesError> {
        self.config.set_language(LanguageCode::new(language)?);
        Ok(())
    }

    /// Sets the currency used for product prices.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] if `currency` is not three letters.
    pub fn set_currency(&mut self, currency: &str) -> Result<(), ServicesError> {
        self.config.set_currency(CurrencyCode::new(currency)?);
        Ok(())
    }

    /// Enables or disables request tracing.
    pub fn set_debug(&mut self, debug: bool) {
        self.config.set_debug(debug);
    }

    /// Stores the credentials used by [`login`](Self::login).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] if the username fails
    /// validation. The previous credentials are kept in that case.
    pub fn set_auth(&mut self, username: &str, password: &str) -> Result<(), ServicesError> {
        self.config
            .set_credentials(Credentials::new(username, password)?);
        Ok(())
    }

    /// Sets HTTP basic auth credentials sent with every request.
    pub fn set_api_auth(&mut self, username: &str, password: &str) {
        self.config
            .set_api_credentials(ApiCredentials::new(username, password));
    }

    /// Injects an already-established session.
    ///
    /// Replaces any session from an earlier login.
    pub fn set_session_data(
        &mut self,
        session_id: &str,
        session_name: &str,
        csrf_token: &str,
        uid: u64,
    ) {
        self.session = SessionState::from_session_data(session_id, session_name, csrf_token, uid);
    }

    /// Injects a session from the composite API token returned by login.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] if the token is malformed.
    /// The current session is kept in that case.
    pub fn set_session_from_token(&mut self, api_token: &str) -> Result<(), ServicesError> {
        self.session = SessionState::from_api_token(api_token)?;
        Ok(())
    }

    pub(crate) fn replace_session(&mut self, session: SessionState) {
        self.session = session;
    }

    /// Sends a prepared request with the current session attached.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] for validation, transport, HTTP and decoding
    /// failures.
    pub async fn request(&self, request: &HttpRequest) -> Result<HttpResponse, ServicesError> {
        self.http_client
            .request(request, &self.session, &self.config)
            .await
    }

    /// Sends one request and returns the decoded body.
    ///
    /// Query parameters are only sent with GET. POST and PUT require a body.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] for validation, transport, HTTP and decoding
    /// failures.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use drupal_services::HttpMethod;
    ///
    /// let nodes = client.execute(HttpMethod::Get, "node.json", None, None).await?;
    /// ```
    pub async fn execute(
        &self,
        method: HttpMethod,
        endpoint: &str,
        query: Option<QueryParams>,
        body: Option<Value>,
    ) -> Result<Value, ServicesError> {
        let mut builder = HttpRequest::builder(method, endpoint).maybe_body(body);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        let request = builder.build()?;

        Ok(self.request(&request).await?.into_body())
    }

    /// Like [`execute`](Self::execute), decoding the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::Protocol`] if the body does not match `T`,
    /// in addition to the errors of [`execute`](Self::execute).
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        query: Option<QueryParams>,
        body: Option<Value>,
    ) -> Result<T, ServicesError> {
        let mut builder = HttpRequest::builder(method, endpoint).maybe_body(body);
        if let Some(query) = query {
            builder = builder.query(query);
        }
        let request = builder.build()?;

        self.request(&request).await?.decode()
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn get(
        &self,
        endpoint: &str,
        query: Option<QueryParams>,
    ) -> Result<Value, ServicesError> {
        self.execute(HttpMethod::Get, endpoint, query, None).await
    }

    /// Sends a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value, ServicesError> {
        self.execute(HttpMethod::Post, endpoint, None, Some(body))
            .await
    }

    /// Sends a PUT request with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn put(&self, endpoint: &str, body: Value) -> Result<Value, ServicesError> {
        self.execute(HttpMethod::Put, endpoint, None, Some(body))
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub async fn delete(&self, endpoint: &str) -> Result<Value, ServicesError> {
        self.execute(HttpMethod::Delete, endpoint, None, None).await
    }
}
