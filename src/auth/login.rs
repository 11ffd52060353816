//! Session login against `user/login.json`.

use serde_json::json;

use crate::auth::session::SessionState;
use crate::auth::user::{LoginResponse, UserSummary};
use crate::clients::{HttpMethod, HttpRequest, ServicesClient, ServicesError};
use crate::error::InputError;

/// Endpoint that exchanges credentials for a session.
pub const LOGIN_ENDPOINT: &str = "user/login.json";

impl ServicesClient {
    /// Logs in with the credentials set by [`set_auth`](Self::set_auth).
    ///
    /// On success the session cookie, CSRF token and user id are stored on
    /// the client and attached to every following request. Logging in again
    /// replaces the session.
    ///
    /// # Errors
    ///
    /// - [`ServicesError::InvalidInput`] if no credentials are set (no request
    ///   is sent)
    /// - [`ServicesError::Authentication`] if the server rejects the login
    /// - [`ServicesError::Protocol`] if the response lacks the session fields
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// client.set_auth("editor", "secret")?;
    /// let user = client.login().await?;
    /// println!("logged in as {} ({})", user.username, user.uid);
    ///
    /// // Persist and restore later with set_session_from_token.
    /// let token = user.apitoken;
    /// ```
    pub async fn login(&mut self) -> Result<UserSummary, ServicesError> {
        let credentials = self
            .config()
            .credentials()
            .ok_or(InputError::MissingCredentials)?;

        let username: &str = credentials.username.as_ref();
        let password: &str = credentials.password.as_ref();
        let payload = json!({ "username": username, "password": password });

        let request = HttpRequest::builder(HttpMethod::Post, LOGIN_ENDPOINT)
            .body(payload)
            .redact_body()
            .build()?;

        let response = self.request(&request).await?;
        let login: LoginResponse = response.decode()?;

        if self.config().debug() {
            tracing::debug!(
                uid = login.user.uid,
                name = %login.user.name,
                user = %response.body,
                "Logged in to Services"
            );
        }

        let summary = login.summary();
        self.replace_session(SessionState::from_login(&login, response.into_body()));

        Ok(summary)
    }
}
