//! Session state for authenticated Services calls.
//!
//! This module provides [`SessionState`], which holds the session cookie,
//! CSRF token and user id attached to every request, and [`AuthMode`], which
//! describes how a client currently authenticates.

use serde_json::Value;

use crate::auth::user::LoginResponse;
use crate::error::InputError;

/// How requests are authenticated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    /// No credentials are attached.
    Anonymous,
    /// HTTP basic auth credentials are attached.
    Basic,
    /// A session cookie and CSRF token are attached.
    Session,
}

/// Authentication state produced by a login or injected directly.
///
/// The remote service is the source of truth for session validity; this
/// type does no expiry tracking.
///
/// # Example
///
/// ```rust
/// use drupal_services::SessionState;
///
/// let session = SessionState::from_session_data("abc", "SESS", "tok", 5);
/// assert_eq!(session.cookie().as_deref(), Some("SESS=abc"));
/// assert_eq!(session.csrf_token(), Some("tok"));
/// assert_eq!(session.uid(), Some(5));
/// assert_eq!(session.api_token().as_deref(), Some("abc:SESS:tok:5"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    session_id: Option<String>,
    session_name: Option<String>,
    csrf_token: Option<String>,
    uid: Option<u64>,
    user: Option<Value>,
}

impl SessionState {
    /// Creates an unauthenticated session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session from an already-established Drupal session.
    #[must_use]
    pub fn from_session_data(
        session_id: impl Into<String>,
        session_name: impl Into<String>,
        csrf_token: impl Into<String>,
        uid: u64,
    ) -> Self {
        Self {
            session_id: Some(session_id.into()),
            session_name: Some(session_name.into()),
            csrf_token: Some(csrf_token.into()),
            uid: Some(uid),
            user: None,
        }
    }

    /// Parses a composite API token (`sessid:session_name:token:uid`).
    ///
    /// # Errors
    ///
    /// Returns [`InputError::MalformedApiToken`] unless the token has exactly
    /// four non-empty parts and a numeric uid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use drupal_services::SessionState;
    ///
    /// let session = SessionState::from_api_token("abc:SESS:tok:5").unwrap();
    /// assert_eq!(session.cookie().as_deref(), Some("SESS=abc"));
    /// assert!(SessionState::from_api_token("abc:SESS").is_err());
    /// ```
    pub fn from_api_token(token: &str) -> Result<Self, InputError> {
        let parts: Vec<&str> = token.split(':').collect();
        let [session_id, session_name, csrf_token, uid] = parts.as_slice() else {
            return Err(InputError::MalformedApiToken);
        };
        if session_id.is_empty() || session_name.is_empty() || csrf_token.is_empty() {
            return Err(InputError::MalformedApiToken);
        }
        let uid = uid.parse().map_err(|_| InputError::MalformedApiToken)?;

        Ok(Self::from_session_data(
            *session_id,
            *session_name,
            *csrf_token,
            uid,
        ))
    }

    /// Builds the state from a decoded login envelope and its raw payload.
    pub(crate) fn from_login(response: &LoginResponse, raw: Value) -> Self {
        Self {
            session_id: Some(response.sessid.clone()),
            session_name: Some(response.session_name.clone()),
            csrf_token: Some(response.token.clone()),
            uid: Some(response.user.uid),
            user: Some(raw),
        }
    }

    /// Returns the cookie header value (`session_name=session_id`).
    #[must_use]
    pub fn cookie(&self) -> Option<String> {
        match (&self.session_name, &self.session_id) {
            (Some(name), Some(id)) => Some(format!("{name}={id}")),
            _ => None,
        }
    }

    /// Returns the CSRF token.
    #[must_use]
    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// Returns the authenticated user id.
    #[must_use]
    pub const fn uid(&self) -> Option<u64> {
        self.uid
    }

    /// Returns the raw login payload, present only after a real login.
    #[must_use]
    pub const fn user(&self) -> Option<&Value> {
        self.user.as_ref()
    }

    /// Returns the composite API token for this session.
    #[must_use]
    pub fn api_token(&self) -> Option<String> {
        match (
            &self.session_id,
            &self.session_name,
            &self.csrf_token,
            self.uid,
        ) {
            (Some(id), Some(name), Some(token), Some(uid)) => {
                Some(format!("{id}:{name}:{token}:{uid}"))
            }
            _ => None,
        }
    }

    /// Returns `true` if a session cookie is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session_id.is_some() && self.session_name.is_some()
    }
}

// Verify SessionState is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SessionState>();
};
