//! Authentication types for Drupal Services.
//!
//! This module provides username validation, the session state attached to
//! authenticated requests, and the session login flow.
//!
//! # Overview
//!
//! - [`validate_username`]: Local check of Drupal username rules
//! - [`SessionState`]: Session cookie, CSRF token and user id
//! - [`AuthMode`]: How a client currently authenticates
//! - [`UserSummary`]: The user returned by a successful login
//!
//! # Authentication Modes
//!
//! - **Anonymous**: nothing attached.
//! - **Basic**: HTTP basic auth credentials are sent with every request
//!   (see [`ServicesClient::set_api_auth`](crate::ServicesClient::set_api_auth)).
//! - **Session**: after [`ServicesClient::login`](crate::ServicesClient::login)
//!   or session injection, every request carries `Cookie: name=id` and
//!   `X-CSRF-Token`.
//!
//! # Example
//!
//! ```rust,ignore
//! client.set_auth("editor", "secret")?;
//! let user = client.login().await?;
//! assert_eq!(client.auth_mode(), AuthMode::Session);
//!
//! // Later, in another process:
//! other_client.set_session_from_token(&user.apitoken)?;
//! ```

mod login;
mod session;
mod user;
mod username;

pub use login::LOGIN_ENDPOINT;
pub use session::{AuthMode, SessionState};
pub use user::UserSummary;
pub use username::validate_username;
