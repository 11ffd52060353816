//! User resource: listing, retrieval and password reset.

use serde_json::{json, Value};

use crate::auth::validate_username;
use crate::clients::{ServicesClient, ServicesError};
use crate::error::{ConfigError, InputError};
use crate::resources::require_id;

impl ServicesClient {
    /// Lists users (`GET user.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] if the request fails.
    pub async fn index_users(&self) -> Result<Value, ServicesError> {
        self.get("user.json", None).await
    }

    /// Retrieves a user (`GET user/{uid}.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a uid of 0, or the
    /// classified HTTP error.
    pub async fn retrieve_user(&self, uid: u64) -> Result<Value, ServicesError> {
        let uid = require_id("user", uid)?;
        self.get(&format!("user/{uid}.json"), None).await
    }

    /// Retrieves the user of the current session.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::NotAuthenticated`] when no session is present.
    pub async fn retrieve_current_user(&self) -> Result<Value, ServicesError> {
        let uid = self.session().uid().ok_or(InputError::NotAuthenticated)?;
        self.retrieve_user(uid).await
    }

    /// Asks Drupal to mail a password reset link to `username`.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] if `username` fails the
    /// username rules, or the classified HTTP error.
    pub async fn request_new_password(&self, username: &str) -> Result<Value, ServicesError> {
        if !validate_username(username) {
            return Err(ConfigError::InvalidUsername {
                username: username.to_string(),
            }
            .into());
        }

        self.post("user/request_new_password.json", json!({ "name": username }))
            .await
    }
}
