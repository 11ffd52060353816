//! User types returned by the login endpoint.
//!
//! Drupal 7 serializes most numbers as strings and user roles as an object
//! keyed by role id, while other Services setups emit plain integers and
//! arrays. The deserializers here accept both encodings.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Normalized summary of the user that logged in.
///
/// # Example
///
/// ```rust
/// use drupal_services::UserSummary;
///
/// let json = r#"{
///     "apitoken": "abc:SESS:tok:5",
///     "username": "bob",
///     "uid": 5,
///     "created": 100,
///     "access": 200,
///     "email": "b@x.com",
///     "roles": ["authenticated user"]
/// }"#;
///
/// let user: UserSummary = serde_json::from_str(json).unwrap();
/// assert_eq!(user.uid, 5);
/// assert_eq!(user.created_at().unwrap().timestamp(), 100);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Composite token `sessid:session_name:token:uid`, accepted by
    /// [`SessionState::from_api_token`](crate::SessionState::from_api_token).
    pub apitoken: String,
    /// The account name.
    pub username: String,
    /// The user id.
    pub uid: u64,
    /// Account creation time (Unix seconds).
    pub created: i64,
    /// Last access time (Unix seconds).
    pub access: i64,
    /// The account email address.
    pub email: String,
    /// Role names.
    pub roles: Vec<String>,
}

impl UserSummary {
    /// Returns the account creation time.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.created, 0)
    }

    /// Returns the last access time.
    #[must_use]
    pub fn access_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.access, 0)
    }
}

// Verify UserSummary is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<UserSummary>();
};

/// Envelope returned by `user/login.json`.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub session_name: String,
    pub sessid: String,
    pub token: String,
    pub user: RemoteUser,
}

/// The `user` object inside the login envelope.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct RemoteUser {
    #[serde(deserialize_with = "u64_from_number_or_string")]
    pub uid: u64,
    pub name: String,
    #[serde(deserialize_with = "i64_from_number_or_string")]
    pub created: i64,
    #[serde(deserialize_with = "i64_from_number_or_string")]
    pub access: i64,
    pub mail: String,
    #[serde(deserialize_with = "roles_from_list_or_map")]
    pub roles: Vec<String>,
}

impl LoginResponse {
    /// Builds the composite API token `sessid:session_name:token:uid`.
    pub fn api_token(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.sessid, self.session_name, self.token, self.user.uid
        )
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            apitoken: self.api_token(),
            username: self.user.name.clone(),
            uid: self.user.uid,
            created: self.user.created,
            access: self.user.access,
            email: self.user.mail.clone(),
            roles: self.user.roles.clone(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    String(String),
}

fn u64_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::<u64>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

fn i64_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::<i64>::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RoleList {
    List(Vec<String>),
    ById(Map<String, Value>),
}

fn roles_from_list_or_map<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match RoleList::deserialize(deserializer)? {
        RoleList::List(roles) => Ok(roles),
        RoleList::ById(roles) => roles
            .into_iter()
            .map(|(rid, role)| match role {
                Value::String(name) => Ok(name),
                other => Err(de::Error::custom(format!(
                    "role {rid} has a non-string name: {other}"
                ))),
            })
            .collect(),
    }
}
