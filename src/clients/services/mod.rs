//! High-level client for Drupal Services endpoints.
//!
//! [`ServicesClient`] combines configuration, session state and the HTTP
//! executor. Its generic entry points ([`ServicesClient::execute`],
//! [`ServicesClient::get`], ...) reach any Services resource; the typed
//! resource operations live in [`crate::resources`].

mod client;

pub use client::ServicesClient;
