//! # Drupal Services Client
//!
//! An async Rust client for Drupal 7 sites exposing the Services module over
//! JSON, with support for the Drupal Commerce resources (products, carts,
//! line items, checkout and orders).
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ServicesConfig`] and [`ServicesConfigBuilder`]
//! - Validated newtypes for the base URL, usernames, currency and language
//! - Session login with CSRF token handling, plus session injection
//! - HTTP basic auth for endpoints protected by an API account
//! - A request executor with a single, explicit error taxonomy ([`ServicesError`])
//! - Query building for Services listings (fields, filters, sorting, paging)
//! - Resource operations for users, files, nodes, views and Commerce
//!
//! ## Quick Start
//!
//! ```rust
//! use drupal_services::{BaseUrl, CurrencyCode, ServicesClient, ServicesConfig};
//!
//! let config = ServicesConfig::builder()
//!     .base_url(BaseUrl::new("https://shop.example.com/api").unwrap())
//!     .currency(CurrencyCode::new("EUR").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = ServicesClient::new(config).unwrap();
//! assert_eq!(client.config().base_url().as_ref(), "https://shop.example.com/api");
//! ```
//!
//! ## Logging In
//!
//! ```rust,ignore
//! let mut client = ServicesClient::new(config)?;
//! client.set_auth("editor", "secret")?;
//!
//! let user = client.login().await?;
//! println!("{} has roles {:?}", user.username, user.roles);
//!
//! // Every following request carries the session cookie and CSRF token.
//! let me = client.retrieve_current_user().await?;
//! ```
//!
//! ## Reusing a Session
//!
//! The `apitoken` returned by login can be stored and injected later:
//!
//! ```rust,ignore
//! client.set_session_from_token("sessid:SESSabc:csrf-token:5")?;
//! ```
//!
//! ## Commerce
//!
//! ```rust,ignore
//! use drupal_services::{QuerySpec, SortOrder, ServicesError};
//! use drupal_services::resources::NodeFields;
//!
//! match client.create_product("product", "SHIRT-01", "Shirt", 1999, &NodeFields::new()).await {
//!     Ok(product) => println!("created {}", product["product_id"]),
//!     Err(ServicesError::Conflict(_)) => println!("SKU already in use"),
//!     Err(e) => return Err(e.into()),
//! }
//!
//! let shirts = client
//!     .index_products(&QuerySpec::new().filter("title", "shirt").sort("sku", SortOrder::Asc))
//!     .await?;
//!
//! client.add_to_cart_by_sku("SHIRT-01", 2).await?;
//! client.checkout_cart().await?;
//! ```
//!
//! ## Making Raw Requests
//!
//! Any Services resource can be reached through the generic executor:
//!
//! ```rust,ignore
//! use drupal_services::{HttpMethod, QueryParams};
//!
//! let mut query = QueryParams::new();
//! query.insert("parameters[type]", "article");
//! let articles = client
//!     .execute(HttpMethod::Get, "node.json", Some(query), None)
//!     .await?;
//! ```
//!
//! ## Debugging
//!
//! With [`ServicesClient::set_debug`] enabled, every request's method, URL and
//! payload is emitted as a `tracing` debug event (login passwords are
//! redacted). The crate does not install a subscriber.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and session live on the client
//! - **Fail-fast validation**: Newtypes and arguments are validated before sending
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **One round trip**: No automatic retries

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod query;
pub mod resources;

// Re-export public types at crate root for convenience
pub use auth::{validate_username, AuthMode, SessionState, UserSummary};
pub use config::{
    ApiCredentials, BaseUrl, Credentials, CurrencyCode, LanguageCode, Password, ServicesConfig,
    ServicesConfigBuilder, Username,
};
pub use error::{ConfigError, InputError};

// Re-export HTTP client types
pub use clients::{
    classify_status, HttpClient, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, ServicesClient, ServicesError, SKU_IN_USE_BODY,
};

// Re-export query types
pub use query::{Filter, QueryParams, QuerySpec, SortOrder};
