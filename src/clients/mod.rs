//! HTTP client types for Services communication.
//!
//! This module provides the HTTP layer of the crate: building requests,
//! sending them with the current session attached, and classifying
//! responses.
//!
//! # Overview
//!
//! - [`ServicesClient`]: The client applications use
//! - [`HttpClient`]: The async executor behind it
//! - [`HttpRequest`]: A request to be sent to the endpoint
//! - [`HttpResponse`]: A successful, decoded response
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`ServicesError`]: Error taxonomy for every operation
//!
//! # Example
//!
//! ```rust,ignore
//! use drupal_services::{HttpMethod, HttpRequest};
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "node.json")
//!     .query_param("page", "1")
//!     .build()?;
//!
//! let response = client.request(&request).await?;
//! println!("{}", response.body);
//! ```
//!
//! # Status Handling
//!
//! Only 200 and 201 are treated as success. Each request is sent once;
//! there is no automatic retry.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod services;

pub use errors::{classify_status, HttpResponseError, ServicesError, NO_STATUS, SKU_IN_USE_BODY};
pub use http_client::{HttpClient, CSRF_TOKEN_HEADER, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use services::ServicesClient;
