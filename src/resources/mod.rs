//! Resource operations for Drupal core and Drupal Commerce.
//!
//! Every operation is a method on [`ServicesClient`](crate::ServicesClient)
//! that validates its arguments locally, builds the endpoint path and payload,
//! and hands the request to the executor. Invalid arguments fail with
//! [`ServicesError::InvalidInput`](crate::ServicesError::InvalidInput) before
//! anything is sent.
//!
//! # Resources
//!
//! | Module | Endpoints |
//! |--------|-----------|
//! | [`user`] | `user.json`, `user/{uid}.json`, `user/request_new_password.json` |
//! | [`file`] | `file.json`, `file/{fid}.json` |
//! | [`node`] | `node.json`, `node/{nid}.json` |
//! | [`product`] | `product.json`, `product/{pid}.json` |
//! | [`cart`] | `cart.json`, `line-item.json`, `line-item/{id}.json`, `checkout.json` |
//! | [`order`] | `order.json`, `order/{oid}.json` |
//! | [`view`] | `views/{name}.json`, `{name}.json` |
//!
//! # Example
//!
//! ```rust,ignore
//! use drupal_services::{QuerySpec, SortOrder};
//!
//! let products = client
//!     .index_products(&QuerySpec::new().filter("title", "shirt").sort("sku", SortOrder::Asc))
//!     .await?;
//!
//! client.add_to_cart_by_sku("SHIRT-RED-M", 2).await?;
//! client.checkout_cart().await?;
//! ```

pub mod cart;
pub mod file;
pub mod node;
pub mod order;
pub mod product;
pub mod user;
pub mod view;

pub use node::{prepare_node_fields, NodeFields};
pub use product::{prepare_product_fields, product_from_response, validate_product_sku};
pub use view::DEFAULT_VIEW_DISPLAY;

use crate::error::InputError;

/// Rejects identifiers below 1.
pub(crate) fn require_id(kind: &'static str, id: u64) -> Result<u64, InputError> {
    if id < 1 {
        return Err(InputError::InvalidId { kind, id });
    }
    Ok(id)
}

/// Rejects quantities below 1.
pub(crate) fn require_quantity(quantity: u32) -> Result<u32, InputError> {
    if quantity < 1 {
        return Err(InputError::InvalidQuantity { quantity });
    }
    Ok(quantity)
}

/// Rejects empty or whitespace-only values and returns the trimmed value.
pub(crate) fn require_non_blank<'a>(
    kind: &'static str,
    value: &'a str,
) -> Result<&'a str, InputError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(InputError::BlankValue { kind });
    }
    Ok(trimmed)
}
