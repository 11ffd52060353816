//! Commerce cart, line item and checkout operations.
//!
//! Services addresses line items by id, while callers usually know SKUs.
//! [`ServicesClient::remove_from_cart_by_sku`] bridges the two by reading the
//! current cart and locating the line item whose label is the SKU.

use serde_json::{json, Value};

use crate::clients::{HttpMethod, HttpRequest, ServicesClient, ServicesError};
use crate::resources::product::require_sku;
use crate::resources::{require_id, require_quantity};

/// Cart status Commerce reports for an open cart.
pub const CART_STATUS: &str = "cart";

/// Line item type for product line items.
pub const PRODUCT_LINE_ITEM: &str = "product";

/// Returns the last entry of an id-keyed object, or the last element of an array.
fn last_entry(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) => map.values().next_back(),
        Value::Array(items) => items.last(),
        _ => None,
    }
}

/// Finds the id of the product line item labelled `sku` in `cart`.
fn find_line_item(cart: &Value, sku: &str) -> Option<u64> {
    let items = cart.get("commerce_line_items_entities")?.as_object()?;
    items.iter().find_map(|(id, item)| {
        let is_product = item.get("type").and_then(Value::as_str) == Some(PRODUCT_LINE_ITEM);
        let label = item.get("line_item_label").and_then(Value::as_str);
        if is_product && label == Some(sku) {
            id.parse().ok()
        } else {
            None
        }
    })
}

impl ServicesClient {
    /// Retrieves the current user's cart (`GET cart.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] if the request fails.
    pub async fn index_cart(&self) -> Result<Value, ServicesError> {
        self.get("cart.json", None).await
    }

    /// Creates a cart for the current user (`POST cart.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] if the request fails.
    pub async fn create_cart(&self) -> Result<Value, ServicesError> {
        self.post("cart.json", json!([])).await
    }

    /// Adds `quantity` of the product with `sku` to the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for an invalid SKU or a
    /// quantity of 0, or the classified HTTP error.
    pub async fn add_to_cart_by_sku(&self, sku: &str, quantity: u32) -> Result<Value, ServicesError> {
        let sku = require_sku(sku)?;
        let quantity = require_quantity(quantity)?;

        self.post(
            "line-item.json",
            json!({
                "type": PRODUCT_LINE_ITEM,
                "line_item_label": sku,
                "quantity": quantity,
            }),
        )
        .await
    }

    /// Adds `quantity` of the product with `sku` to an existing order.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for an order id of 0, an
    /// invalid SKU or a quantity of 0, or the classified HTTP error.
    pub async fn add_to_order_by_sku(
        &self,
        order_id: u64,
        sku: &str,
        quantity: u32,
    ) -> Result<Value, ServicesError> {
        let order_id = require_id("order", order_id)?;
        let sku = require_sku(sku)?;
        let quantity = require_quantity(quantity)?;

        self.post(
            "line-item.json",
            json!({
                "order_id": order_id,
                "type": PRODUCT_LINE_ITEM,
                "line_item_label": sku,
                "quantity": quantity,
            }),
        )
        .await
    }

    /// Adds `quantity` of a product, by product id, to an existing order.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for an id of 0 or a quantity
    /// of 0, or the classified HTTP error.
    pub async fn add_to_order_by_product_id(
        &self,
        order_id: u64,
        product_id: u64,
        quantity: u32,
    ) -> Result<Value, ServicesError> {
        let order_id = require_id("order", order_id)?;
        let product_id = require_id("product", product_id)?;
        let quantity = require_quantity(quantity)?;

        self.post(
            "line-item.json",
            json!({
                "order_id": order_id,
                "type": PRODUCT_LINE_ITEM,
                "commerce_product": product_id,
                "quantity": quantity,
            }),
        )
        .await
    }

    /// Removes the product line item labelled `sku` from the current cart.
    ///
    /// Returns `Ok(None)` when the cart has no such line item.
    ///
    /// # Errors
    ///
    /// - [`ServicesError::InvalidInput`] for an invalid SKU
    /// - [`ServicesError::Protocol`] if there is no cart or the cart is not
    ///   in `cart` status
    /// - the classified HTTP error of either request
    pub async fn remove_from_cart_by_sku(&self, sku: &str) -> Result<Option<Value>, ServicesError> {
        let sku = require_sku(sku)?;

        let request = HttpRequest::builder(HttpMethod::Get, "cart.json").build()?;
        let response = self.request(&request).await?;
        let Some(cart) = last_entry(&response.body).filter(|cart| cart.is_object()) else {
            return Err(ServicesError::protocol(
                response.code,
                "failed to query user cart",
                response.raw_body,
            ));
        };

        let status = cart.get("status").and_then(Value::as_str);
        if status != Some(CART_STATUS) {
            tracing::warn!(status = ?status, "Current order is not an open cart");
            return Err(ServicesError::protocol(
                response.code,
                "failed to query user cart",
                response.raw_body.clone(),
            ));
        }

        let Some(line_item_id) = find_line_item(cart, sku) else {
            return Ok(None);
        };

        self.delete(&format!("line-item/{line_item_id}.json"))
            .await
            .map(Some)
    }

    /// Checks out the current cart (`POST checkout.json`).
    ///
    /// Needs the checkout resource of a customized `commerce_services`.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] if the request fails.
    pub async fn checkout_cart(&self) -> Result<Value, ServicesError> {
        self.post("checkout.json", json!([])).await
    }
}
