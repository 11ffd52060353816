//! Commerce product resource.
//!
//! Products are addressed either by numeric product id or by SKU. SKUs are
//! checked locally with [`validate_product_sku`] before any request.

use serde_json::{json, Map, Value};

use crate::clients::{ServicesClient, ServicesError};
use crate::error::InputError;
use crate::query::{QueryParams, QuerySpec};
use crate::resources::node::NodeFields;
use crate::resources::{require_id, require_non_blank};

/// Minimum length of a trimmed SKU, in bytes.
pub const MIN_SKU_LENGTH: usize = 3;

/// Returns `true` if `sku` is usable as a product SKU.
///
/// The trimmed SKU must be non-empty, at least [`MIN_SKU_LENGTH`] bytes
/// long and must not contain a comma (commas separate values in
/// Services filters).
///
/// # Example
///
/// ```rust
/// use drupal_services::resources::validate_product_sku;
///
/// assert!(validate_product_sku("TSHIRT-01"));
/// assert!(!validate_product_sku("ab"));
/// assert!(!validate_product_sku("a,bc"));
/// assert!(!validate_product_sku("   "));
/// ```
#[must_use]
pub fn validate_product_sku(sku: &str) -> bool {
    let sku = sku.trim();
    !sku.is_empty() && !sku.contains(',') && sku.len() >= MIN_SKU_LENGTH
}

pub(crate) fn require_sku(sku: &str) -> Result<&str, InputError> {
    if validate_product_sku(sku) {
        Ok(sku.trim())
    } else {
        Err(InputError::InvalidSku {
            sku: sku.to_string(),
        })
    }
}

/// Builds a product payload.
///
/// Extra `fields` are merged in last and may override the base keys.
#[must_use]
pub fn prepare_product_fields(
    product_type: &str,
    sku: &str,
    title: &str,
    price: i64,
    currency: &str,
    fields: &NodeFields,
) -> Value {
    let mut data = Map::new();
    data.insert("title".to_string(), json!(title));
    data.insert("sku".to_string(), json!(sku));
    data.insert("type".to_string(), json!(product_type));
    data.insert("commerce_price_amount".to_string(), json!(price));
    data.insert("commerce_price_currency_code".to_string(), json!(currency));
    for (field, content) in fields {
        data.insert(field.clone(), content.clone());
    }
    Value::Object(data)
}

/// Unwraps a product from the id-keyed envelope Services returns.
///
/// Product listings answer with `{"<product_id>": {...product...}}`. This
/// returns the last product object, or `None` when the response is not an
/// object or holds no product object.
///
/// # Example
///
/// ```rust
/// use drupal_services::resources::product_from_response;
/// use serde_json::json;
///
/// let response = json!({"12": {"product_id": "12", "sku": "ABC"}});
/// assert_eq!(product_from_response(&response).unwrap()["sku"], "ABC");
/// assert!(product_from_response(&json!([])).is_none());
/// ```
#[must_use]
pub fn product_from_response(response: &Value) -> Option<&Value> {
    response
        .as_object()?
        .values()
        .next_back()
        .filter(|product| product.is_object())
}

/// Reads `product_id`, which Drupal may encode as a string or a number.
fn product_id_of(product: &Value) -> Option<u64> {
    match product.get("product_id")? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl ServicesClient {
    /// Lists products (`GET product.json?limit=..&offset=..`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] if the request fails.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use drupal_services::QuerySpec;
    ///
    /// let page = client
    ///     .index_products(&QuerySpec::new().fields(["sku", "title"]).page(2))
    ///     .await?;
    /// ```
    pub async fn index_products(&self, query: &QuerySpec) -> Result<Value, ServicesError> {
        self.get("product.json", Some(query.limit_offset_params()))
            .await
    }

    /// Creates a product (`POST product.json`).
    ///
    /// `price` is in minor currency units and uses the configured currency.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a blank type or title, an
    /// invalid SKU or a negative price. A duplicate SKU is reported as
    /// [`ServicesError::Conflict`].
    pub async fn create_product(
        &self,
        product_type: &str,
        sku: &str,
        title: &str,
        price: i64,
        fields: &NodeFields,
    ) -> Result<Value, ServicesError> {
        let product_type = require_non_blank("product type", product_type)?;
        let sku = require_sku(sku)?;
        let title = require_non_blank("product title", title)?;
        if price < 0 {
            return Err(InputError::InvalidPrice { price }.into());
        }

        let payload = prepare_product_fields(
            product_type,
            sku,
            title,
            price,
            self.config().currency().as_ref(),
            fields,
        );
        self.post("product.json", payload).await
    }

    /// Retrieves a product (`GET product/{pid}.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a pid of 0, or the
    /// classified HTTP error.
    pub async fn get_product(&self, pid: u64) -> Result<Value, ServicesError> {
        let pid = require_id("product", pid)?;
        self.get(&format!("product/{pid}.json"), None).await
    }

    /// Looks a product up by SKU (`GET product.json?filter[sku]=..`).
    ///
    /// The response is the id-keyed envelope; see [`product_from_response`].
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for an invalid SKU, or the
    /// classified HTTP error.
    pub async fn get_product_by_sku(&self, sku: &str) -> Result<Value, ServicesError> {
        let sku = require_sku(sku)?;
        let mut query = QueryParams::new();
        query.insert("filter[sku]", sku);

        self.get("product.json", Some(query)).await
    }

    /// Updates a product (`PUT product/{pid}.json`).
    ///
    /// With no fields nothing is sent and `Value::Bool(true)` is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a pid of 0, or the
    /// classified HTTP error.
    pub async fn update_product(
        &self,
        pid: u64,
        fields: &NodeFields,
    ) -> Result<Value, ServicesError> {
        let pid = require_id("product", pid)?;
        if fields.is_empty() {
            return Ok(Value::Bool(true));
        }

        self.put(&format!("product/{pid}.json"), Value::Object(fields.clone()))
            .await
    }

    /// Updates the product with the given SKU.
    ///
    /// Returns `Ok(None)` if no product has that SKU.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::Protocol`] if the matching product has no
    /// usable `product_id`, in addition to the errors of
    /// [`get_product_by_sku`](Self::get_product_by_sku) and
    /// [`update_product`](Self::update_product).
    pub async fn update_product_by_sku(
        &self,
        sku: &str,
        fields: &NodeFields,
    ) -> Result<Option<Value>, ServicesError> {
        let response = self.get_product_by_sku(sku).await?;
        let Some(product) = product_from_response(&response) else {
            return Ok(None);
        };
        let pid = product_id_of(product).ok_or_else(|| {
            ServicesError::protocol(200, "product has no product_id", response.to_string())
        })?;

        self.update_product(pid, fields).await.map(Some)
    }

    /// Deletes a product (`DELETE product/{pid}.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a pid of 0, or the
    /// classified HTTP error.
    pub async fn delete_product(&self, pid: u64) -> Result<(), ServicesError> {
        let pid = require_id("product", pid)?;
        self.delete(&format!("product/{pid}.json")).await?;
        Ok(())
    }
}
