//! Commerce order resource.

use serde_json::{json, Value};

use crate::clients::{ServicesClient, ServicesError};
use crate::query::QuerySpec;
use crate::resources::{require_id, require_non_blank};

/// Log message stored with status changes made through this client.
pub const STATUS_LOG_MESSAGE: &str = "Status set via API";

/// Status of a completed order.
pub const STATUS_COMPLETED: &str = "completed";

impl ServicesClient {
    /// Lists orders (`GET order.json?limit=..&offset=..`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] if the request fails.
    pub async fn index_orders(&self, query: &QuerySpec) -> Result<Value, ServicesError> {
        self.get("order.json", Some(query.limit_offset_params()))
            .await
    }

    /// Sets the status of an order (`PUT order/{oid}.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for an oid of 0 or a blank
    /// status, or the classified HTTP error.
    pub async fn set_order_status(&self, oid: u64, status: &str) -> Result<Value, ServicesError> {
        let oid = require_id("order", oid)?;
        let status = require_non_blank("order status", status)?;

        self.put(
            &format!("order/{oid}.json"),
            json!({ "status": status, "log": STATUS_LOG_MESSAGE }),
        )
        .await
    }

    /// Marks an order as completed.
    ///
    /// # Errors
    ///
    /// See [`set_order_status`](Self::set_order_status).
    pub async fn set_order_completed(&self, oid: u64) -> Result<Value, ServicesError> {
        self.set_order_status(oid, STATUS_COMPLETED).await
    }
}
