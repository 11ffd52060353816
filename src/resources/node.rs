//! Node resource.
//!
//! Node payloads always carry the author `uid` and the configured `language`.
//! Scalar field values are wrapped into Drupal's field structure:
//!
//! ```text
//! "body": "Hello"   =>   "body": {"und": {"value": "Hello"}}
//! ```
//!
//! Objects and arrays are passed through unchanged, so callers can send
//! complete field structures when a field needs more than a single value.

use serde_json::{json, Map, Value};

use crate::clients::{ServicesClient, ServicesError};
use crate::query::{insert_fields, page_param};
use crate::resources::require_id;

/// Field name to value map sent with node and product payloads.
pub type NodeFields = Map<String, Value>;

/// Builds a node payload.
///
/// # Example
///
/// ```rust
/// use drupal_services::resources::{prepare_node_fields, NodeFields};
/// use serde_json::json;
///
/// let mut fields = NodeFields::new();
/// fields.insert("body".to_string(), json!("Hello"));
/// fields.insert("field_tags".to_string(), json!({"und": [{"tid": "3"}]}));
///
/// let payload = prepare_node_fields("en", 5, Some("Title"), Some("article"), &fields);
/// assert_eq!(payload["body"], json!({"en": {"value": "Hello"}}));
/// assert_eq!(payload["field_tags"], json!({"und": [{"tid": "3"}]}));
/// assert_eq!(payload["language"], "en");
/// ```
#[must_use]
pub fn prepare_node_fields(
    language: &str,
    uid: u64,
    title: Option<&str>,
    node_type: Option<&str>,
    fields: &NodeFields,
) -> Value {
    let mut data = Map::new();
    data.insert("uid".to_string(), json!(uid));
    data.insert("language".to_string(), json!(language));
    if let Some(title) = title {
        data.insert("title".to_string(), json!(title));
    }
    if let Some(node_type) = node_type {
        data.insert("type".to_string(), json!(node_type));
    }

    for (field, content) in fields {
        let value = if content.is_object() || content.is_array() {
            content.clone()
        } else {
            json!({ language: { "value": content } })
        };
        data.insert(field.clone(), value);
    }

    Value::Object(data)
}

impl ServicesClient {
    /// Retrieves a node (`GET node/{nid}.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a nid of 0, or the
    /// classified HTTP error.
    pub async fn retrieve_node(&self, nid: u64) -> Result<Value, ServicesError> {
        let nid = require_id("node", nid)?;
        self.get(&format!("node/{nid}.json"), None).await
    }

    /// Creates a node (`POST node.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] if the request fails.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use drupal_services::resources::NodeFields;
    ///
    /// let mut fields = NodeFields::new();
    /// fields.insert("body".into(), "Hello".into());
    /// let created = client.create_node("article", "Greeting", &fields).await?;
    /// ```
    pub async fn create_node(
        &self,
        node_type: &str,
        title: &str,
        fields: &NodeFields,
    ) -> Result<Value, ServicesError> {
        let payload = self.node_payload(Some(title), Some(node_type), fields);
        self.post("node.json", payload).await
    }

    /// Updates a node (`PUT node/{nid}.json`). The title is only sent when given.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a nid of 0, or the
    /// classified HTTP error.
    pub async fn update_node(
        &self,
        nid: u64,
        title: Option<&str>,
        fields: &NodeFields,
    ) -> Result<Value, ServicesError> {
        let nid = require_id("node", nid)?;
        let payload = self.node_payload(title, None, fields);
        self.put(&format!("node/{nid}.json"), payload).await
    }

    /// Deletes a node (`DELETE node/{nid}.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a nid of 0, or the
    /// classified HTTP error.
    pub async fn delete_node(&self, nid: u64) -> Result<Value, ServicesError> {
        let nid = require_id("node", nid)?;
        self.delete(&format!("node/{nid}.json")).await
    }

    /// Lists nodes (`GET node.json`).
    ///
    /// `fields` restricts the returned columns; `parameters` become
    /// `parameters[key]=value` conditions (e.g. `("type", "article")`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError`] if the request fails.
    pub async fn index_nodes(
        &self,
        page: u32,
        pagesize: u32,
        fields: Option<&[&str]>,
        parameters: &[(&str, &str)],
    ) -> Result<Value, ServicesError> {
        let mut query = page_param(page, pagesize);
        insert_fields(&mut query, fields);
        for (key, value) in parameters {
            query.insert(format!("parameters[{key}]"), *value);
        }

        self.get("node.json", Some(query)).await
    }

    fn node_payload(
        &self,
        title: Option<&str>,
        node_type: Option<&str>,
        fields: &NodeFields,
    ) -> Value {
        prepare_node_fields(
            self.config().language().as_ref(),
            self.session().uid().unwrap_or(0),
            title,
            node_type,
            fields,
        )
    }
}
