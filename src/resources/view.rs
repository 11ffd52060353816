//! Views and custom resources.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::clients::{HttpMethod, ServicesClient, ServicesError};
use crate::query::QueryParams;
use crate::resources::require_non_blank;

/// Display used when none is given; the default display id of a
/// `services_views` export.
pub const DEFAULT_VIEW_DISPLAY: &str = "services_1";

fn view_request(name: &str, display: Option<&str>) -> Result<(String, QueryParams), ServicesError> {
    let name = require_non_blank("view name", name)?;
    let display = match display {
        Some(display) => require_non_blank("view display", display)?,
        None => DEFAULT_VIEW_DISPLAY,
    };

    let mut query = QueryParams::new();
    query.insert("display_id", display);
    Ok((format!("views/{}.json", urlencoding::encode(name)), query))
}

fn resource_endpoint(name: &str) -> Result<String, ServicesError> {
    let name = require_non_blank("resource name", name)?;
    Ok(format!("{name}.json"))
}

impl ServicesClient {
    /// Retrieves the result of a view (`GET views/{name}.json?display_id=..`).
    ///
    /// `display` defaults to [`DEFAULT_VIEW_DISPLAY`].
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a blank name or display,
    /// or the classified HTTP error.
    pub async fn retrieve_view(
        &self,
        name: &str,
        display: Option<&str>,
    ) -> Result<Value, ServicesError> {
        let (endpoint, query) = view_request(name, display)?;
        self.get(&endpoint, Some(query)).await
    }

    /// Like [`retrieve_view`](Self::retrieve_view), decoding rows into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::Protocol`] if the result does not match `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// #[derive(serde::Deserialize)]
    /// struct Row { nid: String, node_title: String }
    ///
    /// let rows: Vec<Row> = client.retrieve_view_as("frontpage", None).await?;
    /// ```
    pub async fn retrieve_view_as<T: DeserializeOwned>(
        &self,
        name: &str,
        display: Option<&str>,
    ) -> Result<T, ServicesError> {
        let (endpoint, query) = view_request(name, display)?;
        self.execute_as(HttpMethod::Get, &endpoint, Some(query), None)
            .await
    }

    /// Retrieves a custom resource (`GET {name}.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::InvalidInput`] for a blank name, or the
    /// classified HTTP error.
    pub async fn retrieve_resource(&self, name: &str) -> Result<Value, ServicesError> {
        self.get(&resource_endpoint(name)?, None).await
    }

    /// Like [`retrieve_resource`](Self::retrieve_resource), decoding into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ServicesError::Protocol`] if the result does not match `T`.
    pub async fn retrieve_resource_as<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<T, ServicesError> {
        self.execute_as(HttpMethod::Get, &resource_endpoint(name)?, None, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;

    #[test]
    fn test_view_request_uses_default_display() {
        let (endpoint, query) = view_request("frontpage", None).unwrap();
        assert_eq!(endpoint, "views/frontpage.json");
        assert_eq!(query.get("display_id"), Some(DEFAULT_VIEW_DISPLAY));
    }

    #[test]
    fn test_view_request_with_display() {
        let (_, query) = view_request("frontpage", Some("page_1")).unwrap();
        assert_eq!(query.get("display_id"), Some("page_1"));
    }

    #[test]
    fn test_view_name_is_encoded() {
        let (endpoint, _) = view_request("new products", None).unwrap();
        assert_eq!(endpoint, "views/new%20products.json");
    }

    #[test]
    fn test_blank_names_are_rejected() {
        assert!(matches!(
            view_request(" ", None),
            Err(ServicesError::InvalidInput(InputError::BlankValue { kind: "view name" }))
        ));
        assert!(matches!(
            view_request("frontpage", Some("")),
            Err(ServicesError::InvalidInput(InputError::BlankValue { kind: "view display" }))
        ));
        assert!(matches!(
            resource_endpoint(""),
            Err(ServicesError::InvalidInput(InputError::BlankValue { kind: "resource name" }))
        ));
        assert_eq!(resource_endpoint("stock").unwrap(), "stock.json");
    }
}
