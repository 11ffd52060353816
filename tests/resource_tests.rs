//! Integration tests for resource operations.
//!
//! Each test checks the endpoint, query and payload an operation produces
//! and how it interprets the response.

use std::io::Write;

use drupal_services::resources::NodeFields;
use drupal_services::{
    BaseUrl, CurrencyCode, Filter, QuerySpec, ServicesClient, ServicesConfig, ServicesError,
    SortOrder, SKU_IN_USE_BODY,
};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(server: &MockServer) -> ServicesClient {
    let config = ServicesConfig::builder()
        .base_url(BaseUrl::new(format!("{}/api", server.uri())).unwrap())
        .currency(CurrencyCode::new("USD").unwrap())
        .build()
        .unwrap();
    ServicesClient::new(config).unwrap()
}

// ============================================================================
// Nodes
// ============================================================================

#[tokio::test]
async fn test_create_node_wraps_scalar_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/node.json"))
        .and(body_json(json!({
            "uid": 5,
            "language": "en",
            "title": "Greeting",
            "type": "article",
            "body": {"en": {"value": "Hello"}},
            "field_tags": {"und": [{"tid": "3"}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nid": "10"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = create_client(&server);
    client.set_language("en").unwrap();
    client.set_session_data("abc", "SESS", "tok", 5);

    let mut fields = NodeFields::new();
    fields.insert("body".to_string(), json!("Hello"));
    fields.insert("field_tags".to_string(), json!({"und": [{"tid": "3"}]}));

    let created = client.create_node("article", "Greeting", &fields).await.unwrap();
    assert_eq!(created["nid"], "10");
}

#[tokio::test]
async fn test_update_node_without_title() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/node/10.json"))
        .and(body_json(json!({
            "uid": 0,
            "language": "und",
            "body": {"und": {"value": "Bye"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nid": "10"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut fields = NodeFields::new();
    fields.insert("body".to_string(), json!("Bye"));

    client.update_node(10, None, &fields).await.unwrap();
}

#[tokio::test]
async fn test_index_nodes_uses_page_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/node.json"))
        .and(query_param("page", "3"))
        .and(query_param("pagesize", "10"))
        .and(query_param("fields", "nid,title"))
        .and(query_param("parameters[type]", "article"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"nid": "1"}])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let nodes = client
        .index_nodes(3, 10, Some(&["nid", "title"]), &[("type", "article")])
        .await
        .unwrap();

    assert_eq!(nodes[0]["nid"], "1");
}

#[tokio::test]
async fn test_delete_missing_node_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/node/404.json"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!(["Node 404 not found"])))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client.delete_node(404).await.unwrap_err();

    assert!(matches!(error, ServicesError::NotFound(_)));
    assert_eq!(error.status(), 404);
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn test_create_product_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/product.json"))
        .and(body_json(json!({
            "title": "Shirt",
            "sku": "SHIRT-01",
            "type": "product",
            "commerce_price_amount": 1999,
            "commerce_price_currency_code": "USD"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"product_id": "12"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let product = client
        .create_product("product", " SHIRT-01 ", "Shirt", 1999, &NodeFields::new())
        .await
        .unwrap();

    assert_eq!(product["product_id"], "12");
}

#[tokio::test]
async fn test_duplicate_sku_is_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/product.json"))
        .respond_with(ResponseTemplate::new(400).set_body_string(SKU_IN_USE_BODY))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client
        .create_product("product", "SHIRT-01", "Shirt", 1999, &NodeFields::new())
        .await
        .unwrap_err();

    assert!(matches!(error, ServicesError::Conflict(_)));
}

#[tokio::test]
async fn test_index_products_uses_limit_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product.json"))
        .and(query_param("fields", "sku,title"))
        .and(query_param("filter[title]", "shirt"))
        .and(query_param("filter_op[title]", "CONTAINS"))
        .and(query_param("filter[status]", "1"))
        .and(query_param("filter_op[status]", "="))
        .and(query_param("sort_by", "sku"))
        .and(query_param("sort_order", "DESC"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let query = QuerySpec::new()
        .fields(["sku", "title"])
        .filter("title", "shirt")
        .filter("status", Filter::with_operator("1", "="))
        .sort("sku", SortOrder::Desc)
        .page(3)
        .pagesize(10);

    client.index_products(&query).await.unwrap();
}

#[tokio::test]
async fn test_update_product_by_sku_looks_up_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product.json"))
        .and(query_param("filter[sku]", "SHIRT-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "12": {"product_id": "12", "sku": "SHIRT-01"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/product/12.json"))
        .and(body_json(json!({"title": "Better Shirt"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"product_id": "12"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut fields = NodeFields::new();
    fields.insert("title".to_string(), json!("Better Shirt"));

    let updated = client
        .update_product_by_sku("SHIRT-01", &fields)
        .await
        .unwrap();
    assert_eq!(updated, Some(json!({"product_id": "12"})));
}

#[tokio::test]
async fn test_update_product_by_unknown_sku() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/product.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let mut fields = NodeFields::new();
    fields.insert("title".to_string(), json!("x"));

    let updated = client.update_product_by_sku("NOPE-1", &fields).await.unwrap();
    assert!(updated.is_none());
}

#[tokio::test]
async fn test_delete_product() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/product/12.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([true])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    assert!(client.delete_product(12).await.is_ok());
}

// ============================================================================
// Cart, Line Items and Checkout
// ============================================================================

#[tokio::test]
async fn test_add_to_cart_by_sku_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/line-item.json"))
        .and(body_json(json!({
            "type": "product",
            "line_item_label": "SHIRT-01",
            "quantity": 2
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"line_item_id": "40"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    client.add_to_cart_by_sku("SHIRT-01", 2).await.unwrap();
}

#[tokio::test]
async fn test_add_to_order_payloads() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/line-item.json"))
        .and(body_json(json!({
            "order_id": 7,
            "type": "product",
            "line_item_label": "SHIRT-01",
            "quantity": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/line-item.json"))
        .and(body_json(json!({
            "order_id": 7,
            "type": "product",
            "commerce_product": 12,
            "quantity": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    client.add_to_order_by_sku(7, "SHIRT-01", 1).await.unwrap();
    client.add_to_order_by_product_id(7, 12, 3).await.unwrap();
}

#[tokio::test]
async fn test_remove_from_cart_by_sku_deletes_matching_line_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cart.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "7": {
                "order_id": "7",
                "status": "cart",
                "commerce_line_items_entities": {
                    "40": {"type": "product", "line_item_label": "SHIRT-01"},
                    "41": {"type": "product", "line_item_label": "HAT-01"}
                }
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/line-item/41.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([true])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let removed = client.remove_from_cart_by_sku("HAT-01").await.unwrap();

    assert_eq!(removed, Some(json!([true])));
}

#[tokio::test]
async fn test_remove_unknown_sku_from_cart() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cart.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "7": {"status": "cart", "commerce_line_items_entities": {}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    assert_eq!(client.remove_from_cart_by_sku("HAT-01").await, Ok(None));
}

#[tokio::test]
async fn test_remove_from_cart_uses_last_cart_in_server_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cart.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "9": {"order_id": "9", "status": "completed", "commerce_line_items_entities": {}},
                "10": {
                    "order_id": "10",
                    "status": "cart",
                    "commerce_line_items_entities": {
                        "40": {"type": "product", "line_item_label": "HAT-01"}
                    }
                }
            }"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/line-item/40.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([true])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let removed = client.remove_from_cart_by_sku("HAT-01").await.unwrap();

    assert_eq!(removed, Some(json!([true])));
}

#[tokio::test]
async fn test_remove_from_closed_cart_is_protocol_error() {
    let raw = r#"{"10": {"status": "cart"}, "9": {"status": "checkout_review"}}"#;
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cart.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(raw))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client.remove_from_cart_by_sku("HAT-01").await.unwrap_err();

    assert!(matches!(error, ServicesError::Protocol { code: 200, .. }));
    assert_eq!(error.body(), Some(raw));
}

#[tokio::test]
async fn test_remove_without_cart_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/cart.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client.remove_from_cart_by_sku("HAT-01").await.unwrap_err();

    assert!(matches!(error, ServicesError::Protocol { .. }));
}

#[tokio::test]
async fn test_checkout_posts_empty_array() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/checkout.json"))
        .and(body_json(json!([])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "pending"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let order = client.checkout_cart().await.unwrap();
    assert_eq!(order["status"], "pending");
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_set_order_completed() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/order/7.json"))
        .and(body_json(json!({"status": "completed", "log": "Status set via API"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "completed"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    client.set_order_completed(7).await.unwrap();
}

#[tokio::test]
async fn test_index_orders_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/order.json"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    client.index_orders(&QuerySpec::new()).await.unwrap();
}

// ============================================================================
// Views and Custom Resources
// ============================================================================

#[derive(Debug, Deserialize, PartialEq)]
struct FrontpageRow {
    nid: String,
    node_title: String,
}

#[tokio::test]
async fn test_retrieve_view_default_display() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/views/frontpage.json"))
        .and(query_param("display_id", "services_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"nid": "1", "node_title": "Welcome"}])),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let raw = client.retrieve_view("frontpage", None).await.unwrap();
    assert_eq!(raw[0]["node_title"], "Welcome");

    let rows: Vec<FrontpageRow> = client.retrieve_view_as("frontpage", None).await.unwrap();
    assert_eq!(
        rows,
        vec![FrontpageRow {
            nid: "1".to_string(),
            node_title: "Welcome".to_string()
        }]
    );
}

#[tokio::test]
async fn test_typed_view_with_wrong_shape_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/views/frontpage.json"))
        .and(query_param("display_id", "page_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result: Result<Vec<FrontpageRow>, _> =
        client.retrieve_view_as("frontpage", Some("page_1")).await;

    assert!(matches!(result, Err(ServicesError::Protocol { .. })));
}

#[tokio::test]
async fn test_retrieve_resource() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stock.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"SHIRT-01": 4})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let stock: std::collections::HashMap<String, u32> =
        client.retrieve_resource_as("stock").await.unwrap();
    assert_eq!(stock.get("SHIRT-01"), Some(&4));
}

// ============================================================================
// Users and Files
// ============================================================================

#[tokio::test]
async fn test_request_new_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/request_new_password.json"))
        .and(body_json(json!({"name": "bob"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([true])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    client.request_new_password("bob").await.unwrap();
}

#[tokio::test]
async fn test_upload_file_sends_base64_payload() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"hello").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/file.json"))
        .and(body_json(json!({
            "filesize": 5,
            "filename": "greeting.txt",
            "file": "aGVsbG8=",
            "uid": 5,
            "status": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fid": "22"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = create_client(&server);
    client.set_session_data("abc", "SESS", "tok", 5);

    let created = client
        .upload_file(file.path(), Some("greeting.txt"), false)
        .await
        .unwrap();
    assert_eq!(created["fid"], "22");
}

#[tokio::test]
async fn test_upload_file_defaults_filename() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("photo.jpg");
    std::fs::write(&file_path, b"jpg").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/file.json"))
        .and(body_json(json!({
            "filesize": 3,
            "filename": "photo.jpg",
            "file": "anBn",
            "uid": 0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fid": "23"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    client.upload_file(&file_path, None, true).await.unwrap();
}

#[tokio::test]
async fn test_view_file_and_index_files_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/file/22.json"))
        .and(query_param("file_contents", "1"))
        .and(query_param("image_styles", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fid": "22"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/file.json"))
        .and(query_param("page", "2"))
        .and(query_param("pagesize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    client.view_file(22, true, false).await.unwrap();
    client.index_files(2, 5).await.unwrap();
}
