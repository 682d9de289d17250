//! Product record store HTTP client tests.

mod common;

use common::stripe_client;
use descriptify::{RecordStore, StoreError, StripeProductStore};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn product_json(description: Option<&str>) -> serde_json::Value {
    json!({
        "id": "prod_widget",
        "object": "product",
        "name": "Widget",
        "description": description,
        "created": 1_700_000_000,
        "active": true
    })
}

#[tokio::test]
async fn test_retrieve_product() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products/prod_widget"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json(None)))
        .expect(1)
        .mount(&server)
        .await;

    let store = StripeProductStore::new(stripe_client(&server.uri()));
    let record = store.retrieve("prod_widget").await.unwrap();

    assert_eq!(record.name, "Widget");
    assert!(record.description.is_none());
}

#[tokio::test]
async fn test_update_description_posts_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/products/prod_widget"))
        .and(body_string_contains("description=A+great+widget."))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(product_json(Some("A great widget."))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = StripeProductStore::new(stripe_client(&server.uri()));
    let record = store
        .update_description("prod_widget", "A great widget.")
        .await
        .unwrap();

    assert_eq!(record.description.as_deref(), Some("A great widget."));
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products/prod_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "resource_missing", "message": "No such product: 'prod_missing'"}
        })))
        .mount(&server)
        .await;

    let store = StripeProductStore::new(stripe_client(&server.uri()));
    assert_eq!(
        store.retrieve("prod_missing").await.unwrap_err(),
        StoreError::NotFound
    );
}
