// SPDX-FileCopyrightText: 2026 Storefront Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests through the HTTP router.
//!
//! Each test builds an isolated TestHarness with temp SQLite and mock
//! collaborators. Tests are independent and order-insensitive.

use axum::body::Body;
use axum::http::{Method, StatusCode};
use serde_json::json;

use storefront_core::StorageAdapter;
use storefront_core::types::{PaymentStatus, SaleFilter};
use storefront_test_utils::fixtures::{
    checkout_body, marketplace_item, payment_event, product, sign,
};
use storefront_test_utils::harness::TEST_PAYMENT_SECRET;
use storefront_test_utils::{
    MockMarketplace, MockPaymentGateway, RecordingNotifier, TestHarness,
};

async fn add_product(harness: &TestHarness, name: &str, category: &str, price: f64) -> i64 {
    harness
        .storage
        .create_product(&product(name, category, price))
        .await
        .unwrap()
        .id
}

fn five_marketplace_items() -> MockMarketplace {
    MockMarketplace::new(
        (1..=5)
            .map(|n| marketplace_item(n, &format!("Used laptop {n}"), 300.0 + f64::from(n)))
            .collect(),
    )
}

/// Checkout one unit of a new product; returns the order id.
async fn place_order(harness: &TestHarness) -> i64 {
    let id = add_product(harness, "Pixel 9", "phones", 450.0).await;
    let response = harness
        .post_json("/api/checkout", &checkout_body(&[(id, 1)]))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["orderId"].as_i64().unwrap()
}

// ---- Catalog feed ----

#[tokio::test]
async fn category_browse_puts_local_inventory_first() {
    let harness = TestHarness::builder()
        .with_mock_marketplace(five_marketplace_items())
        .build()
        .await
        .unwrap();
    for name in ["ThinkPad X1", "XPS 13", "MacBook Air"] {
        add_product(&harness, name, "laptops", 900.0).await;
    }
    add_product(&harness, "Pixel 9", "phones", 450.0).await;

    let response = harness
        .get("/api/marketplace/category/laptops?pageSize=2")
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["isLocal"] == true));
    assert!(items.iter().all(|i| i["category"] == "laptops"));
    assert_eq!(items[0]["currency"], "NGN");
    assert_eq!(response.body["totalCount"], 3 + 5);
    assert_eq!(response.body["pageNumber"], 1);

    let queries = harness.marketplace.queries().await;
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].category_id.as_deref(), Some("177"));
    assert_eq!(queries[0].page_size, 2);
}

#[tokio::test]
async fn search_fills_page_with_marketplace_listings() {
    let harness = TestHarness::builder()
        .with_mock_marketplace(five_marketplace_items().with_total_count(240))
        .build()
        .await
        .unwrap();
    add_product(&harness, "Used laptop bag", "accessories", 25.0).await;

    let response = harness
        .get("/api/marketplace/search?q=laptop&pageSize=4&sort=price_asc&minPrice=10&maxPrice=1000&condition=used")
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["isLocal"], true);
    assert_eq!(items[0]["name"], "Used laptop bag");
    assert!(items[1..].iter().all(|i| i["isLocal"] == false));
    assert!(items[1]["url"].as_str().unwrap().starts_with("https://market.test/"));
    assert_eq!(response.body["totalCount"], 1 + 240);

    let query = &harness.marketplace.queries().await[0];
    assert_eq!(query.query, "laptop");
    assert_eq!(query.conditions, vec!["used"]);
    assert_eq!(query.min_price, Some(10.0));
}

#[tokio::test]
async fn price_range_excludes_local_rows_outside_bounds() {
    let harness = TestHarness::builder().build().await.unwrap();
    add_product(&harness, "Budget phone", "phones", 99.0).await;
    add_product(&harness, "Mid phone", "phones", 300.0).await;
    add_product(&harness, "Flagship phone", "phones", 1200.0).await;

    let response = harness
        .get("/api/marketplace/search?q=phone&minPrice=99&maxPrice=300")
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let names: Vec<&str> = response.body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Budget phone"));
    assert!(names.contains(&"Mid phone"));
}

#[tokio::test]
async fn marketplace_outage_serves_local_results() {
    let harness = TestHarness::builder()
        .with_mock_marketplace(MockMarketplace::failing())
        .build()
        .await
        .unwrap();
    add_product(&harness, "ThinkPad X1", "laptops", 900.0).await;

    let response = harness.get("/api/marketplace/category/laptops").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["items"].as_array().unwrap().len(), 1);
    assert_eq!(response.body["totalCount"], 1);
    assert_eq!(harness.marketplace.call_count().await, 1);
}

#[tokio::test]
async fn local_only_category_skips_marketplace() {
    let harness = TestHarness::builder()
        .with_mock_marketplace(five_marketplace_items())
        .build()
        .await
        .unwrap();
    add_product(&harness, "USB-C hub", "accessories", 40.0).await;

    let response = harness.get("/api/marketplace/category/accessories").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["items"].as_array().unwrap().len(), 1);
    assert_eq!(harness.marketplace.call_count().await, 0);
}

#[tokio::test]
async fn bad_query_parameters_are_400_json() {
    let harness = TestHarness::builder().build().await.unwrap();

    let response = harness.get("/api/marketplace/search?q=x&sort=cheapest").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().contains("cheapest"));

    let response = harness.get("/api/marketplace/search?page=first").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
}

// ---- Checkout and payment webhook ----

#[tokio::test]
async fn checkout_then_signed_webhook_completes_once() {
    let harness = TestHarness::builder().build().await.unwrap();
    let order_id = place_order(&harness).await;

    let requests = harness.gateway.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount_minor, 45_000);
    assert_eq!(requests[0].currency, "NGN");

    let body = payment_event("charge.success", order_id);
    let signature = sign(TEST_PAYMENT_SECRET, &body);

    let first = harness.post_webhook(&body, Some(&signature)).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["outcome"], "completed");
    assert_eq!(first.body["order_id"], order_id);

    let second = harness.post_webhook(&body, Some(&signature)).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(second.body["outcome"], "already_completed");

    let sale = harness.storage.get_sale(order_id).await.unwrap().unwrap();
    assert_eq!(sale.payment_status, PaymentStatus::Completed);
    assert_eq!(harness.notifier.sent().await.len(), 1);
}

#[tokio::test]
async fn forged_or_unsigned_webhook_is_401() {
    let harness = TestHarness::builder().build().await.unwrap();
    let order_id = place_order(&harness).await;
    let body = payment_event("charge.success", order_id);

    let forged = harness
        .post_webhook(&body, Some(&sign("wrong-secret", &body)))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
    assert_eq!(forged.body["error"], "invalid webhook signature");

    let unsigned = harness.post_webhook(&body, None).await;
    assert_eq!(unsigned.status, StatusCode::UNAUTHORIZED);

    let sale = harness.storage.get_sale(order_id).await.unwrap().unwrap();
    assert_eq!(sale.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn non_success_event_is_acknowledged_without_change() {
    let harness = TestHarness::builder().build().await.unwrap();
    let order_id = place_order(&harness).await;

    let body = payment_event("charge.failed", order_id);
    let response = harness
        .post_webhook(&body, Some(&sign(TEST_PAYMENT_SECRET, &body)))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["outcome"], "ignored");

    let sale = harness.storage.get_sale(order_id).await.unwrap().unwrap();
    assert_eq!(sale.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn signed_webhook_without_order_id_is_400() {
    let harness = TestHarness::builder().build().await.unwrap();
    let body = json!({"event": "charge.success", "data": {"reference": "x"}})
        .to_string()
        .into_bytes();
    let response = harness
        .post_webhook(&body, Some(&sign(TEST_PAYMENT_SECRET, &body)))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().unwrap().contains("malformed"));
}

#[tokio::test]
async fn webhook_for_unknown_order_is_acknowledged() {
    let harness = TestHarness::builder().build().await.unwrap();
    let body = payment_event("charge.success", 9_999);
    let response = harness
        .post_webhook(&body, Some(&sign(TEST_PAYMENT_SECRET, &body)))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["outcome"], "unknown_order");
}

#[tokio::test]
async fn notifier_failure_keeps_webhook_successful() {
    let harness = TestHarness::builder()
        .with_notifier(RecordingNotifier::failing())
        .build()
        .await
        .unwrap();
    let order_id = place_order(&harness).await;
    let body = payment_event("charge.success", order_id);
    let response = harness
        .post_webhook(&body, Some(&sign(TEST_PAYMENT_SECRET, &body)))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["outcome"], "completed");
}

#[tokio::test]
async fn missing_payment_secret_is_503() {
    let harness = TestHarness::builder()
        .with_config(|c| c.payments.secret_key = None)
        .build()
        .await
        .unwrap();
    let id = add_product(&harness, "Pixel 9", "phones", 450.0).await;

    let checkout = harness
        .post_json("/api/checkout", &checkout_body(&[(id, 1)]))
        .await;
    assert_eq!(checkout.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(
        harness
            .storage
            .list_sales(SaleFilter::default())
            .await
            .unwrap()
            .is_empty()
    );

    let body = payment_event("charge.success", 1);
    let webhook = harness
        .post_webhook(&body, Some(&sign(TEST_PAYMENT_SECRET, &body)))
        .await;
    assert_eq!(webhook.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(webhook.body["error"].is_string());
}

#[tokio::test]
async fn gateway_failure_is_502_and_sale_stays_pending() {
    let harness = TestHarness::builder()
        .with_payment_gateway(MockPaymentGateway::failing())
        .build()
        .await
        .unwrap();
    let id = add_product(&harness, "Pixel 9", "phones", 450.0).await;

    let response = harness
        .post_json("/api/checkout", &checkout_body(&[(id, 1)]))
        .await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);

    let sales = harness
        .storage
        .list_sales(SaleFilter::default())
        .await
        .unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn invalid_checkouts_are_400() {
    let harness = TestHarness::builder().build().await.unwrap();
    let id = add_product(&harness, "Pixel 9", "phones", 450.0).await;

    let too_many = harness
        .post_json("/api/checkout", &checkout_body(&[(id, 11)]))
        .await;
    assert_eq!(too_many.status, StatusCode::BAD_REQUEST);

    let empty = harness.post_json("/api/checkout", &checkout_body(&[])).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let not_json = harness
        .send(
            Method::POST,
            "/api/checkout",
            &[("content-type", "application/json")],
            Body::from("{not json"),
        )
        .await;
    assert_eq!(not_json.status, StatusCode::BAD_REQUEST);
    assert!(not_json.body["error"].is_string());
}

// ---- Back-office ----

#[tokio::test]
async fn admin_routes_require_bearer_token() {
    let harness = TestHarness::builder().build().await.unwrap();

    let anonymous = harness.get("/admin/products").await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let wrong = harness
        .send(
            Method::GET,
            "/admin/sales",
            &[("authorization", "Bearer guess")],
            Body::empty(),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let ok = harness.admin(Method::GET, "/admin/products", None).await;
    assert_eq!(ok.status, StatusCode::OK);
}

#[tokio::test]
async fn admin_without_configured_token_rejects_everything() {
    let harness = TestHarness::builder()
        .with_config(|c| c.admin.bearer_token = None)
        .build()
        .await
        .unwrap();
    let response = harness.admin(Method::GET, "/admin/products", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_product_lifecycle() {
    let harness = TestHarness::builder().build().await.unwrap();

    let created = harness
        .admin(
            Method::POST,
            "/admin/products",
            Some(&json!({
                "name": "Galaxy S24",
                "price": 799.0,
                "originalPrice": 899.0,
                "category": "phones",
                "stock": 2
            })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["status"], "available");
    let id = created.body["id"].as_i64().unwrap();

    let sold_out = harness
        .admin(
            Method::PATCH,
            &format!("/admin/products/{id}"),
            Some(&json!({"stock": 0})),
        )
        .await;
    assert_eq!(sold_out.status, StatusCode::OK);
    assert_eq!(sold_out.body["status"], "sold_out");

    let restocked = harness
        .admin(
            Method::PATCH,
            &format!("/admin/products/{id}"),
            Some(&json!({"stock": 5, "price": 749.0})),
        )
        .await;
    assert_eq!(restocked.body["status"], "available");
    assert_eq!(restocked.body["price"], 749.0);
    assert_eq!(restocked.body["originalPrice"], 899.0);

    let cleared = harness
        .admin(
            Method::PATCH,
            &format!("/admin/products/{id}"),
            Some(&json!({"originalPrice": null})),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert!(cleared.body["originalPrice"].is_null());

    let listed = harness
        .admin(Method::GET, "/admin/products?category=phones", None)
        .await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);

    let deleted = harness
        .admin(Method::DELETE, &format!("/admin/products/{id}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = harness
        .admin(Method::GET, &format!("/admin/products/{id}"), None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert!(gone.body["error"].as_str().unwrap().contains("product"));
}

#[tokio::test]
async fn admin_rejects_invalid_product_input() {
    let harness = TestHarness::builder().build().await.unwrap();

    let negative = harness
        .admin(
            Method::POST,
            "/admin/products",
            Some(&json!({"name": "X", "price": -5.0, "category": "phones"})),
        )
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);

    let bad_id = harness
        .admin(Method::GET, "/admin/products/not-a-number", None)
        .await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delivered_sale_moves_to_archive() {
    let harness = TestHarness::builder().build().await.unwrap();
    let order_id = place_order(&harness).await;

    let pending = harness
        .admin(Method::GET, "/admin/sales?paymentStatus=pending", None)
        .await;
    assert_eq!(pending.body.as_array().unwrap().len(), 1);

    let shipped = harness
        .admin(
            Method::PUT,
            &format!("/admin/sales/{order_id}/fulfillment"),
            Some(&json!({"status": "delivered"})),
        )
        .await;
    assert_eq!(shipped.status, StatusCode::OK);
    assert_eq!(shipped.body["archived"], true);
    assert_eq!(shipped.body["fulfillmentStatus"], "delivered");

    let live = harness.admin(Method::GET, "/admin/sales", None).await;
    assert!(live.body.as_array().unwrap().is_empty());

    let archived = harness
        .admin(Method::GET, "/admin/sales/archived", None)
        .await;
    assert_eq!(archived.status, StatusCode::OK);
    let archived = archived.body.as_array().unwrap();
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0]["id"], order_id);
    assert!(archived[0]["archivedAt"].is_string());

    let lookup = harness
        .admin(Method::GET, &format!("/admin/sales/{order_id}"), None)
        .await;
    assert_eq!(lookup.status, StatusCode::NOT_FOUND);
}

// ---- Health ----

#[tokio::test]
async fn health_reports_components() {
    let harness = TestHarness::builder().build().await.unwrap();
    let response = harness.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["components"]["sqlite"]["status"], "healthy");
    assert_eq!(
        response.body["components"]["marketplace"]["status"],
        "healthy"
    );
}

#[tokio::test]
async fn health_is_degraded_when_marketplace_fails() {
    let harness = TestHarness::builder()
        .with_mock_marketplace(MockMarketplace::failing())
        .build()
        .await
        .unwrap();
    let response = harness.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "degraded");
}
