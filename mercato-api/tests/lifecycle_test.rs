use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use mercato_api::{app, AppState};
use mercato_core::directory::{CustomerProfile, Site};
use mercato_order::engine::FulfillmentEngine;
use mercato_order::notify::{NotificationChannels, NotificationDispatcher};
use mercato_order::repository::RevenueStore;
use mercato_order::revenue::RevenueAttributor;
use mercato_store::{LoggingEmailSender, LoggingMessageSender, MemoryStore};

const PLATFORM_BRAND: &str = "Mercato";

async fn build_app() -> (Router, Arc<MemoryStore>, Uuid) {
    let store = Arc::new(MemoryStore::new());

    let site = Site::new("seller-1".to_string(), 0.90);
    let site_id = site.id;
    store.register_site(site).await;
    store
        .register_customer(CustomerProfile {
            customer_id: "cust-1".to_string(),
            name: "Asha Rao".to_string(),
            email: Some("asha@example.com".to_string()),
            phone: Some("+919800000001".to_string()),
        })
        .await;

    let notifier = Arc::new(NotificationDispatcher::new(
        Arc::new(LoggingEmailSender),
        Arc::new(LoggingMessageSender),
        store.clone(),
        NotificationChannels::default(),
    ));
    let attributor = Arc::new(RevenueAttributor::new(store.clone(), store.clone()));
    let engine = Arc::new(FulfillmentEngine::new(
        store.clone(),
        notifier,
        attributor.clone(),
        PLATFORM_BRAND.to_string(),
    ));

    let state = AppState {
        engine,
        store: store.clone(),
        attributor,
    };
    (app(state), store, site_id)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn create_order_body(site_id: Uuid) -> Value {
    json!({
        "customer_id": "cust-1",
        "payment_mode": "COD",
        "address": {
            "name": "Asha Rao",
            "email": "asha@example.com",
            "phone": "+919800000001",
            "line1": "12 MG Road",
            "city": "Bengaluru",
            "pincode": "560001"
        },
        "items": [
            {
                "product_id": Uuid::new_v4(),
                "name": "Socks",
                "brand_name": PLATFORM_BRAND,
                "quantity": 1,
                "price": 9900
            },
            {
                "product_id": Uuid::new_v4(),
                "name": "Kurta",
                "brand_name": "Fabrow",
                "quantity": 1,
                "price": 100000,
                "size": "M",
                "site_id": site_id
            }
        ]
    })
}

#[tokio::test]
async fn test_order_lifecycle_over_http() {
    let (app, _store, site_id) = build_app().await;

    // Place an order with one platform item and one seller item.
    let (status, order) = send(
        &app,
        Method::POST,
        "/v1/orders",
        Some(create_order_body(site_id)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "PENDING");
    assert_eq!(order["total_amount"], 109900);
    let order_id = order["id"].as_str().unwrap().to_string();
    let seller_item_id = order["items"][1]["id"].as_str().unwrap().to_string();

    // Readable back.
    let (status, fetched) = send(&app, Method::GET, &format!("/v1/orders/{order_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], order["id"]);

    // Unpacked seller item gates the advance.
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/orders/{order_id}/advance"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NOT_READY");

    // Another seller cannot pack this item.
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/order-items/{seller_item_id}/packed"),
        Some(json!({"site_id": Uuid::new_v4()})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    // The owning seller packs it.
    let (status, item) = send(
        &app,
        Method::POST,
        &format!("/v1/order-items/{seller_item_id}/packed"),
        Some(json!({"site_id": site_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["packed"], true);

    // Now the advance goes through.
    let (status, advanced) = send(
        &app,
        Method::POST,
        &format!("/v1/orders/{order_id}/advance"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(advanced["status"], "CONFIRMED");
    assert!(advanced["confirmed_at"].is_string());

    // Re-requesting the reached stage is a permanent no-op.
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/orders/{order_id}/advance"),
        Some(json!({"target": "CONFIRMED"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_TRANSITION");

    // Walk the rest of the chain.
    for expected in ["SHIPPED", "OUT_FOR_DELIVERY", "DELIVERED"] {
        let (status, advanced) = send(
            &app,
            Method::POST,
            &format!("/v1/orders/{order_id}/advance"),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(advanced["status"], expected);
    }

    // DELIVERED is terminal.
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/v1/orders/{order_id}/advance"),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_TRANSITION");
}

#[tokio::test]
async fn test_unknown_order_and_item_return_not_found() {
    let (app, _store, _site_id) = build_app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/v1/orders/{}", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/v1/orders/{}/advance", Uuid::new_v4()),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/v1/order-items/{}/packed", Uuid::new_v4()),
        Some(json!({"site_id": Uuid::new_v4()})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_order_is_rejected() {
    let (app, _store, _site_id) = build_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/orders",
        Some(json!({
            "customer_id": "cust-1",
            "payment_mode": "COD",
            "address": {
                "name": "Asha Rao",
                "line1": "12 MG Road",
                "city": "Bengaluru",
                "pincode": "560001"
            },
            "items": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_revenue_endpoint_total_matches_series() {
    let (app, store, site_id) = build_app().await;

    // Seed past buckets directly; dates are fixed so the spawned attribution
    // of other tests' orders can never land in this window.
    let d1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let d2 = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
    store.accumulate(site_id, d1, 45_000, 5_000).await.unwrap();
    store.accumulate(site_id, d1, 90_000, 10_000).await.unwrap();
    store.accumulate(site_id, d2, 30_000, 3_333).await.unwrap();

    let uri = format!(
        "/v1/revenue?scope=site&site_id={site_id}&from=2026-01-01&to=2026-01-02"
    );
    let (status, report) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let daily: i64 = report["daily"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["amount"].as_i64().unwrap())
        .sum();
    assert_eq!(report["total"].as_i64().unwrap(), daily);
    assert_eq!(daily, 165_000);

    let (status, report) = send(
        &app,
        Method::GET,
        "/v1/revenue?scope=platform&from=2026-01-01&to=2026-01-02",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total"].as_i64().unwrap(), 18_333);

    // Scope validation.
    let (status, _) = send(
        &app,
        Method::GET,
        "/v1/revenue?scope=site&from=2026-01-01&to=2026-01-02",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::GET,
        "/v1/revenue?scope=warehouse&from=2026-01-01&to=2026-01-02",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
