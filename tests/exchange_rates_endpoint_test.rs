use axum::http::StatusCode;
use dealdesk::api::{self, AppState};
use dealdesk::config::Config;
use dealdesk::engine::ExchangeRateTable;
use dealdesk::{MockSalesOrderGateway, Repository};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn setup_test_app() -> axum::Router {
    let state = AppState::new(
        Arc::new(Repository::seeded(ExchangeRateTable::with_defaults())),
        Config::default(),
        Arc::new(MockSalesOrderGateway::new()),
    );
    api::create_router(state)
}

async fn send(app: axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_default_rate_table() {
    let (status, json) = send(setup_test_app(), "GET", "/v1/exchange-rates", None).await;
    assert_eq!(status, StatusCode::OK);
    let rates = json.as_object().unwrap();
    assert_eq!(rates.len(), 5);
    assert_eq!(rates["EUR"].as_f64(), Some(0.92));
    assert_eq!(rates["CLP"].as_f64(), Some(950.0));
    assert!(!rates.contains_key("USD"));
}

#[tokio::test]
async fn test_rate_update_feeds_settlement() {
    let app = setup_test_app();

    let (status, json) = send(
        app.clone(),
        "PUT",
        "/v1/exchange-rates/eur",
        Some(json!({"rate": "0.9"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["EUR"].as_f64(), Some(0.9));

    let (_, json) = send(app, "GET", "/v1/deals/4/settlement", None).await;
    assert_eq!(json["rate"], "0.9");
    assert_eq!(json["localAmount"], "450000");
}

#[tokio::test]
async fn test_new_currency_is_added() {
    let app = setup_test_app();
    let (status, json) = send(
        app,
        "PUT",
        "/v1/exchange-rates/BRL",
        Some(json!({"rate": "5.1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_object().unwrap().len(), 6);
    assert_eq!(json["BRL"].as_f64(), Some(5.1));
}

#[tokio::test]
async fn test_invalid_rates_leave_table_untouched() {
    let app = setup_test_app();

    for bad in ["0", "-0.5", "NaN", "lots"] {
        let (status, json) = send(
            app.clone(),
            "PUT",
            "/v1/exchange-rates/EUR",
            Some(json!({ "rate": bad })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "rate {bad:?}");
        assert!(json["error"].as_str().unwrap().contains("EUR"));
    }

    let (status, _) = send(
        app.clone(),
        "PUT",
        "/v1/exchange-rates/E1",
        Some(json!({"rate": "1.5"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = send(app, "GET", "/v1/exchange-rates", None).await;
    assert_eq!(json["EUR"].as_f64(), Some(0.92));
}

#[tokio::test]
async fn test_overflowing_table_rate_is_reported_on_settlement() {
    let app = setup_test_app();

    let (status, _) = send(
        app.clone(),
        "PUT",
        "/v1/exchange-rates/EUR",
        Some(json!({"rate": "79228162514264337593543950335"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(app, "GET", "/v1/deals/4/settlement", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("overflows"));
}
