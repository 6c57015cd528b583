use axum::http::StatusCode;
use dealdesk::api::{self, AppState};
use dealdesk::config::Config;
use dealdesk::engine::ExchangeRateTable;
use dealdesk::{MockSalesOrderGateway, Repository};
use std::sync::Arc;
use tower::util::ServiceExt;

fn setup_test_app(seeded: bool) -> axum::Router {
    let repo = if seeded {
        Repository::seeded(ExchangeRateTable::with_defaults())
    } else {
        Repository::new(ExchangeRateTable::with_defaults())
    };
    let state = AppState::new(
        Arc::new(repo),
        Config::default(),
        Arc::new(MockSalesOrderGateway::new()),
    );
    api::create_router(state)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, json) = get(setup_test_app(true), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_ready_endpoint_seeded() {
    let (status, json) = get(setup_test_app(true), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ready");
    assert_eq!(json["deals"], 5);
}

#[tokio::test]
async fn test_ready_endpoint_empty() {
    let (status, json) = get(setup_test_app(false), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deals"], 0);
    assert_eq!(json["users"], 0);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = get(setup_test_app(true), "/v1/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_users_listing() {
    let (status, json) = get(setup_test_app(true), "/v1/users").await;
    assert_eq!(status, StatusCode::OK);
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 6);
    assert_eq!(users[0]["id"], "u1");
    assert_eq!(users[0]["role"], "SALES_REP");
}

#[tokio::test]
async fn test_update_role_changes_visibility() {
    let app = setup_test_app(true);

    let (_, before) = get(app.clone(), "/v1/deals?viewer=u1").await;
    assert_eq!(before.as_array().unwrap().len(), 3);

    let request = axum::http::Request::builder()
        .method("PUT")
        .uri("/v1/users/u1/role")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"role":"ADMIN"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, after) = get(app, "/v1/deals?viewer=u1").await;
    assert_eq!(after.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_update_role_rejects_unknown_role_and_user() {
    let app = setup_test_app(true);

    let request = axum::http::Request::builder()
        .method("PUT")
        .uri("/v1/users/u1/role")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"role":"CEO"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = axum::http::Request::builder()
        .method("PUT")
        .uri("/v1/users/u99/role")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"role":"ADMIN"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_contacts_filters() {
    let app = setup_test_app(true);

    let (status, json) = get(app.clone(), "/v1/contacts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["contacts"].as_array().unwrap().len(), 6);
    assert_eq!(json["companies"].as_array().unwrap().len(), 5);

    let (_, json) = get(app.clone(), "/v1/contacts?company=Acme%20Corp").await;
    let names: Vec<&str> = json["contacts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["John Doe", "Sarah Connor"]);

    let (_, json) = get(app.clone(), "/v1/contacts?dealId=3").await;
    let contacts = json["contacts"].as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["id"], "c4");

    let (_, json) = get(app.clone(), "/v1/contacts?search=UMBRELLA").await;
    assert_eq!(json["contacts"].as_array().unwrap().len(), 1);

    let (_, json) = get(app, "/v1/contacts?dealId=404").await;
    assert!(json["contacts"].as_array().unwrap().is_empty());
}
