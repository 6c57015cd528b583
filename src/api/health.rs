use crate::api::AppState;
use axum::extract::State;
use axum::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Ready once the repository answers; reports how much is loaded.
pub async fn ready(State(state): State<AppState>) -> Json<serde_json::Value> {
    let deals = state.repo.list_deals().await.len();
    let users = state.repo.list_users().await.len();
    Json(serde_json::json!({"status": "ready", "deals": deals, "users": users}))
}
