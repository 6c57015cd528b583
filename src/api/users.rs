use crate::api::AppState;
use crate::domain::{Role, User, UserId};
use crate::error::AppError;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: String,
}

pub async fn get_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.repo.list_users().await)
}

pub async fn update_role(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<Json<User>, AppError> {
    let role = Role::from_str(&body.role).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let user = state.repo.update_user_role(&UserId::new(id), role).await?;
    Ok(Json(user))
}
