use crate::api::AppState;
use crate::engine::{currency, ExchangeRateTable};
use crate::error::AppError;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PutRateRequest {
    pub rate: String,
}

pub async fn get_rates(State(state): State<AppState>) -> Json<ExchangeRateTable> {
    Json(state.repo.rates().await)
}

pub async fn put_rate(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<PutRateRequest>,
) -> Result<Json<ExchangeRateTable>, AppError> {
    let code = code.trim().to_uppercase();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::BadRequest("Invalid currency code".into()));
    }
    let rate = currency::parse_rate(&code, &body.rate)?;
    Ok(Json(state.repo.set_rate(&code, rate).await?))
}
