use crate::api::AppState;
use crate::domain::{Deal, DealId, Stage};
use crate::engine::{self, currency, entity_resolver};
use crate::error::AppError;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Deserialize)]
pub struct DealsQuery {
    pub viewer: String,
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStageRequest {
    pub stage: String,
}

#[derive(Debug, Deserialize)]
pub struct RateOverrideRequest {
    pub rate: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementResponse {
    pub deal_id: DealId,
    pub entity_id: String,
    pub entity_name: String,
    pub region: String,
    pub currency: String,
    pub amount_usd: String,
    pub rate: String,
    pub rate_source: currency::RateSource,
    pub local_amount: String,
}

pub async fn get_deals(
    Query(params): Query<DealsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Deal>>, AppError> {
    let viewer = state.viewer(&params.viewer).await?;
    let deals = state.repo.list_deals().await;
    let visible = engine::filter_deals(&deals, &viewer, params.q.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(visible))
}

pub async fn get_deal(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Deal>, AppError> {
    Ok(Json(state.repo.get_deal(&DealId::new(id)).await?))
}

pub async fn update_stage(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<UpdateStageRequest>,
) -> Result<Json<Deal>, AppError> {
    let stage = Stage::from_str(&body.stage).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let deal = state
        .repo
        .update_deal(&DealId::new(id), |deal| Ok(engine::move_deal(deal, stage)))
        .await?;
    tracing::info!(deal = %deal.id, %stage, "deal moved");
    Ok(Json(deal))
}

/// Set or clear the per-deal rate. The rate is validated against the
/// currency of the deal's billing entity.
pub async fn set_exchange_rate_override(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(body): Json<RateOverrideRequest>,
) -> Result<Json<Deal>, AppError> {
    let id = DealId::new(id);
    let current = state.repo.get_deal(&id).await?;
    let entity = entity_resolver::resolve(&current.country);
    let rate = body
        .rate
        .as_deref()
        .map(|raw| currency::parse_rate(entity.currency, raw))
        .transpose()?;

    let deal = state
        .repo
        .update_deal(&id, |deal| {
            Ok(Deal {
                exchange_rate_override: rate,
                ..deal.clone()
            })
        })
        .await?;
    tracing::info!(deal = %deal.id, currency = entity.currency, rate = ?rate.map(|r| r.to_string()), "rate override set");
    Ok(Json(deal))
}

pub async fn get_settlement(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SettlementResponse>, AppError> {
    let deal = state.repo.get_deal(&DealId::new(id)).await?;
    let rates = state.repo.rates().await;
    let quote = engine::quote(&deal, &rates)?;

    Ok(Json(SettlementResponse {
        deal_id: deal.id,
        entity_id: quote.entity.id.to_string(),
        entity_name: quote.entity.name.to_string(),
        region: quote.entity.region.to_string(),
        currency: quote.currency.to_string(),
        amount_usd: quote.amount_usd.to_canonical_string(),
        rate: quote.rate.to_canonical_string(),
        rate_source: quote.rate_source,
        local_amount: quote.local_amount.to_canonical_string(),
    }))
}
