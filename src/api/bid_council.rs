use crate::api::AppState;
use crate::domain::{Deal, DealId, Decimal, Gate, UserId};
use crate::engine::approvals::{self, GateView};
use crate::engine::margin::{self, MarginBreakdown};
use crate::error::AppError;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostParams {
    pub ps_cost: Option<String>,
    pub ops_cost: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub approver_id: String,
    #[serde(flatten)]
    pub costs: CostParams,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginDto {
    pub revenue: String,
    pub license_cost: String,
    pub professional_services_cost: String,
    pub operations_cost: String,
    pub total_cost: String,
    pub gross_margin: String,
    pub margin_percent: String,
    pub auto_approvable: bool,
    pub healthy: bool,
}

impl From<&MarginBreakdown> for MarginDto {
    fn from(m: &MarginBreakdown) -> Self {
        Self {
            revenue: m.revenue.to_canonical_string(),
            license_cost: m.license_cost.to_canonical_string(),
            professional_services_cost: m.professional_services_cost.to_canonical_string(),
            operations_cost: m.operations_cost.to_canonical_string(),
            total_cost: m.total_cost.to_canonical_string(),
            gross_margin: m.gross_margin.to_canonical_string(),
            margin_percent: m.margin_percent.to_canonical_string(),
            auto_approvable: m.auto_approvable,
            healthy: m.is_healthy(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidCouncilResponse {
    pub deal_id: DealId,
    pub margin: MarginDto,
    pub gates: Vec<GateView>,
    pub all_cleared: bool,
}

fn parse_cost(name: &str, raw: Option<&str>, default: Decimal) -> Result<Decimal, AppError> {
    match raw {
        None => Ok(default),
        Some(raw) => {
            let cost = Decimal::from_str_canonical(raw)
                .map_err(|_| AppError::BadRequest(format!("{} must be a number", name)))?;
            if cost.is_negative() {
                return Err(AppError::BadRequest(format!("{} must not be negative", name)));
            }
            Ok(cost)
        }
    }
}

/// Margin for the deal's value and the entered costs, falling back to the
/// default estimates for any cost left out.
fn margin_for(deal: &Deal, costs: &CostParams) -> Result<MarginBreakdown, AppError> {
    let defaults = margin::default_costs(deal.value)?;
    let ps = parse_cost("psCost", costs.ps_cost.as_deref(), defaults.professional_services_cost)?;
    let ops = parse_cost("opsCost", costs.ops_cost.as_deref(), defaults.operations_cost)?;
    Ok(margin::compute(deal.value, ps, ops)?)
}

fn respond(deal: &Deal, margin: &MarginBreakdown) -> BidCouncilResponse {
    BidCouncilResponse {
        deal_id: deal.id.clone(),
        margin: margin.into(),
        gates: approvals::gate_views(&deal.approvals, margin.auto_approvable),
        all_cleared: approvals::all_cleared(&deal.approvals, margin.auto_approvable),
    }
}

pub async fn get_bid_council(
    Path(id): Path<String>,
    Query(costs): Query<CostParams>,
    State(state): State<AppState>,
) -> Result<Json<BidCouncilResponse>, AppError> {
    let deal = state.repo.get_deal(&DealId::new(id)).await?;
    let margin = margin_for(&deal, &costs)?;
    Ok(Json(respond(&deal, &margin)))
}

/// Flip one gate. The auto-approval overlay is evaluated against the
/// costs sent with the request, so the caller's view and the check agree.
pub async fn toggle_gate(
    Path((id, gate)): Path<(String, String)>,
    State(state): State<AppState>,
    Json(body): Json<ToggleRequest>,
) -> Result<Json<BidCouncilResponse>, AppError> {
    let gate = Gate::from_str(&gate).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let approver: UserId = state.viewer(&body.approver_id).await?.id;
    let id = DealId::new(id);

    let current = state.repo.get_deal(&id).await?;
    let margin = margin_for(&current, &body.costs)?;

    let deal = state
        .repo
        .update_deal(&id, |deal| {
            Ok(Deal {
                approvals: approvals::toggle(
                    &deal.approvals,
                    gate,
                    margin.auto_approvable,
                    &approver,
                    Utc::now(),
                ),
                ..deal.clone()
            })
        })
        .await?;

    tracing::info!(
        deal = %deal.id,
        %gate,
        approver = %approver,
        status = ?deal.approvals.get(gate).status,
        "approval toggled"
    );
    Ok(Json(respond(&deal, &margin)))
}
