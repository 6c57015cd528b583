use crate::api::deals::DealsQuery;
use crate::api::AppState;
use crate::domain::{Deal, Stage};
use crate::engine;
use crate::error::AppError;
use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageColumnDto {
    pub stage: Stage,
    pub label: String,
    pub count: usize,
    pub total_value: String,
    pub deals: Vec<Deal>,
}

/// Kanban view of the deals the viewer may see, one column per stage.
pub async fn get_pipeline(
    Query(params): Query<DealsQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<StageColumnDto>>, AppError> {
    let viewer = state.viewer(&params.viewer).await?;
    let deals = state.repo.list_deals().await;
    let visible = engine::filter_deals(&deals, &viewer, params.q.as_deref().unwrap_or(""));

    let columns = engine::board(visible)
        .into_iter()
        .map(|column| StageColumnDto {
            stage: column.stage,
            label: column.label.to_string(),
            count: column.count,
            total_value: column.total_value.to_canonical_string(),
            deals: column.deals.into_iter().cloned().collect(),
        })
        .collect();

    Ok(Json(columns))
}
