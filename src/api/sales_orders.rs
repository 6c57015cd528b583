use crate::api::AppState;
use crate::domain::{Deal, DealId};
use crate::engine;
use crate::error::AppError;
use crate::store::StoreError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

fn ensure_no_order(deal: &Deal) -> Result<(), StoreError> {
    match &deal.sales_order {
        Some(existing) => Err(StoreError::SalesOrderExists(
            deal.id.clone(),
            existing.sales_order_id.clone(),
        )),
        None => Ok(()),
    }
}

/// Book the deal in its billing entity's ERP and store the confirmation.
///
/// The ERP call happens outside the repository lock; the existence check
/// is repeated on write so two concurrent requests cannot both attach.
pub async fn create_sales_order(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Deal>), AppError> {
    let id = DealId::new(id);
    let current = state.repo.get_deal(&id).await?;
    ensure_no_order(&current)?;

    let rates = state.repo.rates().await;
    let quote = engine::quote(&current, &rates)?;
    let link = state
        .gateway
        .create_sales_order(&current, &quote.entity, quote.local_amount)
        .await
        .map_err(|e| {
            tracing::warn!(deal = %id, error = %e, "sales order creation failed");
            AppError::from(e)
        })?;

    let deal = state
        .repo
        .update_deal(&id, |deal| {
            ensure_no_order(deal)?;
            Ok(Deal {
                sales_order: Some(link),
                ..deal.clone()
            })
        })
        .await?;

    tracing::info!(
        deal = %deal.id,
        entity = quote.entity.id,
        local_total = %quote.local_amount,
        "sales order attached"
    );
    Ok((StatusCode::CREATED, Json(deal)))
}
