pub mod bid_council;
pub mod contacts;
pub mod deals;
pub mod exchange_rates;
pub mod health;
pub mod pipeline;
pub mod sales_orders;
pub mod users;

use crate::config::Config;
use crate::domain::{User, UserId};
use crate::erp::SalesOrderGateway;
use crate::error::AppError;
use crate::store::{Repository, StoreError};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Config,
    pub gateway: Arc<dyn SalesOrderGateway>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, config: Config, gateway: Arc<dyn SalesOrderGateway>) -> Self {
        Self {
            repo,
            config,
            gateway,
        }
    }

    /// Look up the acting user; an unknown id is a client error, not a 404.
    pub(crate) async fn viewer(&self, id: &str) -> Result<User, AppError> {
        self.repo
            .get_user(&UserId::new(id))
            .await
            .map_err(|e| match e {
                StoreError::UserNotFound(id) => AppError::BadRequest(format!("Unknown user {}", id)),
                other => other.into(),
            })
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/users", get(users::get_users))
        .route("/v1/users/:id/role", put(users::update_role))
        .route("/v1/deals", get(deals::get_deals))
        .route("/v1/deals/:id", get(deals::get_deal))
        .route("/v1/deals/:id/stage", put(deals::update_stage))
        .route(
            "/v1/deals/:id/exchange-rate-override",
            put(deals::set_exchange_rate_override),
        )
        .route("/v1/deals/:id/settlement", get(deals::get_settlement))
        .route("/v1/deals/:id/bid-council", get(bid_council::get_bid_council))
        .route(
            "/v1/deals/:id/approvals/:gate/toggle",
            post(bid_council::toggle_gate),
        )
        .route("/v1/deals/:id/sales-order", post(sales_orders::create_sales_order))
        .route("/v1/pipeline", get(pipeline::get_pipeline))
        .route("/v1/exchange-rates", get(exchange_rates::get_rates))
        .route("/v1/exchange-rates/:currency", put(exchange_rates::put_rate))
        .route("/v1/contacts", get(contacts::get_contacts))
        .layer(cors)
        .with_state(state)
}
