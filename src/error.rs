use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::engine::{CurrencyError, MarginError};
use crate::erp::ErpError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DealNotFound(_) | StoreError::UserNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            StoreError::SalesOrderExists(..) => AppError::Conflict(err.to_string()),
            StoreError::Currency(e) => e.into(),
        }
    }
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<MarginError> for AppError {
    fn from(err: MarginError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<ErpError> for AppError {
    fn from(err: ErpError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
