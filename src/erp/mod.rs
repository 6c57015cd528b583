//! Sales-order gateway abstraction for the ERP integration.

use crate::domain::{Deal, Decimal, EntityDescriptor, SalesOrderLink};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub mod mock;

pub use mock::MockSalesOrderGateway;

/// Creates sales orders in the ERP ledger of a billing entity.
///
/// The returned link is opaque to the caller and stored on the deal as-is.
#[async_trait]
pub trait SalesOrderGateway: Send + Sync + fmt::Debug {
    /// Create a draft order for `deal` in `entity`'s ledger.
    ///
    /// # Arguments
    /// * `deal` - Deal being booked
    /// * `entity` - Resolved billing entity
    /// * `local_total` - Deal value converted into the entity currency
    async fn create_sales_order(
        &self,
        deal: &Deal,
        entity: &EntityDescriptor,
        local_total: Decimal,
    ) -> Result<SalesOrderLink, ErpError>;
}

/// Error type for ERP operations.
#[derive(Debug, Clone, Error)]
pub enum ErpError {
    /// Network error (e.g., connection timeout, DNS failure)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The ERP refused the order.
    #[error("Order rejected: {0}")]
    Rejected(String),
}
