//! Mock ERP that books draft orders locally.

use super::{ErpError, SalesOrderGateway};
use crate::domain::{Deal, Decimal, EntityDescriptor, SalesOrderLink, SalesOrderStatus};
use async_trait::async_trait;
use std::time::Duration;

const ORDER_URL: &str =
    "https://odoo.com/web#cids=1&menu_id=1&action=123&model=sale.order&view_type=form";

/// Mock gateway returning DRAFT orders numbered `SO-10000`..`SO-99999`.
#[derive(Debug, Clone, Default)]
pub struct MockSalesOrderGateway {
    latency: Duration,
    reject_with: Option<String>,
}

impl MockSalesOrderGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated round-trip delay before each confirmation.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every request fail with [`ErpError::Rejected`].
    pub fn rejecting(mut self, reason: impl Into<String>) -> Self {
        self.reject_with = Some(reason.into());
        self
    }
}

fn order_number() -> u32 {
    let raw = uuid::Uuid::new_v4().as_u128();
    10_000 + (raw % 90_000) as u32
}

#[async_trait]
impl SalesOrderGateway for MockSalesOrderGateway {
    async fn create_sales_order(
        &self,
        deal: &Deal,
        entity: &EntityDescriptor,
        local_total: Decimal,
    ) -> Result<SalesOrderLink, ErpError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if let Some(reason) = &self.reject_with {
            return Err(ErpError::Rejected(reason.clone()));
        }

        let link = SalesOrderLink {
            sales_order_id: format!("SO-{}", order_number()),
            company_id: entity.id.to_string(),
            company_name: entity.name.to_string(),
            currency: entity.currency.to_string(),
            total_local_currency: local_total,
            status: SalesOrderStatus::Draft,
            url: ORDER_URL.to_string(),
        };
        tracing::info!(deal = %deal.id, order = %link.sales_order_id, entity = entity.id, "mock sales order created");
        Ok(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stage;
    use crate::engine::entity_resolver;

    fn deal() -> Deal {
        Deal::new("4", "u1", "License", "Umbrella", "Germany", Decimal::from_i64(1000), Stage::Negotiating)
    }

    #[test]
    fn test_order_number_range() {
        for _ in 0..1000 {
            let n = order_number();
            assert!((10_000..=99_999).contains(&n));
        }
    }

    #[test]
    fn test_creates_draft_order_for_entity() {
        let gateway = MockSalesOrderGateway::new();
        let entity = entity_resolver::EUROPE;
        let link = tokio_test::block_on(gateway.create_sales_order(
            &deal(),
            &entity,
            Decimal::from_i64(920),
        ))
        .unwrap();

        assert!(link.sales_order_id.starts_with("SO-"));
        assert_eq!(link.sales_order_id.len(), 8);
        assert_eq!(link.company_id, "EU-03");
        assert_eq!(link.currency, "EUR");
        assert_eq!(link.total_local_currency, Decimal::from_i64(920));
        assert_eq!(link.status, SalesOrderStatus::Draft);
    }

    #[test]
    fn test_rejecting_gateway() {
        let gateway = MockSalesOrderGateway::new().rejecting("ledger closed");
        let result = tokio_test::block_on(gateway.create_sales_order(
            &deal(),
            &entity_resolver::EUROPE,
            Decimal::zero(),
        ));
        assert!(matches!(result, Err(ErpError::Rejected(ref r)) if r == "ledger closed"));
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let gateway = MockSalesOrderGateway::new().with_latency(Duration::from_millis(20));
        let started = std::time::Instant::now();
        gateway
            .create_sales_order(&deal(), &entity_resolver::ASIA_PACIFIC, Decimal::zero())
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
