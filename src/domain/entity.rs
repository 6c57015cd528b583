//! Billing entities and the sales orders booked against them.

use super::Decimal;
use serde::{Deserialize, Serialize};

/// Legal/billing subsidiary that settles a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub region: &'static str,
    pub currency: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalesOrderStatus {
    Draft,
    Sent,
    Paid,
}

/// Confirmation returned by the ERP, stored verbatim on the deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderLink {
    pub sales_order_id: String,
    pub company_id: String,
    pub company_name: String,
    pub currency: String,
    pub total_local_currency: Decimal,
    pub status: SalesOrderStatus,
    pub url: String,
}
