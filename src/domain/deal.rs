//! The deal record and its line items.

use super::{Approvals, ContactId, DealId, Decimal, SalesOrderLink, Stage, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    #[default]
    Healthy,
    AtRisk,
    Critical,
}

/// Qualification notes. Display context only; nothing is computed from it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualification {
    pub metrics: String,
    pub economic_buyer: String,
    pub decision_criteria: String,
    pub decision_process: String,
    pub paper_process: String,
    pub identified_pain: String,
    pub champion: String,
    pub competition: String,
}

/// A priced order line. `tax_rate` is a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub sku: String,
    pub name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub tax_rate: Decimal,
}

impl LineItem {
    pub fn new(
        sku: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        unit_price: i64,
        tax_rate: i64,
    ) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            quantity: Decimal::from_i64(quantity),
            unit_price: Decimal::from_i64(unit_price),
            tax_rate: Decimal::from_i64(tax_rate),
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.quantity * self.unit_price
    }

    pub fn tax_amount(&self) -> Decimal {
        self.tax_rate.percent_of(self.subtotal())
    }

    pub fn total(&self) -> Decimal {
        self.subtotal() + self.tax_amount()
    }
}

/// A sales opportunity. `value` is always in USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: DealId,
    pub owner_id: UserId,
    pub title: String,
    pub company: String,
    pub country: String,
    pub value: Decimal,
    pub stage: Stage,
    pub probability: u8,
    pub contact_name: String,
    #[serde(default)]
    pub contact_ids: Vec<ContactId>,
    #[serde(default)]
    pub qualification: Qualification,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub health: HealthStatus,
    #[serde(default)]
    pub days_dormant: u32,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Units of the deal's settlement currency per USD. Shadows the global table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate_override: Option<Decimal>,
    #[serde(default)]
    pub approvals: Approvals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_order: Option<SalesOrderLink>,
}

impl Deal {
    pub fn new(
        id: impl Into<String>,
        owner_id: impl Into<String>,
        title: impl Into<String>,
        company: impl Into<String>,
        country: impl Into<String>,
        value: Decimal,
        stage: Stage,
    ) -> Self {
        Self {
            id: DealId::new(id),
            owner_id: UserId::new(owner_id),
            title: title.into(),
            company: company.into(),
            country: country.into(),
            value,
            stage,
            probability: 0,
            contact_name: String::new(),
            contact_ids: Vec::new(),
            qualification: Qualification::default(),
            tags: Vec::new(),
            health: HealthStatus::Healthy,
            days_dormant: 0,
            line_items: Vec::new(),
            exchange_rate_override: None,
            approvals: Approvals::new(),
            sales_order: None,
        }
    }

    pub fn with_contact(mut self, name: impl Into<String>, ids: &[&str]) -> Self {
        self.contact_name = name.into();
        self.contact_ids = ids.iter().map(|id| ContactId::new(*id)).collect();
        self
    }

    pub fn with_probability(mut self, probability: u8) -> Self {
        self.probability = probability.min(100);
        self
    }

    pub fn with_line_item(mut self, item: LineItem) -> Self {
        self.line_items.push(item);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_approvals(mut self, approvals: Approvals) -> Self {
        self.approvals = approvals;
        self
    }

    pub fn line_items_subtotal(&self) -> Decimal {
        self.line_items.iter().map(LineItem::subtotal).sum()
    }

    pub fn line_items_total(&self) -> Decimal {
        self.line_items.iter().map(LineItem::total).sum()
    }
}
