//! Bid-council margin computation.
//!
//! Licence cost is a fixed share of revenue; professional-services and
//! operations costs are entered by the reviewer. Deals whose margin clears
//! the auto-approval threshold get their finance gate approved
//! automatically (see [`super::approvals`]).

use crate::domain::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Licence share of revenue, 35%.
pub fn license_cost_rate() -> Decimal {
    Decimal::from_parts(35, 2)
}

/// Margin percentage that must be strictly exceeded for auto-approval.
pub const AUTO_APPROVAL_THRESHOLD_PCT: i64 = 30;

/// Margin percentage above which the margin is shown as healthy.
pub const HEALTHY_MARGIN_PCT: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarginError {
    #[error("margin is undefined for zero revenue")]
    ZeroRevenue,
    #[error("margin arithmetic overflowed: {0}")]
    Overflow(&'static str),
}

/// Cost breakdown and approval signal for one deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginBreakdown {
    pub revenue: Decimal,
    pub license_cost: Decimal,
    pub professional_services_cost: Decimal,
    pub operations_cost: Decimal,
    pub total_cost: Decimal,
    pub gross_margin: Decimal,
    /// Whole percent.
    pub margin_percent: Decimal,
    pub auto_approvable: bool,
}

impl MarginBreakdown {
    pub fn is_healthy(&self) -> bool {
        self.margin_percent > Decimal::from_i64(HEALTHY_MARGIN_PCT)
    }
}

/// Compute the margin for a deal's revenue and entered costs.
///
/// # Errors
/// [`MarginError::ZeroRevenue`] when `revenue` is zero, and
/// [`MarginError::Overflow`] when an intermediate amount does not fit.
pub fn compute(
    revenue: Decimal,
    professional_services_cost: Decimal,
    operations_cost: Decimal,
) -> Result<MarginBreakdown, MarginError> {
    if revenue.is_zero() {
        return Err(MarginError::ZeroRevenue);
    }
    let license_cost = revenue
        .checked_mul(license_cost_rate())
        .ok_or(MarginError::Overflow("license cost"))?
        .round_half_up();
    let total_cost = license_cost
        .checked_add(professional_services_cost)
        .and_then(|sum| sum.checked_add(operations_cost))
        .ok_or(MarginError::Overflow("total cost"))?;
    let gross_margin = revenue
        .checked_sub(total_cost)
        .ok_or(MarginError::Overflow("gross margin"))?;
    let margin_percent = gross_margin
        .checked_div(revenue)
        .and_then(|ratio| ratio.checked_mul(Decimal::hundred()))
        .ok_or(MarginError::Overflow("margin percent"))?
        .round_half_up();

    Ok(MarginBreakdown {
        revenue,
        license_cost,
        professional_services_cost,
        operations_cost,
        total_cost,
        gross_margin,
        margin_percent,
        auto_approvable: margin_percent > Decimal::from_i64(AUTO_APPROVAL_THRESHOLD_PCT),
    })
}

/// Cost figures the bid council starts from before anyone edits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub professional_services_cost: Decimal,
    pub operations_cost: Decimal,
}

/// 15% of deal value for professional services, 5% for operations, rounded.
pub fn default_costs(deal_value: Decimal) -> Result<CostEstimate, MarginError> {
    let share = |pct: i64, what: &'static str| {
        deal_value
            .checked_mul(Decimal::from_parts(pct, 2))
            .map(|cost| cost.round_half_up())
            .ok_or(MarginError::Overflow(what))
    };
    Ok(CostEstimate {
        professional_services_cost: share(15, "professional services estimate")?,
        operations_cost: share(5, "operations estimate")?,
    })
}
