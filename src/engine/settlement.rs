//! Local-currency settlement quote for a deal.

use super::currency::{self, CurrencyError, ExchangeRateTable, RateSource};
use super::entity_resolver;
use crate::domain::{Deal, Decimal, EntityDescriptor};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementQuote {
    pub entity: EntityDescriptor,
    pub currency: &'static str,
    pub amount_usd: Decimal,
    pub rate: Decimal,
    pub rate_source: RateSource,
    pub local_amount: Decimal,
}

/// Resolve the deal's billing entity and convert its value into that
/// entity's currency, honouring the deal's rate override.
pub fn quote(deal: &Deal, rates: &ExchangeRateTable) -> Result<SettlementQuote, CurrencyError> {
    let entity = entity_resolver::resolve(&deal.country);
    let (rate, rate_source) =
        currency::effective_rate(entity.currency, rates, deal.exchange_rate_override)?;

    Ok(SettlementQuote {
        entity,
        currency: entity.currency,
        amount_usd: deal.value,
        rate,
        rate_source,
        local_amount: currency::apply_rate(deal.value, entity.currency, rate)?,
    })
}
