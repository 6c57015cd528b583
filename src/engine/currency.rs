//! Exchange-rate table and USD conversion with per-deal overrides.

use crate::domain::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Currency every deal value is stored in. Its rate is implicitly 1.
pub const BASE_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("invalid exchange rate for {currency}: {reason}")]
    InvalidRate { currency: String, reason: String },
    #[error("converting {amount} USD to {currency} at {rate} overflows")]
    Overflow {
        currency: String,
        amount: Decimal,
        rate: Decimal,
    },
}

impl CurrencyError {
    fn invalid(currency: &str, reason: impl Into<String>) -> Self {
        CurrencyError::InvalidRate {
            currency: currency.to_string(),
            reason: reason.into(),
        }
    }
}

/// Which rate a conversion used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    Override,
    Table,
    Identity,
}

/// Units of a currency per 1 USD, keyed by upper-case currency code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExchangeRateTable {
    rates: BTreeMap<String, Decimal>,
}

impl ExchangeRateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in rates used when nothing is configured.
    pub fn with_defaults() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert("EUR".to_string(), Decimal::from_parts(92, 2));
        rates.insert("GBP".to_string(), Decimal::from_parts(79, 2));
        rates.insert("CLP".to_string(), Decimal::from_i64(950));
        rates.insert("MXN".to_string(), Decimal::from_parts(175, 1));
        rates.insert("COP".to_string(), Decimal::from_i64(3900));
        Self { rates }
    }

    /// Insert or replace a rate after validating it.
    pub fn set(&mut self, currency: &str, rate: Decimal) -> Result<(), CurrencyError> {
        let code = normalize_code(currency);
        validate_rate(&code, rate)?;
        self.rates.insert(code, rate);
        Ok(())
    }

    pub fn get(&self, currency: &str) -> Option<Decimal> {
        self.rates.get(&normalize_code(currency)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Rate that applies to `currency`, and where it came from.
///
/// The override wins, then the table entry, then the identity rate.
/// Whichever is chosen must be strictly positive.
pub fn effective_rate(
    currency: &str,
    table: &ExchangeRateTable,
    override_rate: Option<Decimal>,
) -> Result<(Decimal, RateSource), CurrencyError> {
    let (rate, source) = match (override_rate, table.get(currency)) {
        (Some(rate), _) => (rate, RateSource::Override),
        (None, Some(rate)) => (rate, RateSource::Table),
        (None, None) => return Ok((Decimal::one(), RateSource::Identity)),
    };
    validate_rate(currency, rate).map_err(|err| {
        tracing::warn!(currency, rate = %rate, ?source, "rejecting exchange rate");
        err
    })?;
    Ok((rate, source))
}

/// Convert a USD amount into `currency`.
pub fn convert(
    amount_usd: Decimal,
    currency: &str,
    table: &ExchangeRateTable,
    override_rate: Option<Decimal>,
) -> Result<Decimal, CurrencyError> {
    let (rate, _) = effective_rate(currency, table, override_rate)?;
    apply_rate(amount_usd, currency, rate)
}

/// `amount_usd * rate`, or [`CurrencyError::Overflow`] when the product
/// does not fit.
pub fn apply_rate(amount_usd: Decimal, currency: &str, rate: Decimal) -> Result<Decimal, CurrencyError> {
    amount_usd.checked_mul(rate).ok_or_else(|| {
        tracing::warn!(currency, amount = %amount_usd, rate = %rate, "conversion overflow");
        CurrencyError::Overflow {
            currency: currency.to_string(),
            amount: amount_usd,
            rate,
        }
    })
}

/// Parse a user-entered rate. Rejects text that is not a positive number.
pub fn parse_rate(currency: &str, input: &str) -> Result<Decimal, CurrencyError> {
    let rate = Decimal::from_str_canonical(input)
        .map_err(|_| CurrencyError::invalid(currency, format!("{input:?} is not a number")))?;
    validate_rate(currency, rate)?;
    Ok(rate)
}

/// Convert a float rate. Rejects NaN, infinities and non-positive values.
pub fn rate_from_f64(currency: &str, value: f64) -> Result<Decimal, CurrencyError> {
    let rate = Decimal::from_f64(value)
        .ok_or_else(|| CurrencyError::invalid(currency, format!("{value} is not finite")))?;
    validate_rate(currency, rate)?;
    Ok(rate)
}

fn validate_rate(currency: &str, rate: Decimal) -> Result<(), CurrencyError> {
    if rate.is_positive() {
        Ok(())
    } else {
        Err(CurrencyError::invalid(currency, format!("{rate} is not positive")))
    }
}

fn normalize_code(currency: &str) -> String {
    currency.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn eur_table() -> ExchangeRateTable {
        let mut table = ExchangeRateTable::new();
        table.set("EUR", d("0.9")).unwrap();
        table
    }

    #[test]
    fn test_table_rate() {
        assert_eq!(convert(d("1000"), "EUR", &eur_table(), None).unwrap(), d("900"));
    }

    #[test]
    fn test_override_wins() {
        assert_eq!(
            convert(d("1000"), "EUR", &eur_table(), Some(d("0.95"))).unwrap(),
            d("950")
        );
    }

    #[test]
    fn test_identity_for_usd_and_unknown_codes() {
        let table = eur_table();
        assert_eq!(convert(d("1000"), "USD", &table, None).unwrap(), d("1000"));
        assert_eq!(convert(d("1000"), "XYZ", &table, None).unwrap(), d("1000"));
        assert_eq!(
            effective_rate("USD", &table, None).unwrap(),
            (Decimal::one(), RateSource::Identity)
        );
    }

    #[test]
    fn test_override_applies_even_without_table_entry() {
        let (rate, source) = effective_rate("CLP", &eur_table(), Some(d("900"))).unwrap();
        assert_eq!(rate, d("900"));
        assert_eq!(source, RateSource::Override);
    }

    #[test]
    fn test_non_positive_override_rejected() {
        let table = eur_table();
        for bad in ["0", "-0.5"] {
            let err = convert(d("1000"), "EUR", &table, Some(d(bad))).unwrap_err();
            assert!(matches!(err, CurrencyError::InvalidRate { ref currency, .. } if currency == "EUR"));
        }
    }

    #[test]
    fn test_huge_rate_overflows_as_error() {
        let huge = d("79228162514264337593543950335");
        let err = convert(d("45000"), "GBP", &eur_table(), Some(huge)).unwrap_err();
        assert!(matches!(err, CurrencyError::Overflow { ref currency, .. } if currency == "GBP"));

        let mut table = ExchangeRateTable::new();
        table.set("CLP", huge).unwrap();
        assert!(matches!(
            convert(d("2"), "CLP", &table, None),
            Err(CurrencyError::Overflow { .. })
        ));
        // Fits once the amount is small enough.
        assert_eq!(convert(d("1"), "CLP", &table, None).unwrap(), huge);
    }

    #[test]
    fn test_set_rejects_non_positive() {
        let mut table = ExchangeRateTable::new();
        assert!(table.set("EUR", Decimal::zero()).is_err());
        assert!(table.get("EUR").is_none());
    }

    #[test]
    fn test_invalid_table_entry_rejected_at_conversion() {
        let table: ExchangeRateTable =
            serde_json::from_value(serde_json::json!({ "EUR": -1 })).unwrap();
        assert!(convert(d("1"), "EUR", &table, None).is_err());
    }

    #[test]
    fn test_codes_are_case_insensitive() {
        let mut table = ExchangeRateTable::new();
        table.set("eur", d("0.9")).unwrap();
        assert_eq!(table.get("EUR"), Some(d("0.9")));
        assert_eq!(convert(d("10"), "Eur", &table, None).unwrap(), d("9"));
    }

    #[test]
    fn test_parse_rate() {
        assert_eq!(parse_rate("EUR", " 0.95 ").unwrap(), d("0.95"));
        assert!(parse_rate("EUR", "abc").is_err());
        assert!(parse_rate("EUR", "").is_err());
        assert!(parse_rate("EUR", "0").is_err());
    }

    #[test]
    fn test_rate_from_f64() {
        assert_eq!(rate_from_f64("EUR", 0.5).unwrap(), d("0.5"));
        assert!(rate_from_f64("EUR", f64::NAN).is_err());
        assert!(rate_from_f64("EUR", f64::INFINITY).is_err());
        assert!(rate_from_f64("EUR", -2.0).is_err());
    }

    #[test]
    fn test_defaults_are_valid() {
        let table = ExchangeRateTable::with_defaults();
        assert_eq!(table.len(), 5);
        for (_, rate) in table.iter() {
            assert!(rate.is_positive());
        }
    }
}
