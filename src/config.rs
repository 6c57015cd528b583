use crate::engine::currency::{self, ExchangeRateTable};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub exchange_rates: ExchangeRateTable,
    pub seed_demo_data: bool,
    pub sales_order_latency_ms: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let seed_demo_data = match env_map
            .get("SEED_DEMO_DATA")
            .map(|s| s.as_str())
            .unwrap_or("true")
        {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                return Err(ConfigError::InvalidValue(
                    "SEED_DEMO_DATA".to_string(),
                    format!("must be true or false, got {}", other),
                ))
            }
        };

        let sales_order_latency_ms = env_map
            .get("SALES_ORDER_LATENCY_MS")
            .map(|s| s.as_str())
            .unwrap_or("0")
            .parse::<u64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "SALES_ORDER_LATENCY_MS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?;

        let exchange_rates = parse_exchange_rates_from_map(&env_map)?;

        Ok(Config {
            port,
            exchange_rates,
            seed_demo_data,
            sales_order_latency_ms,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            exchange_rates: ExchangeRateTable::with_defaults(),
            seed_demo_data: true,
            sales_order_latency_ms: 0,
        }
    }
}

/// `EXCHANGE_RATES` (`EUR=0.92,CLP=950`) wins over `EXCHANGE_RATES_FILE`
/// (one `CODE=RATE` per line, `#` comments). Neither set means defaults.
fn parse_exchange_rates_from_map(
    env_map: &HashMap<String, String>,
) -> Result<ExchangeRateTable, ConfigError> {
    if let Some(rates_str) = env_map.get("EXCHANGE_RATES") {
        parse_rate_entries("EXCHANGE_RATES", rates_str.split(','))
    } else if let Some(file_path) = env_map.get("EXCHANGE_RATES_FILE") {
        let content = std::fs::read_to_string(file_path).map_err(|_| {
            ConfigError::InvalidValue(
                "EXCHANGE_RATES_FILE".to_string(),
                "file not found or unreadable".to_string(),
            )
        })?;
        parse_rate_entries(
            "EXCHANGE_RATES_FILE",
            content.lines().filter(|line| !line.trim_start().starts_with('#')),
        )
    } else {
        Ok(ExchangeRateTable::with_defaults())
    }
}

fn parse_rate_entries<'a>(
    key: &str,
    entries: impl Iterator<Item = &'a str>,
) -> Result<ExchangeRateTable, ConfigError> {
    let mut table = ExchangeRateTable::new();
    for entry in entries.map(str::trim).filter(|s| !s.is_empty()) {
        let (code, rate) = entry.split_once('=').ok_or_else(|| {
            ConfigError::InvalidValue(key.to_string(), format!("expected CODE=RATE, got {}", entry))
        })?;
        let code = code.trim();
        if code.is_empty() {
            return Err(ConfigError::InvalidValue(
                key.to_string(),
                format!("missing currency code in {}", entry),
            ));
        }
        let rate = currency::parse_rate(code, rate)
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string()))?;
        table
            .set(code, rate)
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string()))?;
    }
    Ok(table)
}
