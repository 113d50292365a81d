use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use salary_parser::CurrencyCode;
use serde::Deserialize;

use crate::error::{PipelineError, Result};

/// Share of a gross salary left after the flat income-tax approximation.
pub const DEFAULT_NET_RATIO: f64 = 0.87;

pub const USD_TO_RUB: f64 = 56.2996;
pub const EUR_TO_RUB: f64 = 57.921;
pub const KZT_TO_RUB: f64 = 100.0 / 13.5040;

/// Net ratio and exchange rates applied by the salary processor.
///
/// Loaded from TOML:
///
/// ```toml
/// net_ratio = 0.87
///
/// [rates]
/// USD = 56.2996
/// EUR = 57.921
/// ```
///
/// Omitted keys keep their defaults. A `[rates]` table replaces the built-in one
/// entirely, so a currency missing from it is passed through unconverted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    pub net_ratio: f64,
    pub rates: BTreeMap<CurrencyCode, f64>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        let rates = BTreeMap::from([
            (CurrencyCode::new("USD"), USD_TO_RUB),
            (CurrencyCode::new("EUR"), EUR_TO_RUB),
            (CurrencyCode::new("KZT"), KZT_TO_RUB),
        ]);
        Self {
            net_ratio: DEFAULT_NET_RATIO,
            rates,
        }
    }
}

impl ConversionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.net_ratio.is_finite() || self.net_ratio <= 0.0 || self.net_ratio > 1.0 {
            return Err(PipelineError::Config(format!(
                "net_ratio must be in (0, 1], got {}",
                self.net_ratio
            )));
        }

        for (currency, rate) in &self.rates {
            if currency.is_base() {
                return Err(PipelineError::Config(format!(
                    "rate given for base currency {currency}"
                )));
            }
            if !rate.is_finite() || *rate <= 0.0 {
                return Err(PipelineError::Config(format!(
                    "rate for {currency} must be a positive number, got {rate}"
                )));
            }
        }

        Ok(())
    }

    pub fn rate_for(&self, currency: &CurrencyCode) -> Option<f64> {
        self.rates.get(currency).copied()
    }

    /// Multiplier turning a stated figure into a net one.
    pub fn net_multiplier(&self, gross: bool) -> f64 {
        if gross {
            self.net_ratio
        } else {
            1.0
        }
    }
}
