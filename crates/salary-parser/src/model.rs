use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency every salary is normalized to, and the one assumed when a record omits it.
pub const BASE_CURRENCY: &str = "RUB";

/// Currency code exactly as written in the source record. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn base() -> Self {
        Self(BASE_CURRENCY.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_base(&self) -> bool {
        self.0 == BASE_CURRENCY
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::base()
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One salary cell after parsing. Missing optional fields are already resolved to
/// their defaults: the base currency and a gross (pre-tax) figure.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryRecord {
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub currency: CurrencyCode,
    pub gross: bool,
}

impl SalaryRecord {
    pub fn new(
        from: Option<f64>,
        to: Option<f64>,
        currency: impl Into<CurrencyCode>,
        gross: bool,
    ) -> Self {
        Self {
            from,
            to,
            currency: currency.into(),
            gross,
        }
    }

    pub fn has_bounds(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}
