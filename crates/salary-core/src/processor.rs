use std::collections::BTreeMap;

use polars::prelude::{DataFrame, NamedFrom, Series};
use salary_parser::{parse_salary_record, CurrencyCode, SalaryRecord};
use tracing::{debug, warn};

use crate::config::ConversionConfig;
use crate::error::{PipelineError, Result};
use crate::table::{INDEX_COLUMN, SALARY_COLUMN};

/// Row counts gathered while normalizing a salary column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingSummary {
    pub input_rows: usize,
    /// Rows whose salary cell was missing or blank.
    pub dropped_rows: usize,
    pub output_rows: usize,
    /// Rows kept with a null salary because neither `from` nor `to` was given.
    pub rows_without_bounds: usize,
    /// Non-base currencies with no configured rate, left unconverted.
    pub unconverted_currencies: BTreeMap<CurrencyCode, usize>,
}

#[derive(Debug, Clone)]
pub struct ProcessedSalaries {
    pub frame: DataFrame,
    pub summary: ProcessingSummary,
}

/// Turns raw salary records into one net, base-currency figure per row.
#[derive(Debug, Clone, Default)]
pub struct SalaryProcessor {
    config: ConversionConfig,
}

impl SalaryProcessor {
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Net midpoint of the record converted to the base currency, or `None` when the
    /// record carries neither bound.
    pub fn normalize(&self, record: &SalaryRecord) -> Option<f64> {
        let multiplier = self.config.net_multiplier(record.gross);
        let net_from = record.from.map(|value| value * multiplier);
        let net_to = record.to.map(|value| value * multiplier);

        let mid = midpoint(net_from, net_to)?;
        match self.config.rate_for(&record.currency) {
            Some(rate) => Some(mid * rate),
            None => Some(mid),
        }
    }

    /// Normalizes the `salary` column of `df`, keyed by its `index` column.
    ///
    /// Rows with a missing salary are dropped. The first cell that fails to parse
    /// aborts the whole run.
    pub fn process(&self, df: &DataFrame) -> Result<ProcessedSalaries> {
        let len = df.height();
        let index = df.column(INDEX_COLUMN)?.i64()?;
        let salary = df.column(SALARY_COLUMN)?.str()?;

        let mut summary = ProcessingSummary {
            input_rows: len,
            ..ProcessingSummary::default()
        };
        let mut out_index: Vec<i64> = Vec::with_capacity(len);
        let mut out_salary: Vec<Option<f64>> = Vec::with_capacity(len);

        for idx in 0..len {
            let (Some(row_index), Some(raw)) = (index.get(idx), salary.get(idx)) else {
                summary.dropped_rows += 1;
                continue;
            };
            if raw.trim().is_empty() {
                summary.dropped_rows += 1;
                continue;
            }

            let record = parse_salary_record(raw).map_err(|source| PipelineError::Format {
                index: row_index,
                source,
            })?;

            if !record.has_bounds() {
                summary.rows_without_bounds += 1;
            } else if !record.currency.is_base()
                && self.config.rate_for(&record.currency).is_none()
            {
                *summary
                    .unconverted_currencies
                    .entry(record.currency.clone())
                    .or_default() += 1;
            }

            out_index.push(row_index);
            out_salary.push(self.normalize(&record));
        }

        summary.output_rows = out_index.len();

        debug!(
            input_rows = summary.input_rows,
            dropped_rows = summary.dropped_rows,
            rows_without_bounds = summary.rows_without_bounds,
            "Normalized salary column"
        );
        if !summary.unconverted_currencies.is_empty() {
            warn!(
                currencies = ?summary.unconverted_currencies,
                "Salaries in currencies without a configured rate were left unconverted"
            );
        }

        let frame = DataFrame::new(vec![
            Series::new(INDEX_COLUMN.into(), out_index).into(),
            Series::new(SALARY_COLUMN.into(), out_salary).into(),
        ])?;

        Ok(ProcessedSalaries { frame, summary })
    }
}

/// Mean of whichever bounds are present.
pub fn midpoint(lower: Option<f64>, upper: Option<f64>) -> Option<f64> {
    match (lower, upper) {
        (Some(a), Some(b)) => Some((a + b) / 2.0),
        (Some(value), None) | (None, Some(value)) => Some(value),
        (None, None) => None,
    }
}
