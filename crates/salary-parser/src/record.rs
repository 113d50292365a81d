use crate::errors::RecordError;
use crate::literal::{parse_literal, Literal, LiteralKind};
use crate::model::{CurrencyCode, SalaryRecord};

/// Parses one salary cell such as `{'from': 100, 'to': 200, 'currency': 'USD', 'gross': True}`.
///
/// Keys other than `from`, `to`, `currency` and `gross` are ignored. A `None` value is
/// treated the same as an absent key.
pub fn parse_salary_record(content: &str) -> Result<SalaryRecord, RecordError> {
    let literal = parse_literal(content)?;
    SalaryRecord::try_from(&literal)
}

impl TryFrom<&Literal> for SalaryRecord {
    type Error = RecordError;

    fn try_from(value: &Literal) -> Result<Self, Self::Error> {
        if !matches!(value, Literal::Mapping(_)) {
            return Err(RecordError::NotAMapping {
                found: value.kind(),
            });
        }

        let from = optional_number(value, "from")?;
        let to = optional_number(value, "to")?;
        let currency = optional_string(value, "currency")?
            .map(CurrencyCode::new)
            .unwrap_or_default();
        let gross = optional_bool(value, "gross")?.unwrap_or(true);

        Ok(SalaryRecord {
            from,
            to,
            currency,
            gross,
        })
    }
}

fn present<'a>(record: &'a Literal, field: &'static str) -> Option<&'a Literal> {
    record.get(field).filter(|value| !value.is_none())
}

fn invalid(field: &'static str, expected: &'static str, found: LiteralKind) -> RecordError {
    RecordError::InvalidField {
        field,
        expected,
        found,
    }
}

fn optional_number(record: &Literal, field: &'static str) -> Result<Option<f64>, RecordError> {
    match present(record, field) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid(field, "a number", value.kind())),
    }
}

fn optional_string(record: &Literal, field: &'static str) -> Result<Option<String>, RecordError> {
    match present(record, field) {
        None => Ok(None),
        Some(Literal::Str(text)) => Ok(Some(text.clone())),
        Some(other) => Err(invalid(field, "a string", other.kind())),
    }
}

fn optional_bool(record: &Literal, field: &'static str) -> Result<Option<bool>, RecordError> {
    match present(record, field) {
        None => Ok(None),
        Some(Literal::Bool(flag)) => Ok(Some(*flag)),
        Some(other) => Err(invalid(field, "a boolean", other.kind())),
    }
}
