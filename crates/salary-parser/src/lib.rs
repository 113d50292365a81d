pub mod errors;
pub mod literal;
pub mod model;
mod record;

pub use errors::{LiteralError, RecordError};
pub use literal::{parse_literal, Literal, LiteralKind, MAX_NESTING_DEPTH};
pub use model::{CurrencyCode, SalaryRecord, BASE_CURRENCY};
pub use record::parse_salary_record;
