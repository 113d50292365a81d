use thiserror::Error;

use crate::literal::LiteralKind;

/// Syntax errors raised while reading a literal. Offsets are byte positions in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("unexpected end of input at offset {offset}, expected {expected}")]
    UnexpectedEnd {
        offset: usize,
        expected: &'static str,
    },

    #[error("unexpected character '{found}' at offset {offset}, expected {expected}")]
    UnexpectedChar {
        offset: usize,
        found: char,
        expected: &'static str,
    },

    #[error("unknown name '{name}' at offset {offset}; only literals are allowed")]
    UnknownName { offset: usize, name: String },

    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { offset: usize, text: String },

    #[error("unterminated string starting at offset {offset}")]
    UnterminatedString { offset: usize },

    #[error("invalid escape sequence at offset {offset}: {message}")]
    InvalidEscape { offset: usize, message: String },

    #[error("literal nested deeper than {limit} levels at offset {offset}")]
    TooDeep { offset: usize, limit: usize },

    #[error("unexpected trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("malformed salary literal: {0}")]
    Syntax(#[from] LiteralError),

    #[error("salary value is expected to be a mapping, found {found}")]
    NotAMapping { found: LiteralKind },

    #[error("salary field '{field}' must be {expected}, found {found}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        found: LiteralKind,
    },
}
