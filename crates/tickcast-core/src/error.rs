use thiserror::Error;

/// Validation and contract errors exposed by `tickcast-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp could not be parsed: '{value}'")]
    InvalidTimestamp { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be positive")]
    NonPositiveValue { field: &'static str },

    #[error("price point high must be >= low")]
    InvalidPriceRange,
    #[error("price point open/close must be within high/low range")]
    InvalidPriceBounds,

    #[error("price series dates must be strictly increasing at index {index}")]
    UnorderedSeries { index: usize },

    #[error("sentiment value must be within [-1, 1]: {value}")]
    SentimentOutOfRange { value: f64 },
}
