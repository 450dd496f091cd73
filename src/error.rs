use thiserror::Error;

/// Errors that can occur while encoding a number into numeral text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("`{0}` is not a valid decimal number")]
    InvalidNumber(String),
}

/// Errors that can occur while decoding numeral text back into a number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("`{0}` is not valid capitalized numeral text")]
    InvalidNumeralText(String),
}

/// Result type for encoding operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;
