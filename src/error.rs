use std::fmt;

/// Result type for polymarket-clob operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for polymarket-clob
#[derive(Debug)]
pub enum Error {
    /// HTTP request failed
    Http(reqwest::Error),

    /// JSON serialization/deserialization failed
    Json(serde_json::Error),

    /// Invalid configuration
    Config(String),

    /// Invalid parameter
    InvalidParameter(String),

    /// API error response
    Api { status: u16, message: String },

    /// Decimal conversion error
    Decimal(rust_decimal::Error),

    /// Fractional digit count outside the supported range
    InvalidPrecision(i64),

    /// NaN or infinite amount
    NonFiniteInput(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "HTTP error: {}", e),
            Error::Json(e) => write!(f, "JSON error: {}", e),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            Error::Decimal(e) => write!(f, "Decimal error: {}", e),
            Error::InvalidPrecision(digits) => write!(
                f,
                "Invalid precision: {} fractional digits (expected 0..={})",
                digits,
                crate::orders::Precision::MAX_DIGITS
            ),
            Error::NonFiniteInput(value) => write!(f, "Non-finite amount: {}", value),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Decimal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Decimal(err)
    }
}

impl From<reqwest::header::InvalidHeaderValue> for Error {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Error::Config(format!("invalid header value: {}", err))
    }
}
