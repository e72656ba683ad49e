//! # polymarket-clob
//!
//! A Rust client library for the Polymarket CLOB (Central Limit Order Book) API,
//! built around exact decimal handling of order prices and sizes.
//!
//! This library provides:
//! - Rounding and quantization of prices and sizes (down / half-even / up)
//! - Conversion of amounts into 6-decimal on-chain base units
//! - An explicitly owned HTTP transport and thin REST endpoints
//! - Query-string builders for the filtered listing endpoints
//!
//! ## Approximate vs exact amounts
//!
//! Human input usually arrives as `f64`, which cannot represent most decimal
//! fractions. [`ApproximateAmount`] wraps such values; [`ExactAmount`] wraps a
//! [`rust_decimal::Decimal`] and is what belongs in an order payload. The two
//! never convert implicitly:
//!
//! ```
//! use polymarket_clob::{ApproximateAmount, ExactAmount, Precision};
//!
//! # fn main() -> polymarket_clob::Result<()> {
//! let size = ApproximateAmount::new(0.1 + 0.2)?;
//! let size = ExactAmount::try_from(size)?.round_down(Precision::new(2)?);
//! assert_eq!(size.to_string(), "0.3");
//! assert_eq!(size.to_base_units()?, 300_000);
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod orders;
pub mod request;
pub mod types;

#[cfg(test)]
mod test_support;

pub use error::{Error, Result};
pub use types::{AssetType, ConditionId, OrderId, TokenId};

pub use client::ClobClient;
pub use config::ClientConfig;
pub use http::HttpClient;

pub use orders::{
    ApproximateAmount, BaseUnits, ExactAmount, Precision, RoundConfig, RoundingMode,
};
