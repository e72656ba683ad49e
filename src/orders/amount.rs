use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::rounding;
use crate::error::{Error, Result};

/// Fixed granularity of on-chain token amounts (USDC and outcome tokens)
pub const TOKEN_DECIMALS: u32 = 6;

/// Integer amount in the token's smallest indivisible unit
pub type BaseUnits = u64;

/// Number of fractional digits to keep when quantizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(u32);

impl Precision {
    /// Largest scale a [`Decimal`] can carry
    pub const MAX_DIGITS: u32 = 28;

    /// Whole units, no fractional digits
    pub const INTEGER: Precision = Precision(0);

    /// Token granularity, see [`TOKEN_DECIMALS`]
    pub const TOKEN: Precision = Precision(TOKEN_DECIMALS);

    /// Validate a caller-supplied digit count
    pub fn new(digits: i64) -> Result<Self> {
        match u32::try_from(digits) {
            Ok(d) if d <= Self::MAX_DIGITS => Ok(Precision(d)),
            _ => Err(Error::InvalidPrecision(digits)),
        }
    }

    pub(crate) const fn from_digits(digits: u32) -> Self {
        Precision(digits)
    }

    pub fn digits(self) -> u32 {
        self.0
    }

    /// `10^digits` as a binary float
    pub(crate) fn float_scale(self) -> f64 {
        10f64.powi(self.0 as i32)
    }
}

impl TryFrom<i64> for Precision {
    type Error = Error;

    fn try_from(digits: i64) -> Result<Self> {
        Precision::new(digits)
    }
}

/// Rounding policy applied when a value has more digits than allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Toward negative infinity; unlike truncation, `-0.121` goes to `-0.13`
    Down,
    /// Nearest, ties to even
    #[default]
    HalfEven,
    /// Toward positive infinity
    Up,
}

impl RoundingMode {
    pub(crate) fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::Down => RoundingStrategy::ToNegativeInfinity,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
            RoundingMode::Up => RoundingStrategy::ToPositiveInfinity,
        }
    }
}

/// A finite binary floating-point amount as supplied by a human or UI.
///
/// Values of this type may carry representation error (`0.29` is stored as
/// `0.28999999999999998`), so they must be converted into an [`ExactAmount`]
/// before they are used for anything that ends up in a signed order.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ApproximateAmount(f64);

impl ApproximateAmount {
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::NonFiniteInput(value));
        }
        // -0.0 and 0.0 compare equal but print differently
        Ok(ApproximateAmount(value + 0.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn round_down(self, precision: Precision) -> Self {
        ApproximateAmount(rounding::floor_f64(self.0, precision))
    }

    pub fn round_normal(self, precision: Precision) -> Self {
        ApproximateAmount(rounding::nearest_f64(self.0, precision))
    }

    pub fn round_up(self, precision: Precision) -> Self {
        ApproximateAmount(rounding::ceil_f64(self.0, precision))
    }

    pub fn round(self, precision: Precision, mode: RoundingMode) -> Self {
        match mode {
            RoundingMode::Down => self.round_down(precision),
            RoundingMode::HalfEven => self.round_normal(precision),
            RoundingMode::Up => self.round_up(precision),
        }
    }

    /// Fractional digits in the shortest decimal string that round-trips
    pub fn decimal_places(self) -> u32 {
        rounding::shortest_fraction_len(self.0)
    }

    /// Scale by `10^6` and round half-to-even into base units
    pub fn to_token_decimals(self) -> Result<BaseUnits> {
        rounding::to_token_decimals(self.0)
    }
}

impl TryFrom<f64> for ApproximateAmount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        ApproximateAmount::new(value)
    }
}

impl From<ApproximateAmount> for f64 {
    fn from(amount: ApproximateAmount) -> f64 {
        amount.0
    }
}

impl fmt::Display for ApproximateAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An arbitrary-precision decimal amount, safe to place in an order payload.
///
/// Serializes as a string so no float ever sits between the value and the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExactAmount(Decimal);

impl ExactAmount {
    pub const ZERO: ExactAmount = ExactAmount(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        ExactAmount(value)
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn round_down(self, precision: Precision) -> Self {
        self.quantize(precision, RoundingMode::Down)
    }

    pub fn round_normal(self, precision: Precision) -> Self {
        self.quantize(precision, RoundingMode::HalfEven)
    }

    pub fn round_up(self, precision: Precision) -> Self {
        self.quantize(precision, RoundingMode::Up)
    }

    /// Round to `precision` digits and drop insignificant trailing zeros
    pub fn quantize(self, precision: Precision, mode: RoundingMode) -> Self {
        ExactAmount(rounding::quantize(self.0, precision, mode))
    }

    /// Fractional digits of the minimal representation (`1.50` has one)
    pub fn decimal_places(self) -> u32 {
        self.0.normalize().scale()
    }

    /// Scale by `10^6` and round half-to-even into base units
    pub fn to_base_units(self) -> Result<BaseUnits> {
        let scaled = self
            .0
            .checked_mul(Decimal::from(10u64.pow(TOKEN_DECIMALS)))
            .ok_or(Error::Decimal(rust_decimal::Error::ExceedsMaximumPossibleValue))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        if scaled.is_zero() {
            return Ok(0);
        }
        if scaled.is_sign_negative() {
            return Err(Error::InvalidParameter(format!(
                "negative amount {} has no base-unit representation",
                self.0
            )));
        }
        scaled.to_u64().ok_or_else(|| {
            Error::InvalidParameter(format!("amount {} overflows base units", self.0))
        })
    }

    /// Lossy conversion back to a binary float, for display or heuristics
    pub fn to_approximate(self) -> Result<ApproximateAmount> {
        let value = self.0.to_f64().ok_or_else(|| {
            Error::InvalidParameter(format!("{} is not representable as f64", self.0))
        })?;
        ApproximateAmount::new(value)
    }
}

impl From<Decimal> for ExactAmount {
    fn from(value: Decimal) -> Self {
        ExactAmount(value)
    }
}

impl From<ExactAmount> for Decimal {
    fn from(amount: ExactAmount) -> Decimal {
        amount.0
    }
}

/// Goes through the shortest round-trip string, so `0.1` becomes exactly `0.1`
/// rather than the binary expansion `0.1000000000000000055511151231257827`.
impl TryFrom<ApproximateAmount> for ExactAmount {
    type Error = Error;

    fn try_from(amount: ApproximateAmount) -> Result<Self> {
        if amount.decimal_places() > Precision::MAX_DIGITS {
            return Err(Error::InvalidParameter(format!(
                "{} needs more than {} fractional digits",
                amount.0,
                Precision::MAX_DIGITS
            )));
        }
        let value = Decimal::from_str(&amount.0.to_string()).map_err(|e| {
            Error::InvalidParameter(format!("{} is out of decimal range: {}", amount.0, e))
        })?;
        Ok(ExactAmount(value))
    }
}

impl FromStr for ExactAmount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(ExactAmount(Decimal::from_str(s)?))
    }
}

impl fmt::Display for ExactAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
