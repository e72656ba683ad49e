use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::trace;

use super::amount::{
    ApproximateAmount, BaseUnits, ExactAmount, Precision, RoundingMode, TOKEN_DECIMALS,
};
use crate::error::{Error, Result};

/// Above this magnitude every f64 is an integer, so there is nothing left to round.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

/// Rounding configuration for a specific tick size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    pub price: Precision,
    pub size: Precision,
    pub amount: Precision,
}

impl RoundConfig {
    const fn new(price: u32, size: u32, amount: u32) -> Self {
        Self {
            price: Precision::from_digits(price),
            size: Precision::from_digits(size),
            amount: Precision::from_digits(amount),
        }
    }

    /// Look up the configuration for a market's minimum tick size
    pub fn for_tick_size(tick_size: Decimal) -> Result<RoundConfig> {
        ROUNDING_CONFIG
            .get(&tick_size)
            .copied()
            .ok_or_else(|| {
                Error::InvalidParameter(format!("unsupported tick size {}", tick_size))
            })
    }
}

/// Rounding configurations for different tick sizes
pub static ROUNDING_CONFIG: LazyLock<HashMap<Decimal, RoundConfig>> = LazyLock::new(|| {
    HashMap::from([
        (Decimal::new(1, 1), RoundConfig::new(1, 2, 3)),
        (Decimal::new(1, 2), RoundConfig::new(2, 2, 4)),
        (Decimal::new(1, 3), RoundConfig::new(3, 2, 5)),
        (Decimal::new(1, 4), RoundConfig::new(4, 2, 6)),
    ])
});

/// Truncate toward negative infinity at `sig_digits` fractional digits
pub fn round_down(x: f64, sig_digits: i64) -> Result<f64> {
    let precision = Precision::new(sig_digits)?;
    Ok(ApproximateAmount::new(x)?.round_down(precision).value())
}

/// Round to nearest at `sig_digits` fractional digits, ties to even on the scaled float
pub fn round_normal(x: f64, sig_digits: i64) -> Result<f64> {
    let precision = Precision::new(sig_digits)?;
    Ok(ApproximateAmount::new(x)?.round_normal(precision).value())
}

/// Round toward positive infinity at `sig_digits` fractional digits
pub fn round_up(x: f64, sig_digits: i64) -> Result<f64> {
    let precision = Precision::new(sig_digits)?;
    Ok(ApproximateAmount::new(x)?.round_up(precision).value())
}

pub fn round_down_decimal(x: Decimal, sig_digits: i64) -> Result<Decimal> {
    quantize_decimal(x, sig_digits, RoundingMode::Down)
}

pub fn round_normal_decimal(x: Decimal, sig_digits: i64) -> Result<Decimal> {
    quantize_decimal(x, sig_digits, RoundingMode::HalfEven)
}

pub fn round_up_decimal(x: Decimal, sig_digits: i64) -> Result<Decimal> {
    quantize_decimal(x, sig_digits, RoundingMode::Up)
}

/// Round `value` to `decimal_places` fractional digits and strip trailing zeros.
///
/// The result is canonical: `3.000000` becomes `3` and `3.140000` becomes
/// `3.14`. Order payloads are hashed and signed as text, so two numerically
/// equal amounts must also be textually equal.
pub fn quantize_decimal(
    value: Decimal,
    decimal_places: i64,
    mode: RoundingMode,
) -> Result<Decimal> {
    let precision = Precision::new(decimal_places)?;
    Ok(quantize(value, precision, mode))
}

/// Number of fractional digits in the shortest decimal form of `x`
pub fn decimal_places(x: f64) -> Result<u32> {
    Ok(ApproximateAmount::new(x)?.decimal_places())
}

/// Convert a human-scale amount into integer base units (`x * 10^6`).
///
/// The scaled value is always rounded half-to-even, so a product such as
/// `2999999.9999999995` still lands on `3000000` instead of being truncated.
/// Non-negativity is the caller's business, but a negative result cannot be
/// represented and is rejected.
pub fn to_token_decimals(x: f64) -> Result<BaseUnits> {
    let amount = ApproximateAmount::new(x)?;
    let scaled = amount.value() * 10f64.powi(TOKEN_DECIMALS as i32);
    let units = scaled.round_ties_even();
    if units != scaled {
        trace!(amount = x, scaled, units, "rounded fractional base units");
    }

    if units == 0.0 {
        return Ok(0);
    }
    if units < 0.0 {
        return Err(Error::InvalidParameter(format!(
            "negative amount {} has no base-unit representation",
            x
        )));
    }
    if units >= u64::MAX as f64 {
        return Err(Error::InvalidParameter(format!(
            "amount {} overflows base units",
            x
        )));
    }
    Ok(units as BaseUnits)
}

/// Fix amount rounding to ensure proper precision
///
/// Amounts only slightly over the allowed precision (float residue such as
/// `12.3455999999`) are first nudged up at four extra digits; anything still
/// too precise is cut down to the allowed digits.
pub fn fix_amount_rounding(amt: ExactAmount, round_config: &RoundConfig) -> ExactAmount {
    let allowed = round_config.amount;
    if amt.decimal_places() <= allowed.digits() {
        return amt;
    }

    let amt = amt.round_up(Precision::from_digits(allowed.digits() + 4));
    if amt.decimal_places() > allowed.digits() {
        amt.round_down(allowed)
    } else {
        amt
    }
}

pub(crate) fn quantize(value: Decimal, precision: Precision, mode: RoundingMode) -> Decimal {
    value
        .round_dp_with_strategy(precision.digits(), mode.strategy())
        .normalize()
}

pub(crate) fn shortest_fraction_len(x: f64) -> u32 {
    // f64's Display is the shortest round-trip form and never uses an exponent
    x.to_string()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len() as u32)
}

pub(crate) fn floor_f64(x: f64, precision: Precision) -> f64 {
    let scale = precision.float_scale();
    let scaled = x * scale;
    if is_settled(x, scaled, scale) {
        return x + 0.0;
    }

    let mut units = scaled.floor();
    if units / scale > x {
        units -= 1.0;
    }
    units / scale + 0.0
}

pub(crate) fn nearest_f64(x: f64, precision: Precision) -> f64 {
    let scale = precision.float_scale();
    let scaled = x * scale;
    if is_settled(x, scaled, scale) {
        return x + 0.0;
    }
    scaled.round_ties_even() / scale + 0.0
}

pub(crate) fn ceil_f64(x: f64, precision: Precision) -> f64 {
    let scale = precision.float_scale();
    let scaled = x * scale;
    if is_settled(x, scaled, scale) {
        return x + 0.0;
    }

    let mut units = scaled.ceil();
    if units / scale < x {
        units += 1.0;
    }
    units / scale + 0.0
}

/// `x` is already the float closest to a multiple of `1/scale`, or too large to matter.
fn is_settled(x: f64, scaled: f64, scale: f64) -> bool {
    if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_F64 {
        return true;
    }
    scaled.round() / scale == x
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_rounding_configs_exist() {
        assert!(ROUNDING_CONFIG.contains_key(&dec("0.1")));
        assert!(ROUNDING_CONFIG.contains_key(&dec("0.01")));
        assert!(ROUNDING_CONFIG.contains_key(&dec("0.001")));
        assert!(ROUNDING_CONFIG.contains_key(&dec("0.0001")));
    }

    #[test]
    fn test_round_config_lookup() {
        let config = RoundConfig::for_tick_size(dec("0.01")).unwrap();
        assert_eq!(config.price.digits(), 2);
        assert_eq!(config.size.digits(), 2);
        assert_eq!(config.amount.digits(), 4);
        assert!(matches!(
            RoundConfig::for_tick_size(dec("0.05")),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_float_rounding_modes() {
        assert_eq!(round_down(0.567, 2).unwrap(), 0.56);
        assert_eq!(round_normal(0.567, 2).unwrap(), 0.57);
        assert_eq!(round_up(0.561, 2).unwrap(), 0.57);
        assert_eq!(round_down(-0.561, 2).unwrap(), -0.57);
        assert_eq!(round_up(-0.567, 2).unwrap(), -0.56);
    }

    #[test]
    fn test_float_half_even_on_scaled_value() {
        // 0.125 * 100 is exactly 12.5
        assert_eq!(round_normal(0.125, 2).unwrap(), 0.12);
        assert_eq!(round_normal(0.375, 2).unwrap(), 0.38);
        // 2.675 * 100 lands exactly on 267.5
        assert_eq!(round_normal(2.675, 2).unwrap(), 2.68);
        // 1.005 * 100 is 100.49999999999999, just below the tie
        assert_eq!(round_normal(1.005, 2).unwrap(), 1.0);
    }

    #[test]
    fn test_zero_boundary() {
        for f in [round_down, round_normal, round_up] {
            let r = f(0.0, 6).unwrap();
            assert_eq!(r, 0.0);
            assert!(r.is_sign_positive());
            assert!(f(-0.0, 6).unwrap().is_sign_positive());
        }
        for f in [round_down_decimal, round_normal_decimal, round_up_decimal] {
            assert_eq!(f(Decimal::ZERO, 6).unwrap(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_ceiling_of_small_negative_is_positive_zero() {
        let r = round_up(-0.001, 2).unwrap();
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(round_down(1.0, -1), Err(Error::InvalidPrecision(-1))));
        assert!(matches!(
            round_up_decimal(dec("1"), -3),
            Err(Error::InvalidPrecision(-3))
        ));
        assert!(matches!(round_normal(f64::NAN, 2), Err(Error::NonFiniteInput(_))));
        assert!(matches!(to_token_decimals(f64::INFINITY), Err(Error::NonFiniteInput(_))));
        assert!(decimal_places(f64::NAN).is_err());
    }

    #[test]
    fn test_large_values_pass_through() {
        assert_eq!(round_down(1e300, 6).unwrap(), 1e300);
        assert_eq!(round_up(1e17, 2).unwrap(), 1e17);
    }

    #[test]
    fn test_trailing_zero_canonicalization() {
        let r = quantize_decimal(dec("2.500000"), 6, RoundingMode::HalfEven).unwrap();
        assert_eq!(r, dec("2.5"));
        assert_eq!(r.to_string(), "2.5");

        for mode in [RoundingMode::Down, RoundingMode::HalfEven, RoundingMode::Up] {
            let r = quantize_decimal(dec("3.000000"), 6, mode).unwrap();
            assert_eq!(r.to_string(), "3");
        }
        let r = quantize_decimal(dec("3.140000"), 6, RoundingMode::HalfEven).unwrap();
        assert_eq!(r.to_string(), "3.14");
        let r = quantize_decimal(dec("100.000000"), 6, RoundingMode::HalfEven).unwrap();
        assert_eq!(r.to_string(), "100");
    }

    #[test]
    fn test_half_even_tie_break() {
        assert_eq!(round_normal_decimal(dec("2.125"), 2).unwrap(), dec("2.12"));
        assert_eq!(round_normal_decimal(dec("2.135"), 2).unwrap(), dec("2.14"));
        assert_eq!(round_normal_decimal(dec("2.1251"), 2).unwrap(), dec("2.13"));
    }

    #[test]
    fn test_decimal_directed_rounding() {
        assert_eq!(round_down_decimal(dec("0.129999"), 2).unwrap().to_string(), "0.12");
        assert_eq!(round_up_decimal(dec("0.120001"), 2).unwrap().to_string(), "0.13");
        assert_eq!(round_down_decimal(dec("-0.121"), 2).unwrap().to_string(), "-0.13");
        assert_eq!(round_up_decimal(dec("-0.129"), 2).unwrap().to_string(), "-0.12");
        assert_eq!(round_up_decimal(dec("5"), 0).unwrap().to_string(), "5");
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places(1.5).unwrap(), 1);
        assert_eq!(decimal_places(3.0).unwrap(), 0);
        assert_eq!(decimal_places(0.0001).unwrap(), 4);
        assert_eq!(decimal_places(1e-7).unwrap(), 7);
        assert_eq!(decimal_places(1000000.5000000001).unwrap(), 10);
    }

    #[test]
    fn test_to_token_decimals() {
        assert_eq!(to_token_decimals(1.5).unwrap(), 1_500_000);
        assert_eq!(to_token_decimals(0.0001).unwrap(), 100);
        // 1.0000005 is stored slightly above the tie: 1000000.5000000001
        assert_eq!(to_token_decimals(1.0000005).unwrap(), 1_000_001);
        assert_eq!(to_token_decimals(0.1 + 0.2).unwrap(), 300_000);
        assert_eq!(to_token_decimals(0.0).unwrap(), 0);
        assert!(matches!(
            to_token_decimals(-1.0),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            to_token_decimals(1e20),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_decimal_to_token() {
        let amount = ExactAmount::new(dec("1.5"));
        assert_eq!(amount.to_base_units().unwrap(), 1_500_000);
    }

    #[test]
    fn test_fix_amount_rounding() {
        let config = RoundConfig::for_tick_size(dec("0.01")).unwrap();

        let within = ExactAmount::new(dec("12.3456"));
        assert_eq!(fix_amount_rounding(within, &config), within);

        // float residue is absorbed by the round-up at amount + 4 digits
        let residue = ExactAmount::new(dec("12.345599999999"));
        assert_eq!(fix_amount_rounding(residue, &config).to_string(), "12.3456");

        let residue = ExactAmount::new(dec("12.3400000001"));
        assert_eq!(fix_amount_rounding(residue, &config).to_string(), "12.34");

        let too_precise = ExactAmount::new(dec("12.345678"));
        assert_eq!(fix_amount_rounding(too_precise, &config).to_string(), "12.3456");
    }

    fn decimal_strategy() -> impl Strategy<Value = Decimal> {
        (-1_000_000_000_000i64..1_000_000_000_000i64, 0u32..12)
            .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
    }

    proptest! {
        #[test]
        fn prop_float_ordering(x in -1000.0f64..1000.0, d in 0i64..=8) {
            let down = round_down(x, d).unwrap();
            let up = round_up(x, d).unwrap();
            prop_assert!(down <= x, "{} > {}", down, x);
            prop_assert!(x <= up, "{} > {}", x, up);
        }

        #[test]
        fn prop_float_idempotent(x in -1000.0f64..1000.0, d in 0i64..=8) {
            for f in [round_down, round_normal, round_up] {
                let once = f(x, d).unwrap();
                prop_assert_eq!(f(once, d).unwrap(), once);
            }
        }

        #[test]
        fn prop_round_normal_bound(x in 0.0f64..1.0) {
            let r = round_normal(x, 2).unwrap();
            prop_assert!((r - x).abs() <= 0.005 + 1e-12);
        }

        #[test]
        fn prop_decimal_ordering_and_bound(x in decimal_strategy(), d in 0i64..=10) {
            let down = round_down_decimal(x, d).unwrap();
            let normal = round_normal_decimal(x, d).unwrap();
            let up = round_up_decimal(x, d).unwrap();
            prop_assert!(down <= x && x <= up);
            let half_step = Decimal::new(5, d as u32 + 1);
            prop_assert!((normal - x).abs() <= half_step);
        }

        #[test]
        fn prop_decimal_idempotent_and_canonical(x in decimal_strategy(), d in 0i64..=10) {
            for mode in [RoundingMode::Down, RoundingMode::HalfEven, RoundingMode::Up] {
                let once = quantize_decimal(x, d, mode).unwrap();
                let twice = quantize_decimal(once, d, mode).unwrap();
                prop_assert_eq!(once.to_string(), twice.to_string());
                prop_assert!(once.scale() <= d as u32);
                prop_assert_eq!(once.scale(), once.normalize().scale());
            }
        }
    }
}
