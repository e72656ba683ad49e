mod amount;
mod rounding;

pub use amount::{
    ApproximateAmount, BaseUnits, ExactAmount, Precision, RoundingMode, TOKEN_DECIMALS,
};
pub use rounding::{
    decimal_places, fix_amount_rounding, quantize_decimal, round_down, round_down_decimal,
    round_normal, round_normal_decimal, round_up, round_up_decimal, to_token_decimals,
    RoundConfig, ROUNDING_CONFIG,
};
