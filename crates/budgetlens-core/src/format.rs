//! Fixed-precision rendering of decimals for insight text

use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero to `dp` places and always print `dp` digits.
///
/// `fixed(dec!(1200), 2)` is "1200.00", `fixed(dec!(84.5), 0)` is "85".
pub fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

/// Amount with a currency prefix and two decimals
pub fn money(symbol: &str, value: Decimal) -> String {
    format!("{}{}", symbol, fixed(value, 2))
}
