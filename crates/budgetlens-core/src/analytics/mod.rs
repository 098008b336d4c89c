//! Budget analytics
//!
//! Pure, stateless derivations over a period's facts:
//!
//! - **Aggregator** (`aggregate`) - category- and month-keyed sums
//! - **Comparator** (`compare`) - budgeted vs actual per budget
//! - **Summary Calculator** (`summarize`) - income, expenses, balance, savings rate
//!
//! The insight rules in `crate::insights` consume the output of all three.

pub mod aggregate;
pub mod compare;
pub mod summary;

pub use aggregate::{aggregate, Aggregation};
pub use compare::{compare, sort_by_category, BudgetStatus};
pub use summary::summarize;

use rust_decimal::Decimal;

/// `part / whole * 100`, or None when `whole` is not positive
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole <= Decimal::ZERO {
        return None;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}

/// Add `amount` into `total`, clamping at the Decimal range on overflow
pub(crate) fn accumulate(total: &mut Decimal, amount: Decimal) {
    match total.checked_add(amount) {
        Some(sum) => *total = sum,
        None => {
            tracing::warn!(total = %total, amount = %amount, "Amount sum overflowed, clamping");
            *total = total.saturating_add(amount);
        }
    }
}

/// Overflow-safe sum of amounts
pub(crate) fn total_of(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    let mut total = Decimal::ZERO;
    for amount in amounts {
        accumulate(&mut total, amount);
    }
    total
}
