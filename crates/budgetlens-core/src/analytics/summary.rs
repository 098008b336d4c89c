//! Summary Calculator: top-level totals for a period

use rust_decimal::Decimal;

use crate::models::{Summary, Transaction};

use super::{accumulate, percent_of};

/// Fold transactions into income/expense totals, balance and savings rate
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let (mut total_income, mut total_expenses) = (Decimal::ZERO, Decimal::ZERO);
    for tx in transactions {
        if tx.is_income() {
            accumulate(&mut total_income, tx.amount);
        } else {
            accumulate(&mut total_expenses, tx.amount);
        }
    }

    let balance = total_income.saturating_sub(total_expenses);

    Summary {
        total_income,
        total_expenses,
        balance,
        transaction_count: transactions.len(),
        savings_rate: percent_of(balance, total_income),
    }
}
