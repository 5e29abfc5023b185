//! The metrics engine: pure aggregations over a transaction list.
//!
//! All three operations read an immutable snapshot and hold no state, so
//! repeated calls over the same list return identical results.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::ledger::Transaction;

/// Months projected when the caller does not override the horizon.
pub const DEFAULT_MONTHS_AHEAD: usize = 3;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum MetricsError {
    /// The expense projection averages over the transaction count, so an
    /// empty list has no defined projection.
    #[error("not enough transaction history to project expenses")]
    InsufficientData,
}

/// Total withdrawn per category, in category order.
///
/// Deposits are ignored entirely; a category appears in the output only if a
/// withdrawal used it. Transactions without a category are summed under
/// [`crate::ledger::UNCATEGORIZED`].
pub fn spending_by_category(txns: &[Transaction]) -> BTreeMap<String, f64> {
    let mut by_category = BTreeMap::new();
    for t in txns {
        if t.is_withdrawal() {
            *by_category.entry(t.category_label().to_string()).or_insert(0.0) += t.amount;
        }
    }
    by_category
}

/// `(income - expenses) / income`, signed and unclamped.
///
/// Income is the deposit sum, expenses the withdrawal sum. Zero income
/// (including an empty list) yields exactly `0.0` rather than an error;
/// expenses above income yield a negative rate.
pub fn savings_rate(txns: &[Transaction]) -> f64 {
    let income: f64 = txns.iter().filter(|t| t.is_deposit()).map(|t| t.amount).sum();
    let expenses: f64 = txns.iter().filter(|t| t.is_withdrawal()).map(|t| t.amount).sum();
    if income > 0.0 {
        (income - expenses) / income
    } else {
        0.0
    }
}

/// Naive projection of the next `months_ahead` months of expenses.
///
/// The monthly baseline is `total withdrawals / transaction count * 30` —
/// the divisor is the full transaction count, deposits included, treating
/// the list as roughly one transaction per day. Each projected month grows
/// the baseline by a flat 2% per step. Not calendar-aware and not a
/// statistical forecast; callers rely on this exact formula.
pub fn project_future_expenses(
    txns: &[Transaction],
    months_ahead: usize,
) -> Result<Vec<f64>, MetricsError> {
    if txns.is_empty() {
        return Err(MetricsError::InsufficientData);
    }

    let total_expenses: f64 = txns.iter().filter(|t| t.is_withdrawal()).map(|t| t.amount).sum();
    let avg_monthly_expense = total_expenses / txns.len() as f64 * 30.0;

    Ok((1..=months_ahead)
        .map(|i| avg_monthly_expense * (1.0 + 0.02 * i as f64))
        .collect())
}

/// All metrics for one snapshot, computed together for rendering and
/// prompt building.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsReport {
    pub spending_by_category: BTreeMap<String, f64>,
    pub savings_rate: f64,
    /// `None` when the snapshot had no transactions to average over.
    pub projected_expenses: Option<Vec<f64>>,
}

impl MetricsReport {
    pub fn for_transactions(txns: &[Transaction], months_ahead: usize) -> Self {
        Self {
            spending_by_category: spending_by_category(txns),
            savings_rate: savings_rate(txns),
            projected_expenses: project_future_expenses(txns, months_ahead).ok(),
        }
    }
}
