//! Balance summaries computed over a list of transactions.
//!
//! These functions assume the transactions were validated when they were
//! created, so they never fail.

use std::collections::HashMap;

use serde::Serialize;

use crate::transaction::{Transaction, TransactionId, TransactionType};

/// The totals shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Realized balance: paid income minus paid expenses.
    pub saldo_real: f64,
    /// Income that has not been received yet.
    pub a_receber: f64,
    /// Expenses that have not been paid yet.
    pub a_pagar: f64,
    /// Projected balance once every pending transaction is settled.
    pub saldo_previsto: f64,
}

/// Compute the [Summary] of `transactions` in a single pass.
pub fn calculate_summary(transactions: &[Transaction]) -> Summary {
    let mut paid_income = 0.0;
    let mut paid_expense = 0.0;
    let mut pending_income = 0.0;
    let mut pending_expense = 0.0;

    for transaction in transactions {
        let bucket = match (transaction.transaction_type, transaction.is_paid) {
            (TransactionType::Income, true) => &mut paid_income,
            (TransactionType::Expense, true) => &mut paid_expense,
            (TransactionType::Income, false) => &mut pending_income,
            (TransactionType::Expense, false) => &mut pending_expense,
        };

        *bucket += transaction.amount;
    }

    let saldo_real = paid_income - paid_expense;

    Summary {
        saldo_real,
        a_receber: pending_income,
        a_pagar: pending_expense,
        saldo_previsto: saldo_real + pending_income - pending_expense,
    }
}

/// The cumulative balance after each transaction, keyed by transaction ID.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DualRunningBalances {
    /// The running balance counting only paid transactions.
    pub saldo_real: HashMap<TransactionId, f64>,
    /// The running balance counting every transaction.
    pub saldo_previsto: HashMap<TransactionId, f64>,
}

/// Compute the running realized and projected balances in date order.
///
/// Transactions are sorted by date, oldest first. Transactions on the same
/// date keep the order they have in `transactions`. An unpaid transaction
/// carries the previous realized balance forward unchanged.
pub fn calculate_dual_running_balances(transactions: &[Transaction]) -> DualRunningBalances {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|transaction| transaction.date);

    let mut balances = DualRunningBalances {
        saldo_real: HashMap::with_capacity(sorted.len()),
        saldo_previsto: HashMap::with_capacity(sorted.len()),
    };
    let mut real = 0.0;
    let mut projected = 0.0;

    for transaction in sorted {
        let amount = transaction.signed_amount();

        projected += amount;
        if transaction.is_paid {
            real += amount;
        }

        balances.saldo_real.insert(transaction.id, real);
        balances.saldo_previsto.insert(transaction.id, projected);
    }

    balances
}
