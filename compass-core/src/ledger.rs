//! Ledger record types: one user's simulated financial snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display label applied when a transaction carries no category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A named account with its current balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub name: String,
    pub balance: f64,
}

/// The two transaction kinds. Only withdrawals count toward spending.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TxnKind {
    #[serde(rename = "deposit")]
    Deposit,
    #[serde(rename = "withdrawal")]
    Withdrawal,
}

impl TxnKind {
    /// Wire/display label for this kind.
    pub fn label(&self) -> &'static str {
        match self {
            TxnKind::Deposit => "deposit",
            TxnKind::Withdrawal => "withdrawal",
        }
    }
}

/// A single ledger movement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Non-negative; direction comes from `kind`.
    pub amount: f64,
    pub kind: TxnKind,
    /// Free-form label assigned by the simulator.
    pub category: Option<String>,
}

impl Transaction {
    pub fn is_deposit(&self) -> bool {
        self.kind == TxnKind::Deposit
    }

    pub fn is_withdrawal(&self) -> bool {
        self.kind == TxnKind::Withdrawal
    }

    /// Category label with the [`UNCATEGORIZED`] default applied.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

/// An outstanding loan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Loan {
    /// Label like "Personal Loan" or "Car Loan".
    pub kind: String,
    pub principal: f64,
    /// Annual rate as a percentage (5.5 means 5.5%).
    pub interest_rate: f64,
}

/// A pending bill.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub name: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

/// The complete snapshot for one planning session: four independent lists
/// with no cross-references, treated as immutable once received.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Ledger {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub loans: Vec<Loan>,
    pub bills: Vec<Bill>,
}

impl Ledger {
    /// Most recent transactions first, capped at `limit`.
    pub fn recent_transactions(&self, limit: usize) -> Vec<&Transaction> {
        let mut txns: Vec<&Transaction> = self.transactions.iter().collect();
        txns.sort_by(|a, b| b.date.cmp(&a.date));
        txns.truncate(limit);
        txns
    }
}
