//! compass-core: ledger record types and the pure metrics engine

pub mod ledger;
pub mod metrics;

pub use ledger::{Account, Bill, Ledger, Loan, Transaction, TxnKind, UNCATEGORIZED};
pub use metrics::{
    project_future_expenses, savings_rate, spending_by_category, MetricsError, MetricsReport,
    DEFAULT_MONTHS_AHEAD,
};
