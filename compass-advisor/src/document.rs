//! Parse the simulated ledger document into typed records.
//!
//! The simulator replies with one JSON object, but chat models wrap it in
//! code fences, lead with prose, or drop whole sections. Parsing is lenient
//! about the framing and strict about the contents: a missing section or a
//! malformed field rejects the whole document.

use chrono::NaiveDate;
use compass_core::{Account, Bill, Ledger, Loan, Transaction, TxnKind};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MalformedLedger {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document is missing the `{0}` list")]
    MissingSection(&'static str),

    #[error("{section}[{index}]: {reason}")]
    InvalidRecord {
        section: &'static str,
        index: usize,
        reason: String,
    },
}

fn invalid(section: &'static str, index: usize, reason: impl Into<String>) -> MalformedLedger {
    MalformedLedger::InvalidRecord {
        section,
        index,
        reason: reason.into(),
    }
}

/// Loosely-typed mirror of the document: everything optional, validated
/// before anything becomes a [`Ledger`].
#[derive(Debug, Deserialize)]
struct RawDocument {
    accounts: Option<Vec<RawAccount>>,
    transactions: Option<Vec<RawTransaction>>,
    loans: Option<Vec<RawLoan>>,
    bills: Option<Vec<RawBill>>,
}

#[derive(Debug, Deserialize)]
struct RawAccount {
    name: Option<String>,
    balance: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    date: Option<String>,
    amount: Option<f64>,
    kind: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLoan {
    kind: Option<String>,
    principal: Option<f64>,
    interest_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawBill {
    name: Option<String>,
    amount: Option<f64>,
    due_date: Option<String>,
}

/// Parse and validate a simulated ledger document.
///
/// Fails closed: every record of every section must be well-formed, and all
/// four sections must be present (empty lists are fine).
pub fn parse_ledger_document(text: &str) -> Result<Ledger, MalformedLedger> {
    let raw: RawDocument = serde_json::from_str(extract_object(text))?;

    let accounts = raw
        .accounts
        .ok_or(MalformedLedger::MissingSection("accounts"))?
        .into_iter()
        .enumerate()
        .map(|(i, a)| validate_account(i, a))
        .collect::<Result<Vec<_>, _>>()?;

    let transactions = raw
        .transactions
        .ok_or(MalformedLedger::MissingSection("transactions"))?
        .into_iter()
        .enumerate()
        .map(|(i, t)| validate_transaction(i, t))
        .collect::<Result<Vec<_>, _>>()?;

    let loans = raw
        .loans
        .ok_or(MalformedLedger::MissingSection("loans"))?
        .into_iter()
        .enumerate()
        .map(|(i, l)| validate_loan(i, l))
        .collect::<Result<Vec<_>, _>>()?;

    let bills = raw
        .bills
        .ok_or(MalformedLedger::MissingSection("bills"))?
        .into_iter()
        .enumerate()
        .map(|(i, b)| validate_bill(i, b))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Ledger {
        accounts,
        transactions,
        loans,
        bills,
    })
}

/// Take the outermost `{...}` span, which also strips ```json fences and
/// any prose around the object.
fn extract_object(text: &str) -> &str {
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if end >= start => &text[start..=end],
        _ => text,
    }
}

fn validate_account(index: usize, raw: RawAccount) -> Result<Account, MalformedLedger> {
    let name = required_str("accounts", index, "name", raw.name)?;
    let balance = required_finite("accounts", index, "balance", raw.balance)?;
    Ok(Account { name, balance })
}

fn validate_transaction(index: usize, raw: RawTransaction) -> Result<Transaction, MalformedLedger> {
    let date = required_date("transactions", index, "date", raw.date)?;
    let amount = required_non_negative("transactions", index, "amount", raw.amount)?;
    let kind = match required_str("transactions", index, "kind", raw.kind)?.as_str() {
        "deposit" => TxnKind::Deposit,
        "withdrawal" => TxnKind::Withdrawal,
        other => {
            return Err(invalid(
                "transactions",
                index,
                format!("unknown kind `{other}` (expected `deposit` or `withdrawal`)"),
            ));
        }
    };

    // A blank category is the same as no category.
    let category = raw.category.filter(|c| !c.trim().is_empty());

    Ok(Transaction {
        date,
        amount,
        kind,
        category,
    })
}

fn validate_loan(index: usize, raw: RawLoan) -> Result<Loan, MalformedLedger> {
    let kind = required_str("loans", index, "kind", raw.kind)?;
    let principal = required_non_negative("loans", index, "principal", raw.principal)?;
    let interest_rate = required_non_negative("loans", index, "interest_rate", raw.interest_rate)?;
    Ok(Loan {
        kind,
        principal,
        interest_rate,
    })
}

fn validate_bill(index: usize, raw: RawBill) -> Result<Bill, MalformedLedger> {
    let name = required_str("bills", index, "name", raw.name)?;
    let amount = required_non_negative("bills", index, "amount", raw.amount)?;
    let due_date = required_date("bills", index, "due_date", raw.due_date)?;
    Ok(Bill {
        name,
        amount,
        due_date,
    })
}

fn required_str(
    section: &'static str,
    index: usize,
    field: &str,
    value: Option<String>,
) -> Result<String, MalformedLedger> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        Some(_) => Err(invalid(section, index, format!("`{field}` is empty"))),
        None => Err(invalid(section, index, format!("missing `{field}`"))),
    }
}

fn required_finite(
    section: &'static str,
    index: usize,
    field: &str,
    value: Option<f64>,
) -> Result<f64, MalformedLedger> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(invalid(section, index, format!("`{field}` is not finite: {v}"))),
        None => Err(invalid(section, index, format!("missing `{field}`"))),
    }
}

fn required_non_negative(
    section: &'static str,
    index: usize,
    field: &str,
    value: Option<f64>,
) -> Result<f64, MalformedLedger> {
    let v = required_finite(section, index, field, value)?;
    if v < 0.0 {
        return Err(invalid(section, index, format!("`{field}` must be non-negative, got {v}")));
    }
    Ok(v)
}

fn required_date(
    section: &'static str,
    index: usize,
    field: &str,
    value: Option<String>,
) -> Result<NaiveDate, MalformedLedger> {
    let s = required_str(section, index, field, value)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|_| invalid(section, index, format!("invalid `{field}` `{s}` (expected YYYY-MM-DD)")))
}
