//! Plain-text rendering for the planning session. Each section builder
//! returns a complete string so output stays testable.

use std::collections::BTreeMap;

use compass_advisor::format_percent;
use compass_core::{Account, Bill, Loan, Transaction};

pub fn format_amount(v: f64) -> String {
    format!("${v:.2}")
}

pub fn accounts_section(accounts: &[Account]) -> String {
    let mut out = String::from("## Your accounts\n\n");
    if accounts.is_empty() {
        out.push_str("(none)\n\n");
        return out;
    }
    let width = accounts.iter().map(|a| a.name.len()).max().unwrap_or(0);
    for a in accounts {
        out.push_str(&format!(
            "  {:<width$}  {:>12}\n",
            a.name,
            format_amount(a.balance)
        ));
    }
    out.push('\n');
    out
}

/// Expects transactions already ordered for display (most recent first).
pub fn transactions_section(txns: &[&Transaction]) -> String {
    let mut out = String::from("## Recent transactions\n\n");
    if txns.is_empty() {
        out.push_str("(none)\n\n");
        return out;
    }
    for t in txns {
        out.push_str(&format!(
            "  {}  {:<10}  {:>10}  {}\n",
            t.date.format("%Y-%m-%d"),
            t.kind.label(),
            format_amount(t.amount),
            t.category_label()
        ));
    }
    out.push('\n');
    out
}

pub fn loans_section(loans: &[Loan]) -> String {
    let mut out = String::from("## Your loans\n\n");
    for l in loans {
        out.push_str(&format!(
            "  {}  {:>12} principal  {:>6.2}% interest\n",
            l.kind,
            format_amount(l.principal),
            l.interest_rate
        ));
    }
    out.push('\n');
    out
}

pub fn bills_section(bills: &[Bill]) -> String {
    let mut out = String::from("## Pending bills\n\n");
    for b in bills {
        out.push_str(&format!(
            "  {}  {:>10}  due {}\n",
            b.name,
            format_amount(b.amount),
            b.due_date.format("%Y-%m-%d")
        ));
    }
    out.push('\n');
    out
}

pub fn spending_section(spending: &BTreeMap<String, f64>) -> String {
    let mut out = String::from("## Your spending patterns\n\n");
    if spending.is_empty() {
        out.push_str("(no withdrawals recorded)\n\n");
        return out;
    }
    let width = spending.keys().map(String::len).max().unwrap_or(0);
    for (category, total) in spending {
        out.push_str(&format!(
            "  {:<width$}  {:>12}\n",
            category,
            format_amount(*total)
        ));
    }
    out.push('\n');
    out
}

pub fn savings_section(rate: f64) -> String {
    format!("## Your savings rate\n\n  {}\n\n", format_percent(rate))
}

/// `projected` is `None` when the ledger had no transactions to average.
pub fn projection_section(projected: Option<&[f64]>) -> String {
    let mut out = String::from("## Projected expenses\n\n");
    match projected {
        Some(months) => {
            for (i, amount) in months.iter().enumerate() {
                out.push_str(&format!("  Month {}: {:>10}\n", i + 1, format_amount(*amount)));
            }
        }
        None => out.push_str("  (not enough transaction history to project expenses)\n"),
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::TxnKind;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(918.0), "$918.00");
        assert_eq!(format_amount(-12.5), "$-12.50");
    }

    #[test]
    fn test_transactions_section_rows() {
        let t = Transaction {
            date: "2024-09-16".parse().unwrap(),
            amount: 50.0,
            kind: TxnKind::Withdrawal,
            category: Some("Food".to_string()),
        };
        let s = transactions_section(&[&t]);
        assert!(s.contains("2024-09-16"));
        assert!(s.contains("withdrawal"));
        assert!(s.contains("$50.00"));
        assert!(s.contains("Food"));
    }

    #[test]
    fn test_projection_section_fallback() {
        let s = projection_section(None);
        assert!(s.contains("not enough transaction history"));

        let s = projection_section(Some(&[918.0, 936.0, 954.0]));
        assert!(s.contains("Month 1"));
        assert!(s.contains("$954.00"));
    }

    #[test]
    fn test_empty_sections() {
        assert!(accounts_section(&[]).contains("(none)"));
        assert!(spending_section(&BTreeMap::new()).contains("no withdrawals"));
    }
}
