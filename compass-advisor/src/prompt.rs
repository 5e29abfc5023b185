//! Prompt builders for the two collaborator calls: simulating a ledger and
//! generating advice on top of it.
//!
//! These are plain string builders. Given the same ledger, metrics, and goal
//! they produce byte-identical output — the spending map iterates in
//! category order and nothing here reads a clock or an environment.

use std::collections::BTreeMap;

use compass_core::Ledger;

/// System prompt for the ledger-simulation call.
pub const SIMULATOR_SYSTEM_PROMPT: &str = "You are a precise and realistic financial data \
     simulator. You must reply with a single valid JSON object and nothing else.";

/// System prompt for plan generation and follow-up questions.
pub const ADVISOR_SYSTEM_PROMPT: &str = "You are a professional, expert financial advisor.";

/// Savings rate as a two-decimal percentage string, e.g. `40.00%`.
pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

/// Request a simulated ledger document for `user_id`.
///
/// The example object in the prompt is the document contract
/// [`crate::document::parse_ledger_document`] validates against.
pub fn simulation_prompt(user_id: &str) -> String {
    format!(
        r#"Simulate detailed financial data for a user with id {user_id}. Include:
1. A list of accounts (at least 2) with balances.
2. A list of recent transactions (at least 10) with dates, amounts, kinds (deposit or withdrawal) and categories.
3. A list of loans (if any) with principals and interest rates.
4. A list of pending bills with due dates.

Reply with a single JSON object in exactly this shape, substituting simulated names, dates, balances and amounts of your own:
{{
    "accounts": [
        {{"name": "Checking Account", "balance": 100.0}},
        {{"name": "Savings Account", "balance": 390.0}}
    ],
    "transactions": [
        {{"date": "2023-09-15", "amount": 500.0, "kind": "deposit", "category": "Salary"}},
        {{"date": "2023-09-16", "amount": 50.0, "kind": "withdrawal", "category": "Food"}}
    ],
    "loans": [
        {{"kind": "Personal Loan", "principal": 10000.0, "interest_rate": 5.5}}
    ],
    "bills": [
        {{"name": "Electricity", "amount": 200.0, "due_date": "2023-09-30"}}
    ]
}}"#
    )
}

/// Request a personalized financial plan for `goal`.
///
/// Any goal string is accepted, including an empty one; the builder never
/// validates, it only assembles.
pub fn plan_prompt(
    ledger: &Ledger,
    spending: &BTreeMap<String, f64>,
    savings_rate: f64,
    goal: &str,
) -> String {
    let mut out = String::new();
    out.push_str("The user has provided the following financial information:\n\n");
    push_ledger_context(&mut out, ledger);
    push_metrics_context(&mut out, spending, savings_rate);

    out.push_str(&format!("\nThe user's financial goal is: {goal}\n"));
    out.push_str(
        "\nPlease generate a detailed, personalized financial plan with recommendations for \
         saving, investing and managing debt. Take the user's current spending patterns and \
         savings rate into account.\n\nAt the end, add one specific, practical recommendation \
         the user can implement immediately to improve their financial situation.\n",
    );
    out
}

/// Request an answer to a follow-up question, grounded in the same
/// financial context as the plan.
pub fn question_prompt(
    ledger: &Ledger,
    spending: &BTreeMap<String, f64>,
    savings_rate: f64,
    question: &str,
) -> String {
    let mut out = String::new();
    out.push_str("Based on the following financial data:\n\n");
    push_ledger_context(&mut out, ledger);
    push_metrics_context(&mut out, spending, savings_rate);

    out.push_str(&format!("\nAnd the question: \"{question}\"\n"));
    out.push_str("\nPlease provide a precise and personalized answer.\n");
    out
}

fn push_ledger_context(out: &mut String, ledger: &Ledger) {
    out.push_str("Accounts:\n");
    if ledger.accounts.is_empty() {
        out.push_str("- (none)\n");
    }
    for a in &ledger.accounts {
        out.push_str(&format!("- {}: ${:.2}\n", a.name, a.balance));
    }

    out.push_str("\nTransactions:\n");
    if ledger.transactions.is_empty() {
        out.push_str("- (none)\n");
    }
    for t in &ledger.transactions {
        out.push_str(&format!(
            "- {} {} ${:.2} ({})\n",
            t.date.format("%Y-%m-%d"),
            t.kind.label(),
            t.amount,
            t.category_label()
        ));
    }

    out.push_str("\nLoans:\n");
    if ledger.loans.is_empty() {
        out.push_str("- (none)\n");
    }
    for l in &ledger.loans {
        out.push_str(&format!(
            "- {}: ${:.2} principal at {:.2}% interest\n",
            l.kind, l.principal, l.interest_rate
        ));
    }

    out.push_str("\nPending bills:\n");
    if ledger.bills.is_empty() {
        out.push_str("- (none)\n");
    }
    for b in &ledger.bills {
        out.push_str(&format!(
            "- {}: ${:.2} due {}\n",
            b.name,
            b.amount,
            b.due_date.format("%Y-%m-%d")
        ));
    }
}

fn push_metrics_context(out: &mut String, spending: &BTreeMap<String, f64>, savings_rate: f64) {
    out.push_str("\nSpending patterns:\n");
    if spending.is_empty() {
        out.push_str("- (no withdrawals recorded)\n");
    }
    for (category, total) in spending {
        out.push_str(&format!("- {category}: ${total:.2}\n"));
    }

    out.push_str(&format!("\nCurrent savings rate: {}\n", format_percent(savings_rate)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::{spending_by_category, Account, Transaction, TxnKind};

    fn sample_ledger() -> Ledger {
        Ledger {
            accounts: vec![Account {
                name: "Checking Account".to_string(),
                balance: 1250.0,
            }],
            transactions: vec![
                Transaction {
                    date: "2024-09-15".parse().unwrap(),
                    amount: 1000.0,
                    kind: TxnKind::Deposit,
                    category: Some("Salary".to_string()),
                },
                Transaction {
                    date: "2024-09-16".parse().unwrap(),
                    amount: 600.0,
                    kind: TxnKind::Withdrawal,
                    category: Some("Rent".to_string()),
                },
                Transaction {
                    date: "2024-09-17".parse().unwrap(),
                    amount: 40.0,
                    kind: TxnKind::Withdrawal,
                    category: None,
                },
            ],
            loans: vec![],
            bills: vec![],
        }
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.4), "40.00%");
        assert_eq!(format_percent(-0.4), "-40.00%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn test_simulation_prompt_mentions_user_and_contract() {
        let p = simulation_prompt("user-42");
        assert!(p.contains("user-42"));
        assert!(p.contains("\"deposit\""));
        assert!(p.contains("\"withdrawal\""));
        assert!(p.contains("\"accounts\""));
        assert!(p.contains("\"bills\""));
    }

    #[test]
    fn test_plan_prompt_contains_context_and_goal() {
        let ledger = sample_ledger();
        let spending = spending_by_category(&ledger.transactions);
        let p = plan_prompt(&ledger, &spending, 0.36, "Save for a house");

        assert!(p.contains("Checking Account: $1250.00"));
        assert!(p.contains("- Rent: $600.00"));
        assert!(p.contains("- Uncategorized: $40.00"));
        assert!(p.contains("Current savings rate: 36.00%"));
        assert!(p.contains("The user's financial goal is: Save for a house"));
        assert!(p.contains("implement immediately"));
    }

    #[test]
    fn test_plan_prompt_accepts_empty_goal() {
        let ledger = Ledger::default();
        let p = plan_prompt(&ledger, &BTreeMap::new(), 0.0, "");
        assert!(p.contains("The user's financial goal is: \n"));
        assert!(p.contains("- (none)"));
        assert!(p.contains("- (no withdrawals recorded)"));
    }

    #[test]
    fn test_plan_prompt_deterministic() {
        let ledger = sample_ledger();
        let spending = spending_by_category(&ledger.transactions);
        let a = plan_prompt(&ledger, &spending, 0.36, "Pay off debt");
        let b = plan_prompt(&ledger, &spending, 0.36, "Pay off debt");
        assert_eq!(a, b);
    }

    #[test]
    fn test_question_prompt_quotes_question() {
        let ledger = sample_ledger();
        let spending = spending_by_category(&ledger.transactions);
        let p = question_prompt(&ledger, &spending, 0.36, "How can I save more?");
        assert!(p.contains("And the question: \"How can I save more?\""));
        assert!(p.contains("precise and personalized"));
    }
}
