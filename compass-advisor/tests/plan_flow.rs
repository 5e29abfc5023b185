//! End-to-end flow over a fixture document: parse the simulated reply,
//! derive metrics, and build the plan prompt the advisor call would receive.

use compass_advisor::{parse_ledger_document, plan_prompt, MalformedLedger};
use compass_core::{
    project_future_expenses, savings_rate, spending_by_category, MetricsError, MetricsReport,
};

/// A simulated reply the way a chat model actually returns it: fenced, with
/// a little prose around the object.
const SIMULATED_REPLY: &str = r#"Sure! Here is the simulated data:

```json
{
    "accounts": [
        {"name": "Checking Account", "balance": 820.0},
        {"name": "Savings Account", "balance": 2400.0}
    ],
    "transactions": [
        {"date": "2024-09-01", "amount": 1500.0, "kind": "deposit", "category": "Salary"},
        {"date": "2024-09-02", "amount": 650.0, "kind": "withdrawal", "category": "Rent"},
        {"date": "2024-09-03", "amount": 85.5, "kind": "withdrawal", "category": "Food"},
        {"date": "2024-09-05", "amount": 42.0, "kind": "withdrawal", "category": "Food"},
        {"date": "2024-09-08", "amount": 60.0, "kind": "withdrawal", "category": "Transport"},
        {"date": "2024-09-10", "amount": 200.0, "kind": "deposit", "category": "Freelance"},
        {"date": "2024-09-12", "amount": 35.0, "kind": "withdrawal"},
        {"date": "2024-09-15", "amount": 120.0, "kind": "withdrawal", "category": "Utilities"},
        {"date": "2024-09-18", "amount": 55.25, "kind": "withdrawal", "category": "Food"},
        {"date": "2024-09-20", "amount": 30.0, "kind": "withdrawal", "category": "Entertainment"}
    ],
    "loans": [
        {"kind": "Student Loan", "principal": 8000.0, "interest_rate": 4.2}
    ],
    "bills": [
        {"name": "Electricity", "amount": 90.0, "due_date": "2024-09-30"},
        {"name": "Internet", "amount": 45.0, "due_date": "2024-10-02"}
    ]
}
```

Let me know if you need anything else."#;

#[test]
fn test_simulated_reply_to_plan_prompt() {
    let ledger = parse_ledger_document(SIMULATED_REPLY).expect("fixture should parse");
    assert_eq!(ledger.accounts.len(), 2);
    assert_eq!(ledger.transactions.len(), 10);

    let spending = spending_by_category(&ledger.transactions);
    let withdrawn: f64 = ledger
        .transactions
        .iter()
        .filter(|t| t.is_withdrawal())
        .map(|t| t.amount)
        .sum();
    let summed: f64 = spending.values().sum();
    assert!((summed - withdrawn).abs() < 1e-9);
    assert_eq!(spending["Food"], 85.5 + 42.0 + 55.25);
    assert_eq!(spending["Uncategorized"], 35.0);

    let rate = savings_rate(&ledger.transactions);
    let income = 1500.0 + 200.0;
    assert!((rate - (income - withdrawn) / income).abs() < 1e-9);

    let projected = project_future_expenses(&ledger.transactions, 3).unwrap();
    let baseline = withdrawn / ledger.transactions.len() as f64 * 30.0;
    assert!((projected[0] - baseline * 1.02).abs() < 1e-6);
    assert!((projected[2] - baseline * 1.06).abs() < 1e-6);

    let prompt = plan_prompt(&ledger, &spending, rate, "Pay off my student loan in 2 years");
    assert!(prompt.contains("Student Loan: $8000.00 principal at 4.20% interest"));
    assert!(prompt.contains("Internet: $45.00 due 2024-10-02"));
    assert!(prompt.contains("Pay off my student loan in 2 years"));

    // Same inputs, same prompt bytes.
    let again = plan_prompt(&ledger, &spending, rate, "Pay off my student loan in 2 years");
    assert_eq!(prompt, again);
}

#[test]
fn test_empty_ledger_flows_to_defined_fallbacks() {
    let doc = r#"{"accounts": [], "transactions": [], "loans": [], "bills": []}"#;
    let ledger = parse_ledger_document(doc).unwrap();

    assert!(spending_by_category(&ledger.transactions).is_empty());
    assert_eq!(savings_rate(&ledger.transactions), 0.0);
    assert_eq!(
        project_future_expenses(&ledger.transactions, 3),
        Err(MetricsError::InsufficientData)
    );

    let report = MetricsReport::for_transactions(&ledger.transactions, 3);
    assert_eq!(report.projected_expenses, None);
}

#[test]
fn test_malformed_reply_is_reported_not_propagated() {
    let reply = "I'm sorry, I cannot simulate financial data right now.";
    match parse_ledger_document(reply) {
        Err(MalformedLedger::Json(_)) => {}
        other => panic!("expected a Json error, got {other:?}"),
    }
}
