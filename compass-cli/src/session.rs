//! The interactive planning session: obtain a ledger, show the snapshot and
//! its metrics, then generate a plan and take follow-up questions.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use compass_advisor as advisor;
use compass_core::{Ledger, MetricsReport};

use crate::llm::LlmClient;
use crate::render;

pub struct PlanOptions {
    pub user: Option<String>,
    pub ledger_path: Option<PathBuf>,
    pub months_ahead: usize,
    pub transaction_rows: usize,
}

pub fn run_plan(client: &LlmClient, opts: &PlanOptions) -> Result<()> {
    println!("# Compass planning session\n");

    let ledger = if let Some(path) = &opts.ledger_path {
        load_ledger_file(path)?
    } else {
        let user_id = match &opts.user {
            Some(u) if !u.trim().is_empty() => u.trim().to_string(),
            _ => prompt_required("User id to simulate data for")?,
        };
        simulate_ledger(client, &user_id)?
    };

    render_snapshot(&ledger, opts.transaction_rows);

    let report = MetricsReport::for_transactions(&ledger.transactions, opts.months_ahead);
    render_metrics(&report);

    let goal = prompt("What is your financial goal? (e.g. save for a house, pay off debt)")?;
    if goal.is_empty() {
        println!("\nNo goal provided; skipping the plan. Run `compass plan` again any time.");
        return Ok(());
    }
    let years = prompt_years()?;
    println!("\nObjective: {goal} within {years} years.\n");

    let goal_line = format!("Goal: {goal}, timeframe: {years} years.");
    println!("Generating your financial plan...\n");
    match client.generate(
        advisor::ADVISOR_SYSTEM_PROMPT,
        &advisor::plan_prompt(
            &ledger,
            &report.spending_by_category,
            report.savings_rate,
            &goal_line,
        ),
    ) {
        Ok(plan) => {
            println!("## Your financial plan\n");
            println!("{plan}\n");
        }
        Err(e) => {
            eprintln!("Could not generate the plan: {e:#}");
            eprintln!("Run `compass plan` again to retry.");
            return Ok(());
        }
    }

    loop {
        let question = prompt("Any other question about your plan? (blank line to finish)")?;
        if question.is_empty() {
            break;
        }
        match client.generate(
            advisor::ADVISOR_SYSTEM_PROMPT,
            &advisor::question_prompt(
                &ledger,
                &report.spending_by_category,
                report.savings_rate,
                &question,
            ),
        ) {
            Ok(answer) => println!("\n{answer}\n"),
            Err(e) => eprintln!("Could not answer that question: {e:#}"),
        }
    }

    Ok(())
}

/// Offline path: parse a ledger document from disk and print the snapshot
/// and metrics without any network calls.
pub fn run_metrics(path: &Path, months_ahead: usize, transaction_rows: usize) -> Result<()> {
    let ledger = load_ledger_file(path)?;
    render_snapshot(&ledger, transaction_rows);
    let report = MetricsReport::for_transactions(&ledger.transactions, months_ahead);
    render_metrics(&report);
    Ok(())
}

fn simulate_ledger(client: &LlmClient, user_id: &str) -> Result<Ledger> {
    println!(
        "Simulating financial data for `{user_id}` via {}... this can take a moment.\n",
        client.provider_name()
    );

    loop {
        let reply = client
            .generate(
                advisor::SIMULATOR_SYSTEM_PROMPT,
                &advisor::simulation_prompt(user_id),
            )
            .context("simulating financial data")?;

        match advisor::parse_ledger_document(&reply) {
            Ok(ledger) => return Ok(ledger),
            Err(e) => {
                eprintln!("Simulated data was malformed: {e}");
                let retry = prompt("Try again? [y/N]")?;
                if !retry.eq_ignore_ascii_case("y") {
                    bail!("could not obtain a well-formed ledger");
                }
            }
        }
    }
}

fn load_ledger_file(path: &Path) -> Result<Ledger> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    advisor::parse_ledger_document(&text)
        .with_context(|| format!("parsing ledger document {}", path.display()))
}

fn render_snapshot(ledger: &Ledger, transaction_rows: usize) {
    print!("{}", render::accounts_section(&ledger.accounts));
    print!(
        "{}",
        render::transactions_section(&ledger.recent_transactions(transaction_rows))
    );
    if !ledger.loans.is_empty() {
        print!("{}", render::loans_section(&ledger.loans));
    }
    if !ledger.bills.is_empty() {
        print!("{}", render::bills_section(&ledger.bills));
    }
}

fn render_metrics(report: &MetricsReport) {
    print!("{}", render::spending_section(&report.spending_by_category));
    print!("{}", render::savings_section(report.savings_rate));
    print!(
        "{}",
        render::projection_section(report.projected_expenses.as_deref())
    );
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn prompt_required(label: &str) -> Result<String> {
    loop {
        let s = prompt(label)?;
        if !s.is_empty() {
            return Ok(s);
        }
        println!("Please enter a value.");
    }
}

fn prompt_years() -> Result<u32> {
    loop {
        let s = prompt("In how many years do you want to reach it? (1-10, default 5)")?;
        if s.is_empty() {
            return Ok(5);
        }
        match s.parse::<u32>() {
            Ok(y) if (1..=10).contains(&y) => return Ok(y),
            _ => println!("Please enter a number between 1 and 10."),
        }
    }
}
