//! Expensa workflow walkthrough.
//!
//! Seeds an in-memory company with a small team, configures a
//! sequential approval rule, and walks two expense claims through
//! submission to settlement.
//!
//! Usage: cargo run --bin demo

use std::sync::Arc;

use chrono::Utc;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expensa_core::currency::{ExchangeRate, RateTable};
use expensa_core::directory::Role;
use expensa_core::workflow::{Decision, DecisionInput, Expense, ExpenseSubmission, RuleInput};
use expensa_shared::{AppConfig, CurrencyCode};
use expensa_store::{DirectoryStore, ExpenseService, ExpenseStore, NewCompany, NewUser, RuleStore};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expensa=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    let mut rates = RateTable::new();
    if config.rates.is_empty() {
        // No configured quotes: seed the pair the walkthrough uses.
        rates.insert(ExchangeRate::new(
            CurrencyCode::parse("EUR")?,
            CurrencyCode::parse("USD")?,
            dec!(1.07),
        ));
        rates.insert(ExchangeRate::new(
            CurrencyCode::parse("USD")?,
            CurrencyCode::parse("EUR")?,
            dec!(0.93),
        ));
    }
    for seed in &config.rates {
        rates.insert(ExchangeRate::new(
            seed.from.clone(),
            seed.to.clone(),
            seed.rate,
        ));
    }
    info!(quotes = config.rates.len(), "Rate table ready");

    let directory = Arc::new(DirectoryStore::new());
    let service = ExpenseService::new(
        Arc::clone(&directory),
        Arc::new(RuleStore::new()),
        Arc::new(ExpenseStore::new()),
        Arc::new(rates),
        config.workflow,
    );

    // Seed a company with a small team.
    let (company, admin) = directory.create_company(NewCompany {
        name: "Acme Corp".to_string(),
        currency: CurrencyCode::parse("USD")?,
        country: "United States".to_string(),
        admin_name: "Dana Admin".to_string(),
        admin_email: "dana@acme.example".to_string(),
    });
    let director = directory.create_user(NewUser {
        company_id: company.id,
        name: "Robin Director".to_string(),
        email: "robin@acme.example".to_string(),
        role: Role::Director,
        manager_id: Some(admin.id),
    })?;
    let manager = directory.create_user(NewUser {
        company_id: company.id,
        name: "Morgan Manager".to_string(),
        email: "morgan@acme.example".to_string(),
        role: Role::Manager,
        manager_id: Some(director.id),
    })?;
    let employee = directory.create_user(NewUser {
        company_id: company.id,
        name: "Avery Chen".to_string(),
        email: "avery@acme.example".to_string(),
        role: Role::Employee,
        manager_id: Some(manager.id),
    })?;
    println!(
        "Seeded {} ({}) with {} users",
        company.name,
        company.currency,
        directory.list_users(company.id).len()
    );

    // Manager first, then the director signs off.
    let rule = service.save_rule(RuleInput {
        employee_id: employee.id,
        company_id: company.id,
        is_manager_approver: true,
        is_sequential: true,
        approvers: vec![director.id],
        min_percentage: 100,
    })?;
    println!(
        "Approval rule for {}: {} approver(s), sequential",
        employee.name,
        rule.approvers.len()
    );

    // A cross-currency claim: submitted in EUR, tracked in USD.
    let expense = service.submit_expense(ExpenseSubmission {
        employee_id: employee.id,
        company_id: company.id,
        amount: dec!(150.00),
        currency: CurrencyCode::parse("EUR")?,
        category: "Travel".to_string(),
        description: "Client visit in Berlin".to_string(),
        date: Utc::now().date_naive(),
        paid_by: "Personal card".to_string(),
        remarks: Some("Taxi and hotel".to_string()),
    })?;
    println!(
        "\nSubmitted {} {} (= {} {} for the books), status: {}",
        expense.amount, expense.currency, expense.local_amount, company.currency, expense.status
    );
    print_chain(&directory, &expense);

    println!(
        "Manager queue: {} claim(s) waiting",
        service.list_pending_approvals_for_approver(manager.id).len()
    );

    let expense = service.record_decision(
        expense.id,
        DecisionInput {
            approver_id: manager.id,
            decision: Decision::Approved,
            comment: Some("Within travel budget".to_string()),
        },
    )?;
    println!("\nAfter manager approval, status: {}", expense.status);
    print_chain(&directory, &expense);

    let expense = service.record_decision(
        expense.id,
        DecisionInput {
            approver_id: director.id,
            decision: Decision::Approved,
            comment: None,
        },
    )?;
    println!("\nAfter director approval, status: {}", expense.status);
    print_chain(&directory, &expense);

    // A second claim that does not survive the manager.
    let rejected = service.submit_expense(ExpenseSubmission {
        employee_id: employee.id,
        company_id: company.id,
        amount: dec!(85.00),
        currency: CurrencyCode::parse("USD")?,
        category: "Meals".to_string(),
        description: "Team dinner".to_string(),
        date: Utc::now().date_naive(),
        paid_by: "Personal card".to_string(),
        remarks: None,
    })?;
    let rejected = service.record_decision(
        rejected.id,
        DecisionInput {
            approver_id: manager.id,
            decision: Decision::Rejected,
            comment: Some("Missing receipt".to_string()),
        },
    )?;
    println!(
        "\nSecond claim ({} {}) settled: {}",
        rejected.amount, rejected.currency, rejected.status
    );

    println!(
        "\n{} has {} claim(s) on file",
        employee.name,
        service.list_expenses_for_employee(employee.id).len()
    );
    Ok(())
}

/// Prints the approval chain with resolved approver names.
fn print_chain(directory: &DirectoryStore, expense: &Expense) {
    for step in &expense.approval_chain {
        let name = directory
            .find_user(expense.company_id, step.approver_id)
            .map_or_else(|| "unknown".to_string(), |user| user.name);
        let comment = step
            .comment
            .as_deref()
            .map(|c| format!(" ({c})"))
            .unwrap_or_default();
        println!(
            "  step {}: {} [{}] - {}{}",
            step.sequence, name, step.role, step.status, comment
        );
    }
}
