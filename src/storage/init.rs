//! Storage initialization
//!
//! Handles first-run setup and the demo data set

use chrono::{NaiveDate, NaiveTime};

use crate::config::paths::FinancePaths;
use crate::error::FinanceError;
use crate::models::{
    Budget, BudgetId, BudgetPeriod, Category, CategoryId, EntryKind, FinancialGoal, GoalCategory,
    GoalId, GoalPriority, Money, Transaction, TransactionId,
};

use super::Storage;

/// Initialize storage for a fresh installation
pub fn initialize_storage(paths: &FinancePaths) -> Result<(), FinanceError> {
    paths.ensure_directories()
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, FinanceError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| FinanceError::Storage(format!("invalid seed date {year}-{month}-{day}")))
}

fn demo_categories() -> Vec<Category> {
    use EntryKind::{Expense, Income};

    [
        (1, "Food & Dining", Expense, "#ef4444"),
        (2, "Transportation", Expense, "#3b82f6"),
        (3, "Entertainment", Expense, "#8b5cf6"),
        (4, "Shopping", Expense, "#f59e0b"),
        (5, "Bills & Utilities", Expense, "#10b981"),
        (6, "Healthcare", Expense, "#ec4899"),
        (7, "Education", Expense, "#14b8a6"),
        (8, "Salary", Income, "#22c55e"),
        (9, "Freelance", Income, "#06b6d4"),
        (10, "Investments", Income, "#8b5cf6"),
    ]
    .into_iter()
    .map(|(id, name, kind, color)| Category::new(CategoryId::new(id), name, kind, color))
    .collect()
}

fn demo_transactions() -> Result<Vec<Transaction>, FinanceError> {
    use EntryKind::{Expense, Income};

    let rows = [
        (1, Expense, 15000, 1, "Grocery shopping", (2024, 1, 15)),
        (2, Income, 300000, 8, "Monthly salary", (2024, 1, 1)),
        (3, Expense, 8550, 2, "Gas station", (2024, 1, 12)),
        (4, Expense, 12000, 3, "Movie tickets", (2024, 1, 10)),
        (5, Expense, 7525, 4, "Clothing purchase", (2024, 1, 8)),
    ];

    rows.into_iter()
        .map(|(id, kind, cents, category, description, (y, m, d))| {
            Ok(Transaction::new(
                TransactionId::new(id),
                kind,
                Money::from_cents(cents),
                CategoryId::new(category),
                description,
                date(y, m, d)?,
            ))
        })
        .collect()
}

fn demo_budgets() -> Vec<Budget> {
    [(1, 1, 50000), (2, 2, 40000), (3, 3, 25000)]
        .into_iter()
        .map(|(id, category, cents)| {
            Budget::new(
                BudgetId::new(id),
                CategoryId::new(category),
                Money::from_cents(cents),
                BudgetPeriod::Monthly,
            )
        })
        .collect()
}

fn demo_goals() -> Result<Vec<FinancialGoal>, FinanceError> {
    let created = date(2024, 1, 1)?.and_time(NaiveTime::MIN).and_utc();

    let mut emergency = FinancialGoal::new(GoalId::new(1), "Emergency Fund", Money::from_cents(1_500_000));
    emergency.description = "Build an emergency fund covering 6 months of expenses".into();
    emergency.current_amount = Money::from_cents(830_000);
    emergency.category = GoalCategory::Emergency;
    emergency.priority = GoalPriority::High;
    emergency.target_date = Some(date(2024, 12, 31)?);
    emergency.created_at = created;

    let mut car = FinancialGoal::new(GoalId::new(2), "New Car", Money::from_cents(2_500_000));
    car.description = "Save for a reliable new car".into();
    car.current_amount = Money::from_cents(1_200_000);
    car.category = GoalCategory::Vehicle;
    car.priority = GoalPriority::Medium;
    car.target_date = Some(date(2025, 6, 30)?);
    car.created_at = created;

    Ok(vec![emergency, car])
}

/// Populate empty repositories with the demo data set
///
/// Returns `false` without touching anything when transactions or
/// categories already exist.
pub fn seed_demo_data(storage: &Storage) -> Result<bool, FinanceError> {
    if storage.transactions.count()? > 0 || !storage.categories.get_all()?.is_empty() {
        return Ok(false);
    }

    for category in demo_categories() {
        storage.categories.upsert(category)?;
    }
    for txn in demo_transactions()? {
        storage.transactions.upsert(txn)?;
    }
    for budget in demo_budgets() {
        storage.budgets.upsert(budget)?;
    }
    for goal in demo_goals()? {
        storage.goals.upsert(goal)?;
    }

    tracing::info!("seeded demo data");
    Ok(true)
}
