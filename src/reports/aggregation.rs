//! Aggregation engine
//!
//! Pure functions turning a snapshot of transactions, categories and
//! budget statuses into the numbers the reports show. Inputs are borrowed
//! and never modified, so the same snapshot always yields the same output.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::display::format::format_percentage;
use crate::models::{BudgetStatus, Category, CategoryId, EntryKind, Money, Transaction, UNCATEGORIZED};

/// Savings rates above this are called out as positive
pub const HIGH_SAVINGS_RATE: f64 = 20.0;

/// Savings rates below this are called out as a warning
pub const LOW_SAVINGS_RATE: f64 = 10.0;

/// One row of the expense-by-category breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub color: Option<String>,
    pub amount: Money,
    /// Share of total expenses, 0 when there are none
    pub percentage: f64,
    pub transaction_count: usize,
}

/// Income, expenses and net for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// First day of the month
    pub month: NaiveDate,
    pub income: Money,
    pub expenses: Money,
    pub net: Money,
}

impl MonthlyTotals {
    /// `Jan 2024`
    pub fn label(&self) -> String {
        self.month.format("%b %Y").to_string()
    }
}

/// Display percentage plus the alert flag for one budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetProgress {
    /// Clamped to `[0, 100]` for progress bars
    pub percentage: f64,
    /// `spent > limit`, from the unclamped values
    pub is_over_budget: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightTone {
    Positive,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsInsight {
    pub rate: f64,
    pub tone: InsightTone,
    pub message: String,
}

/// Report-level totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Money,
    pub expenses: Money,
    pub net_balance: Money,
    pub transaction_count: usize,
}

/// A single line of the insights panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub tone: InsightTone,
    pub text: String,
}

fn category_lookup(categories: &[Category]) -> HashMap<CategoryId, &Category> {
    categories.iter().map(|c| (c.id, c)).collect()
}

/// Expense totals per category, largest first
///
/// Transactions whose category cannot be resolved are grouped under
/// "Uncategorized". Equal amounts keep the order in which their groups
/// were first seen.
pub fn compute_category_breakdown(transactions: &[Transaction], categories: &[Category]) -> Vec<CategoryBreakdown> {
    let lookup = category_lookup(categories);
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CategoryBreakdown> = Vec::new();

    for txn in transactions.iter().filter(|t| t.kind == EntryKind::Expense) {
        let category = lookup.get(&txn.category_id);
        let name = category.map(|c| c.name.clone()).unwrap_or_else(|| UNCATEGORIZED.to_string());

        let slot = *index.entry(name.clone()).or_insert_with(|| {
            groups.push(CategoryBreakdown {
                category: name,
                color: category.map(|c| c.color.clone()),
                amount: Money::zero(),
                percentage: 0.0,
                transaction_count: 0,
            });
            groups.len() - 1
        });

        groups[slot].amount += txn.amount;
        groups[slot].transaction_count += 1;
    }

    let total: Money = groups.iter().map(|g| g.amount).sum();
    for group in &mut groups {
        group.percentage = group.amount.ratio_of(total) * 100.0;
    }

    // sort_by is stable
    groups.sort_by(|a, b| b.amount.cmp(&a.amount));
    groups
}

/// Income/expense/net per calendar month, the `month_count` most recent
/// months in chronological order
pub fn compute_monthly_series(transactions: &[Transaction], month_count: usize) -> Vec<MonthlyTotals> {
    let mut months: BTreeMap<(i32, u32), (Money, Money)> = BTreeMap::new();

    for txn in transactions {
        let key = (txn.transaction_date.year(), txn.transaction_date.month());
        let entry = months.entry(key).or_default();
        match txn.kind {
            EntryKind::Income => entry.0 += txn.amount,
            EntryKind::Expense => entry.1 += txn.amount,
        }
    }

    let skip = months.len().saturating_sub(month_count);
    months
        .into_iter()
        .skip(skip)
        .filter_map(|((year, month), (income, expenses))| {
            Some(MonthlyTotals {
                month: NaiveDate::from_ymd_opt(year, month, 1)?,
                income,
                expenses,
                net: income - expenses,
            })
        })
        .collect()
}

/// Progress bar percentage and over-budget flag for one budget
pub fn compute_budget_progress(status: &BudgetStatus) -> BudgetProgress {
    BudgetProgress {
        percentage: (status.usage_ratio() * 100.0).clamp(0.0, 100.0),
        is_over_budget: status.spent > status.limit(),
    }
}

/// Savings rate `(income - expenses) / income`, 0 without income
pub fn compute_savings_insight(income: Money, expenses: Money) -> SavingsInsight {
    let rate = if income.is_positive() {
        (income - expenses).ratio_of(income) * 100.0
    } else {
        0.0
    };
    let shown = format_percentage(rate);

    let (tone, message) = if rate > HIGH_SAVINGS_RATE {
        (
            InsightTone::Positive,
            format!("Excellent savings rate of {}! You're saving more than recommended.", shown),
        )
    } else if rate < LOW_SAVINGS_RATE {
        (
            InsightTone::Warning,
            format!("Low savings rate of {}. Consider reducing expenses or increasing income.", shown),
        )
    } else {
        (
            InsightTone::Neutral,
            format!("Savings rate of {} is within the typical range.", shown),
        )
    };

    SavingsInsight { rate, tone, message }
}

pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let income: Money = transactions.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
    let expenses: Money = transactions.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

    Totals {
        income,
        expenses,
        net_balance: income - expenses,
        transaction_count: transactions.len(),
    }
}

/// Savings insight (when not neutral) followed by the over-budget count
pub fn compute_insights(totals: &Totals, budgets: &[BudgetStatus]) -> Vec<Insight> {
    let mut insights = Vec::new();

    let savings = compute_savings_insight(totals.income, totals.expenses);
    if savings.tone != InsightTone::Neutral {
        insights.push(Insight {
            tone: savings.tone,
            text: savings.message,
        });
    }

    let over = budgets
        .iter()
        .filter(|b| compute_budget_progress(b).is_over_budget)
        .count();
    if over > 0 {
        let noun = if over == 1 { "category" } else { "categories" };
        insights.push(Insight {
            tone: InsightTone::Warning,
            text: format!("You're over budget in {} {}.", over, noun),
        });
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, BudgetId, BudgetPeriod, TransactionId};

    fn categories() -> Vec<Category> {
        vec![
            Category::new(CategoryId::new(1), "Food", EntryKind::Expense, "#ef4444"),
            Category::new(CategoryId::new(2), "Transportation", EntryKind::Expense, "#3b82f6"),
            Category::new(CategoryId::new(8), "Salary", EntryKind::Income, "#22c55e"),
        ]
    }

    fn txn(id: u64, kind: EntryKind, cents: i64, category: u64, date: (i32, u32, u32)) -> Transaction {
        Transaction::new(
            TransactionId::new(id),
            kind,
            Money::from_cents(cents),
            CategoryId::new(category),
            "test",
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
    }

    fn status(limit: i64, spent: i64) -> BudgetStatus {
        let budget = Budget::new(BudgetId::new(1), CategoryId::new(1), Money::from_cents(limit), BudgetPeriod::Monthly);
        BudgetStatus::new(budget, "Food", Money::from_cents(spent))
    }

    #[test]
    fn test_breakdown_scenario() {
        let transactions = vec![
            txn(1, EntryKind::Expense, 15000, 1, (2024, 1, 15)),
            txn(2, EntryKind::Income, 300000, 8, (2024, 1, 1)),
            txn(3, EntryKind::Expense, 8550, 2, (2024, 1, 12)),
        ];

        let breakdown = compute_category_breakdown(&transactions, &categories());
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].category, "Food");
        assert_eq!(breakdown[0].amount.cents(), 15000);
        assert_eq!(format_percentage(breakdown[0].percentage), "63.7%");
        assert_eq!(breakdown[1].category, "Transportation");
        assert_eq!(format_percentage(breakdown[1].percentage), "36.3%");
    }

    #[test]
    fn test_breakdown_uncategorized_and_ties() {
        let transactions = vec![
            txn(1, EntryKind::Expense, 500, 99, (2024, 1, 1)),
            txn(2, EntryKind::Expense, 500, 1, (2024, 1, 2)),
            txn(3, EntryKind::Expense, 200, 42, (2024, 1, 3)),
        ];

        let breakdown = compute_category_breakdown(&transactions, &categories());
        assert_eq!(breakdown[0].category, UNCATEGORIZED);
        assert_eq!(breakdown[0].amount.cents(), 700);
        assert_eq!(breakdown[0].transaction_count, 2);
        assert_eq!(breakdown[0].color, None);
        assert_eq!(breakdown[1].category, "Food");
    }

    #[test]
    fn test_breakdown_stable_on_equal_amounts() {
        let transactions = vec![
            txn(1, EntryKind::Expense, 500, 2, (2024, 1, 1)),
            txn(2, EntryKind::Expense, 500, 1, (2024, 1, 2)),
        ];

        let breakdown = compute_category_breakdown(&transactions, &categories());
        assert_eq!(breakdown[0].category, "Transportation");
        assert_eq!(breakdown[1].category, "Food");
    }

    #[test]
    fn test_breakdown_empty() {
        let only_income = vec![txn(1, EntryKind::Income, 500, 8, (2024, 1, 1))];
        assert!(compute_category_breakdown(&only_income, &categories()).is_empty());
    }

    #[test]
    fn test_monthly_series() {
        let transactions = vec![
            txn(1, EntryKind::Income, 300000, 8, (2024, 1, 1)),
            txn(2, EntryKind::Expense, 15000, 1, (2024, 1, 15)),
            txn(3, EntryKind::Expense, 1000, 1, (2023, 11, 3)),
            txn(4, EntryKind::Expense, 2000, 1, (2023, 12, 3)),
        ];

        let series = compute_monthly_series(&transactions, 2);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label(), "Dec 2023");
        assert_eq!(series[1].label(), "Jan 2024");
        assert_eq!(series[1].net.cents(), 285000);

        assert_eq!(compute_monthly_series(&transactions, 12).len(), 3);
        assert!(compute_monthly_series(&transactions, 0).is_empty());
    }

    #[test]
    fn test_budget_progress_scenarios() {
        let near = compute_budget_progress(&status(50000, 45000));
        assert!((near.percentage - 90.0).abs() < 1e-9);
        assert!(!near.is_over_budget);

        let over = compute_budget_progress(&status(50000, 60000));
        assert_eq!(over.percentage, 100.0);
        assert!(over.is_over_budget);

        let exact = compute_budget_progress(&status(50000, 50000));
        assert_eq!(exact.percentage, 100.0);
        assert!(!exact.is_over_budget);
    }

    #[test]
    fn test_savings_insight() {
        let good = compute_savings_insight(Money::from_cents(300000), Money::from_cents(43075));
        assert_eq!(good.tone, InsightTone::Positive);
        assert_eq!(
            good.message,
            "Excellent savings rate of 85.6%! You're saving more than recommended."
        );

        let low = compute_savings_insight(Money::from_cents(100000), Money::from_cents(95000));
        assert_eq!(low.tone, InsightTone::Warning);
        assert!(low.message.starts_with("Low savings rate of 5.0%."));

        let typical = compute_savings_insight(Money::from_cents(100000), Money::from_cents(85000));
        assert_eq!(typical.tone, InsightTone::Neutral);

        let none = compute_savings_insight(Money::zero(), Money::from_cents(5000));
        assert_eq!(none.rate, 0.0);
        assert_eq!(none.tone, InsightTone::Warning);
    }

    #[test]
    fn test_totals_and_insights() {
        let transactions = vec![
            txn(1, EntryKind::Income, 100000, 8, (2024, 1, 1)),
            txn(2, EntryKind::Expense, 85000, 1, (2024, 1, 2)),
        ];
        let totals = compute_totals(&transactions);
        assert_eq!(totals.net_balance.cents(), 15000);
        assert_eq!(totals.transaction_count, 2);

        let insights = compute_insights(&totals, &[status(100, 200), status(100, 50)]);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].text, "You're over budget in 1 category.");

        let insights = compute_insights(&totals, &[status(100, 200), status(100, 300)]);
        assert_eq!(insights[0].text, "You're over budget in 2 categories.");
    }
}
