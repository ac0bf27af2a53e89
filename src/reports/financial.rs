//! Financial report
//!
//! Builds the multi-section financial report for a date window: summary,
//! expense breakdown, budget performance and the recent-transactions
//! ledger. Budget spending is derived from the same transactions, never
//! taken from a cached value.

use crate::config::Settings;
use crate::display::format::{
    format_currency, format_date_short, format_percentage, format_period, format_signed, truncate,
};
use crate::models::{Budget, Category, CategoryId, DateRange, EntryKind, Transaction, UNCATEGORIZED};
use crate::services::derive_statuses;

use super::aggregation::{compute_budget_progress, compute_category_breakdown, compute_totals};
use super::document::{
    Cell, Column, ReportDocument, ReportKind, Rgb, Section, SummaryBlock, TableBlock, TitleBlock,
};
use super::evaluator::BudgetHealth;

pub const SUMMARY_HEADING: &str = "Financial Summary";
pub const BREAKDOWN_HEADING: &str = "Expense Breakdown by Category";
pub const BUDGET_HEADING: &str = "Budget Performance";
pub const LEDGER_HEADING: &str = "Recent Transactions";

const SUMMARY_VALUE_X: f32 = 80.0;

/// Build the financial report for `range`
///
/// Only transactions inside `range` are considered, for every section.
pub fn build_report(
    transactions: &[Transaction],
    budgets: &[Budget],
    categories: &[Category],
    range: &DateRange,
    settings: &Settings,
) -> ReportDocument {
    let symbol = settings.currency_symbol.as_str();
    let options = &settings.report;

    let in_window: Vec<Transaction> = transactions
        .iter()
        .filter(|t| range.contains(t.transaction_date))
        .cloned()
        .collect();

    let mut doc = ReportDocument::new(ReportKind::Financial, *range);

    doc.push(Section::Title(TitleBlock {
        title: ReportKind::Financial.title().to_string(),
        color: Rgb::BLUE,
        period: format!("Period: {}", format_period(range)),
        show_generated: true,
    }));

    let totals = compute_totals(&in_window);
    doc.push(Section::Summary(SummaryBlock {
        heading: SUMMARY_HEADING.to_string(),
        value_x: SUMMARY_VALUE_X,
        rows: vec![
            ("Total Income".into(), Cell::colored(format_currency(totals.income, symbol), Rgb::GREEN)),
            ("Total Expenses".into(), Cell::colored(format_currency(totals.expenses, symbol), Rgb::RED)),
            ("Net Balance".into(), Cell::colored(format_currency(totals.net_balance, symbol), Rgb::BLUE)),
            ("Total Transactions".into(), Cell::colored(totals.transaction_count.to_string(), Rgb::GRAY)),
        ],
    }));

    let breakdown = compute_category_breakdown(&in_window, categories);
    doc.push(Section::Table(TableBlock {
        heading: BREAKDOWN_HEADING.to_string(),
        columns: vec![
            Column::new("Category", 22.0),
            Column::new("Amount", 100.0),
            Column::new("Percentage", 140.0),
        ],
        header_fill: Rgb::BLUE,
        font_size: 8.0,
        rows: breakdown
            .iter()
            .take(options.breakdown_rows)
            .map(|entry| {
                vec![
                    Cell::plain(truncate(&entry.category, 20)),
                    Cell::plain(format_currency(entry.amount, symbol)),
                    Cell::plain(format_percentage(entry.percentage)),
                ]
            })
            .collect(),
        break_after: 250.0,
    }));

    let statuses = derive_statuses(budgets, categories, &in_window, range);
    doc.push(Section::Table(TableBlock {
        heading: BUDGET_HEADING.to_string(),
        columns: vec![
            Column::new("Category", 22.0),
            Column::new("Spent/Limit", 80.0),
            Column::new("Usage", 120.0),
            Column::new("Status", 150.0),
        ],
        header_fill: Rgb::GREEN,
        font_size: 8.0,
        rows: statuses
            .iter()
            .take(options.budget_rows)
            .map(|status| {
                let health = BudgetHealth::of(status);
                let color = if compute_budget_progress(status).is_over_budget {
                    Rgb::RED
                } else {
                    Rgb::GREEN
                };
                vec![
                    Cell::plain(truncate(&status.category_name, 20)),
                    Cell::plain(format!(
                        "{} / {}",
                        format_currency(status.spent, symbol),
                        format_currency(status.limit(), symbol)
                    )),
                    Cell::plain(format_percentage(status.usage_ratio() * 100.0)),
                    Cell::colored(health.within_label(), color),
                ]
            })
            .collect(),
        break_after: 220.0,
    }));

    let mut ledger = in_window;
    ledger.sort_by(|a, b| {
        b.transaction_date
            .cmp(&a.transaction_date)
            .then(b.id.cmp(&a.id))
    });
    doc.push(Section::Table(TableBlock {
        heading: LEDGER_HEADING.to_string(),
        columns: vec![
            Column::new("Date", 22.0),
            Column::new("Description", 45.0),
            Column::new("Category", 100.0),
            Column::new("Type", 130.0),
            Column::new("Amount", 160.0),
        ],
        header_fill: Rgb::GRAY,
        font_size: 7.0,
        rows: ledger
            .iter()
            .take(options.ledger_rows)
            .map(|txn| ledger_row(txn, categories, symbol))
            .collect(),
        break_after: 200.0,
    }));

    tracing::debug!(
        transactions = totals.transaction_count,
        categories = breakdown.len(),
        budgets = statuses.len(),
        "built financial report"
    );

    doc
}

fn category_name(categories: &[Category], id: CategoryId) -> &str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or(UNCATEGORIZED)
}

fn ledger_row(txn: &Transaction, categories: &[Category], symbol: &str) -> Vec<Cell> {
    let income = txn.kind == EntryKind::Income;
    let color = if income { Rgb::GREEN } else { Rgb::RED };

    vec![
        Cell::plain(format_date_short(txn.transaction_date)),
        Cell::plain(truncate(&txn.description, 15)),
        Cell::plain(truncate(category_name(categories, txn.category_id), 10)),
        Cell::plain(txn.kind.as_str()),
        Cell::colored(format_signed(txn.amount, income, symbol), color),
    ]
}
