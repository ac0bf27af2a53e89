//! Report formatting for terminal output
//!
//! Renders the dashboard overview: totals, savings rate, expense
//! breakdown, monthly trend, budget health and insights.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::reports::{BudgetHealth, InsightTone, Overview};

use super::format::{format_bar, format_currency, format_percentage, format_period};

const WIDTH: usize = 60;

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Count")]
    count: usize,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Net")]
    net: String,
}

fn heading(output: &mut String, title: &str) {
    output.push('\n');
    output.push_str(title);
    output.push('\n');
    output.push_str(&"─".repeat(WIDTH));
    output.push('\n');
}

fn tone_marker(tone: InsightTone) -> &'static str {
    match tone {
        InsightTone::Positive => "+",
        InsightTone::Warning => "!",
        InsightTone::Neutral => "-",
    }
}

/// Format the overview for the terminal
pub fn format_overview(overview: &Overview, symbol: &str) -> String {
    let mut output = String::new();
    let totals = &overview.totals;

    output.push_str(&format!("Financial Overview: {}\n", format_period(&overview.range)));
    output.push_str(&"═".repeat(WIDTH));
    output.push('\n');
    output.push_str(&format!("Total Income:       {}\n", format_currency(totals.income, symbol)));
    output.push_str(&format!("Total Expenses:     {}\n", format_currency(totals.expenses, symbol)));
    output.push_str(&format!("Net Balance:        {}\n", format_currency(totals.net_balance, symbol)));
    output.push_str(&format!("Savings Rate:       {}\n", format_percentage(overview.savings.rate)));
    output.push_str(&format!("Transactions:       {}\n", totals.transaction_count));

    heading(&mut output, "Expenses by Category");
    if overview.breakdown.is_empty() {
        output.push_str("No expenses in this period.\n");
    } else {
        let rows = overview.breakdown.iter().map(|entry| BreakdownRow {
            category: entry.category.clone(),
            amount: format_currency(entry.amount, symbol),
            share: format!("{} {}", format_bar(entry.percentage, 10), format_percentage(entry.percentage)),
            count: entry.transaction_count,
        });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
    }

    heading(&mut output, "Monthly Trend");
    if overview.monthly.is_empty() {
        output.push_str("No history yet.\n");
    } else {
        let rows = overview.monthly.iter().map(|month| MonthRow {
            month: month.label(),
            income: format_currency(month.income, symbol),
            expenses: format_currency(month.expenses, symbol),
            net: format_currency(month.net, symbol),
        });
        output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        output.push('\n');
    }

    if !overview.budgets.is_empty() {
        heading(&mut output, "Budget Health");
        for status in &overview.budgets {
            output.push_str(&format!(
                "{:20} {:>8}  {}\n",
                status.category_name,
                format_percentage(status.usage_ratio() * 100.0),
                BudgetHealth::of(status)
            ));
        }
    }

    heading(&mut output, "Insights");
    if overview.insights.is_empty() {
        output.push_str(&format!("- {}\n", overview.savings.message));
    } else {
        for insight in &overview.insights {
            output.push_str(&format!("{} {}\n", tone_marker(insight.tone), insight.text));
        }
    }

    output
}
