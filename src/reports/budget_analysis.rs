//! Budget analysis report
//!
//! Overview totals, a per-budget performance table colored by health,
//! and the evaluator's recommendations.

use crate::config::Settings;
use crate::display::format::{format_currency, format_percentage, format_period, truncate};
use crate::models::{BudgetStatus, DateRange};
use crate::services::BudgetSummary;

use super::document::{
    BulletBlock, Cell, Column, ReportDocument, ReportKind, Rgb, Section, SummaryBlock, TableBlock,
    TitleBlock,
};
use super::evaluator::{recommendations, BudgetHealth};

pub const OVERVIEW_HEADING: &str = "Budget Overview";
pub const PERFORMANCE_HEADING: &str = "Detailed Budget Performance";
pub const RECOMMENDATIONS_HEADING: &str = "Budget Recommendations";

fn health_color(health: BudgetHealth) -> Rgb {
    match health {
        BudgetHealth::Good => Rgb::GREEN,
        BudgetHealth::Warning => Rgb::ORANGE,
        BudgetHealth::OverBudget => Rgb::RED,
    }
}

/// Build the budget analysis report from budgets with derived spending
pub fn build_budget_report(statuses: &[BudgetStatus], range: &DateRange, settings: &Settings) -> ReportDocument {
    let symbol = settings.currency_symbol.as_str();
    let summary = BudgetSummary::from_statuses(statuses);

    let mut doc = ReportDocument::new(ReportKind::BudgetAnalysis, *range);

    doc.push(Section::Title(TitleBlock {
        title: ReportKind::BudgetAnalysis.title().to_string(),
        color: Rgb::GREEN,
        period: format!("Period: {}", format_period(range)),
        show_generated: false,
    }));

    doc.push(Section::Summary(SummaryBlock {
        heading: OVERVIEW_HEADING.to_string(),
        value_x: 80.0,
        rows: vec![
            ("Total Budget".into(), Cell::colored(format_currency(summary.total_budget, symbol), Rgb::GREEN)),
            ("Total Spent".into(), Cell::colored(format_currency(summary.total_spent, symbol), Rgb::GREEN)),
            ("Remaining".into(), Cell::colored(format_currency(summary.total_remaining, symbol), Rgb::GREEN)),
            ("Overall Usage".into(), Cell::colored(format_percentage(summary.usage_percentage()), Rgb::GREEN)),
        ],
    }));

    doc.push(Section::Table(TableBlock {
        heading: PERFORMANCE_HEADING.to_string(),
        columns: vec![
            Column::new("Category", 22.0),
            Column::new("Budget", 80.0),
            Column::new("Spent", 110.0),
            Column::new("Remaining", 130.0),
            Column::new("Usage", 160.0),
            Column::new("Status", 180.0),
        ],
        header_fill: Rgb::GREEN,
        font_size: 8.0,
        rows: statuses
            .iter()
            .map(|status| {
                let health = BudgetHealth::of(status);
                vec![
                    Cell::plain(truncate(&status.category_name, 20)),
                    Cell::plain(format_currency(status.limit(), symbol)),
                    Cell::plain(format_currency(status.spent, symbol)),
                    Cell::plain(format_currency(status.remaining(), symbol)),
                    Cell::plain(format_percentage(status.usage_ratio() * 100.0)),
                    Cell::colored(health.label(), health_color(health)),
                ]
            })
            .collect(),
        break_after: 220.0,
    }));

    doc.push(Section::Bullets(BulletBlock {
        heading: RECOMMENDATIONS_HEADING.to_string(),
        items: recommendations(statuses),
        break_after: 240.0,
    }));

    tracing::debug!(
        budgets = summary.budget_count,
        over_budget = summary.over_budget_count,
        "built budget analysis report"
    );

    doc
}
