//! Goal display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{FinancialGoal, GoalStatus};

use super::format::{format_bar, format_currency, format_date_long, format_percentage};

#[derive(Tabled)]
struct GoalRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Goal")]
    title: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Saved")]
    saved: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "Status")]
    status: GoalStatus,
}

/// Format goals as a table
pub fn format_goal_list(goals: &[FinancialGoal], symbol: &str) -> String {
    if goals.is_empty() {
        return "No goals found.\n".to_string();
    }

    let rows = goals.iter().map(|goal| GoalRow {
        id: goal.id.to_string(),
        title: goal.title.clone(),
        category: goal.category.label(),
        priority: goal.priority.to_string(),
        saved: format!(
            "{} / {}",
            format_currency(goal.current_amount, symbol),
            format_currency(goal.target_amount, symbol)
        ),
        progress: format!("{} {}", format_bar(goal.progress(), 10), format_percentage(goal.progress())),
        status: goal.status,
    });

    format!("{}\n", Table::new(rows).with(Style::rounded()))
}

/// Format goal details for display
pub fn format_goal_details(goal: &FinancialGoal, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Goal:      {} ({})\n", goal.title, goal.id));
    if !goal.description.is_empty() {
        output.push_str(&format!("           {}\n", goal.description));
    }
    output.push_str(&format!("Category:  {}\n", goal.category.label()));
    output.push_str(&format!("Priority:  {}\n", goal.priority));
    output.push_str(&format!(
        "Saved:     {} of {} ({})\n",
        format_currency(goal.current_amount, symbol),
        format_currency(goal.target_amount, symbol),
        format_percentage(goal.progress())
    ));
    output.push_str(&format!("Remaining: {}\n", format_currency(goal.remaining(), symbol)));
    if let Some(date) = goal.target_date {
        output.push_str(&format!("Target:    {}\n", format_date_long(date)));
    }
    output.push_str(&format!("Status:    {}\n", goal.status));

    output
}
