//! JSON Export functionality
//!
//! Exports every record set as one versioned snapshot. Budgets are
//! exported with spending derived for the period that contains the
//! snapshot date.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Budget, Category, DateRange, FinancialGoal, Money, Transaction};
use crate::services::derive_statuses;
use crate::storage::{DataSource, TransactionFilter};

/// Current snapshot schema version
pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the snapshot
    pub app_version: String,

    /// Transactions, newest first
    pub transactions: Vec<Transaction>,

    pub categories: Vec<Category>,

    pub budgets: Vec<BudgetSnapshot>,

    pub goals: Vec<FinancialGoal>,

    pub metadata: SnapshotMetadata,
}

/// A budget with the spending derived for its current period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    pub budget: Budget,
    pub category_name: String,
    pub window: DateRange,
    pub spent: Money,
    pub remaining: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub transaction_count: usize,
    pub category_count: usize,
    pub budget_count: usize,
    pub goal_count: usize,

    /// Earliest transaction date
    pub earliest_transaction: Option<NaiveDate>,

    /// Latest transaction date
    pub latest_transaction: Option<NaiveDate>,
}

impl Snapshot {
    /// Fetch every record set and derive budget spending as of `as_of`
    pub fn from_source(source: &dyn DataSource, as_of: NaiveDate) -> FinanceResult<Self> {
        let transactions = source
            .fetch_transactions(&TransactionFilter::all())?
            .data;
        let categories = source.fetch_categories()?;
        let budgets = source.fetch_budgets()?;
        let goals = source.fetch_goals()?;

        let budgets: Vec<BudgetSnapshot> = budgets
            .iter()
            .flat_map(|budget| {
                let window = budget.period.to_date(as_of);
                derive_statuses(std::slice::from_ref(budget), &categories, &transactions, &window)
                    .into_iter()
                    .map(move |status| BudgetSnapshot {
                        remaining: status.remaining(),
                        spent: status.spent,
                        category_name: status.category_name,
                        budget: status.budget,
                        window,
                    })
            })
            .collect();

        let metadata = SnapshotMetadata {
            transaction_count: transactions.len(),
            category_count: categories.len(),
            budget_count: budgets.len(),
            goal_count: goals.len(),
            earliest_transaction: transactions.iter().map(|t| t.transaction_date).min(),
            latest_transaction: transactions.iter().map(|t| t.transaction_date).max(),
        };

        Ok(Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            categories,
            budgets,
            goals,
            metadata,
        })
    }

    /// Check the schema version and that budgets point at known categories
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                SNAPSHOT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let category_ids: HashSet<_> = self.categories.iter().map(|c| c.id).collect();
        for entry in &self.budgets {
            if !category_ids.contains(&entry.budget.category_id) {
                return Err(format!(
                    "Budget {} references unknown category {}",
                    entry.budget.id, entry.budget.category_id
                ));
            }
        }

        Ok(())
    }
}

/// Export a snapshot to JSON
pub fn export_snapshot_json<W: Write>(
    source: &dyn DataSource,
    as_of: NaiveDate,
    writer: &mut W,
    pretty: bool,
) -> FinanceResult<()> {
    let snapshot = Snapshot::from_source(source, as_of)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &snapshot)
    } else {
        serde_json::to_writer(writer, &snapshot)
    }
    .map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}
