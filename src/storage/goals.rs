//! Goal repository
//!
//! Manages loading and saving financial goals to goals.json

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::ingest::{normalize_goals, RawGoal};
use crate::models::{FinancialGoal, GoalId};

use super::file_io::{read_json, write_json_atomic};
use super::table::Table;

#[derive(Debug, Default, Deserialize)]
struct RawGoalData {
    #[serde(default)]
    goals: Vec<RawGoal>,
}

#[derive(Debug, Serialize)]
struct GoalData<'a> {
    goals: &'a [FinancialGoal],
}

/// Repository for goal persistence
pub struct GoalRepository {
    path: Option<PathBuf>,
    table: Table<GoalId, FinancialGoal>,
}

impl GoalRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            table: Table::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            table: Table::new(),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let file_data: RawGoalData = read_json(path)?;
        let goals = normalize_goals(file_data.goals);
        self.table.replace_all(goals.into_iter().map(|g| (g.id, g)))
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let goals = self.table.all()?;
        write_json_atomic(path, &GoalData { goals: &goals })
    }

    pub fn get(&self, id: GoalId) -> Result<Option<FinancialGoal>, FinanceError> {
        self.table.get(id)
    }

    /// Goals, most recently created first
    pub fn get_all(&self) -> Result<Vec<FinancialGoal>, FinanceError> {
        let mut goals = self.table.all()?;
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(goals)
    }

    pub fn ids(&self) -> Result<Vec<GoalId>, FinanceError> {
        self.table.ids()
    }

    pub fn upsert(&self, goal: FinancialGoal) -> Result<(), FinanceError> {
        self.table.upsert(goal.id, goal)
    }

    pub fn delete(&self, id: GoalId) -> Result<bool, FinanceError> {
        Ok(self.table.remove(id)?.is_some())
    }
}
