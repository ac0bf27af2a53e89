//! Goal service
//!
//! Create, fund, list and delete savings goals.

use chrono::NaiveDate;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{next_id, FinancialGoal, GoalCategory, GoalId, GoalPriority, GoalStatus, Money};
use crate::storage::Storage;

/// Service for financial goal management
pub struct GoalService<'a> {
    storage: &'a Storage,
}

/// Input for creating a goal
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    pub title: String,
    pub description: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub category: GoalCategory,
    pub priority: GoalPriority,
    pub target_date: Option<NaiveDate>,
}

impl CreateGoalInput {
    pub fn new(title: impl Into<String>, target_amount: Money) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            target_amount,
            current_amount: Money::zero(),
            category: GoalCategory::default(),
            priority: GoalPriority::default(),
            target_date: None,
        }
    }
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a goal
    pub fn create(&self, input: CreateGoalInput) -> FinanceResult<FinancialGoal> {
        let id = next_id(self.storage.goals.ids()?);
        let mut goal = FinancialGoal::new(id, input.title.trim(), input.target_amount);
        goal.description = input.description;
        goal.category = input.category;
        goal.priority = input.priority;
        goal.target_date = input.target_date;
        goal.contribute(input.current_amount);

        goal.validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        Ok(goal)
    }

    pub fn get(&self, id: GoalId) -> FinanceResult<Option<FinancialGoal>> {
        self.storage.goals.get(id)
    }

    /// Find a goal by ID string or exact title (case-insensitive)
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<FinancialGoal>> {
        if let Ok(id) = identifier.trim().parse::<GoalId>() {
            if let Some(goal) = self.storage.goals.get(id)? {
                return Ok(Some(goal));
            }
        }

        let wanted = identifier.trim().to_lowercase();
        Ok(self
            .storage
            .goals
            .get_all()?
            .into_iter()
            .find(|g| g.title.to_lowercase() == wanted))
    }

    /// All goals, newest first, optionally filtered by status
    pub fn list(&self, status: Option<GoalStatus>) -> FinanceResult<Vec<FinancialGoal>> {
        let mut goals = self.storage.goals.get_all()?;
        if let Some(status) = status {
            goals.retain(|g| g.status == status);
        }
        Ok(goals)
    }

    /// Add money to a goal
    pub fn add_funds(&self, id: GoalId, amount: Money) -> FinanceResult<FinancialGoal> {
        if !amount.is_positive() {
            return Err(FinanceError::Validation(
                "Contribution must be greater than zero".into(),
            ));
        }

        let mut goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| FinanceError::goal_not_found(id.to_string()))?;

        let was_completed = goal.status == GoalStatus::Completed;
        goal.contribute(amount);
        if !was_completed && goal.status == GoalStatus::Completed {
            tracing::info!(goal = %goal.id, "goal reached its target");
        }

        self.storage.goals.upsert(goal.clone())?;
        self.storage.goals.save()?;

        Ok(goal)
    }

    pub fn delete(&self, id: GoalId) -> FinanceResult<FinancialGoal> {
        let goal = self
            .storage
            .goals
            .get(id)?
            .ok_or_else(|| FinanceError::goal_not_found(id.to_string()))?;

        self.storage.goals.delete(id)?;
        self.storage.goals.save()?;

        Ok(goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::seed_demo_data;

    #[test]
    fn test_create_goal() {
        let storage = Storage::in_memory();
        let service = GoalService::new(&storage);

        let goal = service
            .create(CreateGoalInput::new("Vacation", Money::from_cents(300_000)))
            .unwrap();
        assert_eq!(goal.id, GoalId::new(1));
        assert_eq!(goal.status, GoalStatus::InProgress);
        assert_eq!(goal.progress(), 0.0);
    }

    #[test]
    fn test_create_validation() {
        let storage = Storage::in_memory();
        let service = GoalService::new(&storage);

        assert!(service
            .create(CreateGoalInput::new("", Money::from_cents(100)))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(CreateGoalInput::new("Bike", Money::zero()))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_add_funds_completes_goal() {
        let storage = Storage::in_memory();
        seed_demo_data(&storage).unwrap();
        let service = GoalService::new(&storage);

        let goal = service.add_funds(GoalId::new(1), Money::from_cents(500_000)).unwrap();
        assert_eq!(goal.status, GoalStatus::InProgress);

        let goal = service.add_funds(GoalId::new(1), Money::from_cents(200_000)).unwrap();
        assert_eq!(goal.status, GoalStatus::Completed);
        assert_eq!(goal.progress(), 100.0);

        assert!(service
            .add_funds(GoalId::new(1), Money::zero())
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_find_and_delete() {
        let storage = Storage::in_memory();
        seed_demo_data(&storage).unwrap();
        let service = GoalService::new(&storage);

        let car = service.find("new car").unwrap().unwrap();
        assert_eq!(car.id, GoalId::new(2));

        service.delete(car.id).unwrap();
        assert_eq!(service.list(None).unwrap().len(), 1);
        assert!(service.delete(car.id).unwrap_err().is_not_found());
    }
}
