//! Financial goal model
//!
//! Savings goals with a target amount; progress is capped at 100% and a
//! goal is marked completed the first time it reaches its target.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::GoalId;
use super::money::Money;

/// What a goal is saving for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Emergency,
    Housing,
    Vehicle,
    Travel,
    Education,
    #[default]
    Other,
}

impl GoalCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Emergency => "Emergency Fund",
            Self::Housing => "Housing",
            Self::Vehicle => "Vehicle",
            Self::Travel => "Travel",
            Self::Education => "Education",
            Self::Other => "Other",
        }
    }
}

impl FromStr for GoalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emergency" => Ok(Self::Emergency),
            "housing" => Ok(Self::Housing),
            "vehicle" => Ok(Self::Vehicle),
            "travel" => Ok(Self::Travel),
            "education" => Ok(Self::Education),
            "other" | "" => Ok(Self::Other),
            other => Err(format!("Unknown goal category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for GoalPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("Unknown goal priority: {}", other)),
        }
    }
}

impl fmt::Display for GoalPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    #[default]
    InProgress,
    Completed,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "In Progress"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// A savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: GoalId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub target_amount: Money,
    #[serde(default)]
    pub current_amount: Money,
    #[serde(default)]
    pub category: GoalCategory,
    #[serde(default)]
    pub priority: GoalPriority,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: GoalStatus,
    pub created_at: DateTime<Utc>,
}

impl FinancialGoal {
    pub fn new(id: GoalId, title: impl Into<String>, target_amount: Money) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            target_amount,
            current_amount: Money::zero(),
            category: GoalCategory::default(),
            priority: GoalPriority::default(),
            target_date: None,
            status: GoalStatus::InProgress,
            created_at: Utc::now(),
        }
    }

    /// current / target as a percentage, capped at 100
    pub fn progress(&self) -> f64 {
        (self.current_amount.ratio_of(self.target_amount) * 100.0).clamp(0.0, 100.0)
    }

    /// Add a contribution; flips the status to completed on reaching the target
    pub fn contribute(&mut self, amount: Money) {
        self.current_amount += amount;
        if self.current_amount >= self.target_amount && self.status != GoalStatus::Completed {
            self.status = GoalStatus::Completed;
        }
    }

    pub fn remaining(&self) -> Money {
        let remaining = self.target_amount - self.current_amount;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent);
        }
        Ok(())
    }
}

impl fmt::Display for FinancialGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} / {} ({:.1}%)",
            self.title,
            self.current_amount,
            self.target_amount,
            self.progress()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GoalValidationError {
    #[error("Goal title cannot be empty")]
    EmptyTitle,
    #[error("Target amount must be greater than 0")]
    NonPositiveTarget,
    #[error("Current amount cannot be negative")]
    NegativeCurrent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_capped() {
        let mut goal = FinancialGoal::new(GoalId::new(1), "Emergency Fund", Money::from_cents(1_500_000));
        goal.current_amount = Money::from_cents(830_000);
        assert!((goal.progress() - 55.333).abs() < 0.001);

        goal.current_amount = Money::from_cents(2_000_000);
        assert_eq!(goal.progress(), 100.0);
        assert_eq!(goal.remaining(), Money::zero());
    }

    #[test]
    fn test_contribute_completes_goal() {
        let mut goal = FinancialGoal::new(GoalId::new(1), "New Car", Money::from_cents(10_000));
        goal.contribute(Money::from_cents(4_000));
        assert_eq!(goal.status, GoalStatus::InProgress);
        goal.contribute(Money::from_cents(6_000));
        assert_eq!(goal.status, GoalStatus::Completed);
    }

    #[test]
    fn test_validate() {
        let goal = FinancialGoal::new(GoalId::new(1), "Trip", Money::zero());
        assert_eq!(goal.validate(), Err(GoalValidationError::NonPositiveTarget));
        let goal = FinancialGoal::new(GoalId::new(1), "", Money::from_cents(1));
        assert_eq!(goal.validate(), Err(GoalValidationError::EmptyTitle));
    }
}
