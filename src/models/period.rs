//! Budget periods and report windows
//!
//! A `BudgetPeriod` is the recurrence a budget limit applies to; a
//! `DateRange` is the inclusive `[from, to]` window a report aggregates over.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recurrence window a budget limit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Weekly,
    #[default]
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    /// The period window that contains `date`
    ///
    /// Weeks start on Monday (ISO weeks).
    pub fn window_containing(&self, date: NaiveDate) -> DateRange {
        match self {
            Self::Weekly => {
                let offset = date.weekday().num_days_from_monday() as i64;
                let from = date - Duration::days(offset);
                DateRange::new(from, from + Duration::days(6))
            }
            Self::Monthly => DateRange::month_of(date),
            Self::Yearly => {
                let from = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
                let to = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
                DateRange::new(from, to)
            }
        }
    }

    /// Start of the period containing `date` through `date` itself
    pub fn to_date(&self, date: NaiveDate) -> DateRange {
        DateRange::new(self.window_containing(date).from, date)
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" | "week" => Ok(Self::Weekly),
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" => Ok(Self::Yearly),
            other => Err(format!("Unknown budget period: {}", other)),
        }
    }
}

/// Inclusive date window `[from, to]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Create a range; the endpoints are swapped if given out of order
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        if from <= to {
            Self { from, to }
        } else {
            Self { from: to, to: from }
        }
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let from = date.with_day(1).unwrap_or(date);
        let next_month = if date.month() == 12 {
            NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
        };
        let to = next_month.map(|d| d - Duration::days(1)).unwrap_or(date);
        Self { from, to }
    }

    /// Default report window: first day of `today`'s month through `today`
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self::new(today.with_day(1).unwrap_or(today), today)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Number of days in the window, inclusive
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }

    /// Output file name for this window: `<prefix>-<from>-to-<to>.<ext>`
    pub fn file_name(&self, prefix: &str, extension: &str) -> String {
        format!(
            "{}-{}-to-{}.{}",
            prefix,
            self.from.format("%Y-%m-%d"),
            self.to.format("%Y-%m-%d"),
            extension
        )
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}
