//! Normalization boundary
//!
//! Converts loosely-shaped records into the strict models. Everything past
//! this module assumes well-typed input. Anomalies are repaired locally and
//! logged: a bad amount becomes zero, a record without a usable date or
//! direction is skipped, and no single record can fail the whole load.

pub mod raw;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use crate::models::{
    Budget, BudgetId, BudgetPeriod, Category, CategoryId, EntryKind, FinancialGoal, GoalId, Money,
    Transaction, TransactionId, DEFAULT_CATEGORY_COLOR,
};

pub use raw::{RawAmount, RawBudget, RawCategory, RawCategoryRef, RawGoal, RawId, RawTransaction};

/// Category id used when a record carries no category reference at all;
/// it never resolves, so aggregation labels it "Uncategorized".
pub const UNRESOLVED_CATEGORY: CategoryId = CategoryId::new(0);

/// Coerce an optional raw amount to money; anything unusable is zero
pub fn normalize_amount(raw: Option<&RawAmount>) -> Money {
    let parsed = match raw {
        None => return Money::zero(),
        Some(RawAmount::Number(n)) => Money::from_f64(*n),
        Some(RawAmount::Text(s)) => Money::parse(s).ok(),
    };

    parsed.unwrap_or_else(|| {
        warn!(amount = ?raw, "unparseable amount, treating as zero");
        Money::zero()
    })
}

/// Parse `yyyy-MM-dd` or an RFC 3339 timestamp down to a calendar date
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

fn normalize_kind(raw: Option<&str>) -> Option<EntryKind> {
    raw.and_then(|s| s.parse().ok())
}

fn category_ref(primary: Option<&RawCategoryRef>, fallback: Option<&RawCategoryRef>) -> CategoryId {
    primary
        .and_then(RawCategoryRef::id)
        .or_else(|| fallback.and_then(RawCategoryRef::id))
        .map(CategoryId::new)
        .unwrap_or(UNRESOLVED_CATEGORY)
}

/// Hands out ids for records that arrived without one
struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    fn new<'a>(ids: impl Iterator<Item = Option<&'a RawId>>) -> Self {
        let max = ids.filter_map(|id| id.and_then(RawId::as_u64)).max().unwrap_or(0);
        Self { next: max + 1 }
    }

    fn resolve(&mut self, raw: Option<&RawId>) -> u64 {
        match raw.and_then(RawId::as_u64) {
            Some(id) => id,
            None => {
                let id = self.next;
                self.next += 1;
                id
            }
        }
    }
}

/// Normalize raw transactions, skipping records that cannot be salvaged
pub fn normalize_transactions(raws: Vec<RawTransaction>) -> Vec<Transaction> {
    let mut ids = IdAllocator::new(raws.iter().map(|r| r.id.as_ref()));

    raws.into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let Some(date) = raw.transaction_date.as_deref().and_then(normalize_date) else {
                warn!(index, "transaction without a valid date skipped");
                return None;
            };
            let Some(kind) = normalize_kind(raw.kind.as_deref()) else {
                warn!(index, kind = ?raw.kind, "transaction without a valid type skipped");
                return None;
            };

            let mut amount = normalize_amount(raw.amount.as_ref());
            if amount.is_negative() {
                debug!(index, "negative amount stored as magnitude");
                amount = amount.abs();
            }

            Some(Transaction::new(
                TransactionId::new(ids.resolve(raw.id.as_ref())),
                kind,
                amount,
                category_ref(raw.category_id.as_ref(), raw.category.as_ref()),
                raw.description.unwrap_or_default(),
                date,
            ))
        })
        .collect()
}

/// Normalize raw categories; nameless or untyped categories are skipped
pub fn normalize_categories(raws: Vec<RawCategory>) -> Vec<Category> {
    let mut ids = IdAllocator::new(raws.iter().map(|r| r.id.as_ref()));

    raws.into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let name = raw.name.as_deref().map(str::trim).unwrap_or_default();
            if name.is_empty() {
                warn!(index, "category without a name skipped");
                return None;
            }
            let Some(kind) = normalize_kind(raw.kind.as_deref()) else {
                warn!(index, name, "category without a valid type skipped");
                return None;
            };

            Some(Category::new(
                CategoryId::new(ids.resolve(raw.id.as_ref())),
                name,
                kind,
                raw.color.unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
            ))
        })
        .collect()
}

/// A normalized budget plus the `spent` value the legacy record had cached
#[derive(Debug, Clone, PartialEq)]
pub struct IngestedBudget {
    pub budget: Budget,
    pub cached_spent: Option<Money>,
}

/// Normalize raw budgets
///
/// The budget's kind follows its backing category when that category is
/// known. Cached `spent`/`remaining` values are never trusted; the cached
/// `spent` is returned only so callers can report drift.
pub fn normalize_budgets(raws: Vec<RawBudget>, categories: &[Category]) -> Vec<IngestedBudget> {
    let mut ids = IdAllocator::new(raws.iter().map(|r| r.id.as_ref()));

    raws.into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let limit = normalize_amount(raw.limit.as_ref());
            if !limit.is_positive() {
                warn!(index, "budget without a positive limit skipped");
                return None;
            }

            let category_id = category_ref(raw.category_id.as_ref(), raw.category.as_ref());
            let kind = categories
                .iter()
                .find(|c| c.id == category_id)
                .map(|c| c.kind)
                .or_else(|| normalize_kind(raw.kind.as_deref()))
                .unwrap_or_default();

            let period = raw
                .period
                .as_deref()
                .and_then(|p| p.parse::<BudgetPeriod>().ok())
                .unwrap_or_default();

            let mut budget = Budget::new(BudgetId::new(ids.resolve(raw.id.as_ref())), category_id, limit, period);
            budget.kind = kind;

            Some(IngestedBudget {
                budget,
                cached_spent: raw.spent.as_ref().map(|s| normalize_amount(Some(s))),
            })
        })
        .collect()
}

/// Log budgets whose cached `spent` disagrees with the recomputed value
pub fn report_spending_drift(ingested: &[IngestedBudget], transactions: &[Transaction], as_of: NaiveDate) {
    for item in ingested {
        let Some(cached) = item.cached_spent else {
            continue;
        };
        let window = item.budget.period.to_date(as_of);
        let actual = item.budget.spent_in(transactions, &window);
        if cached != actual {
            debug!(
                budget = %item.budget.id,
                cached = %cached,
                recomputed = %actual,
                "discarding stale cached budget spending"
            );
        }
    }
}

/// Normalize raw goals
pub fn normalize_goals(raws: Vec<RawGoal>) -> Vec<FinancialGoal> {
    let mut ids = IdAllocator::new(raws.iter().map(|r| r.id.as_ref()));

    raws.into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let title = raw.title.as_deref().map(str::trim).unwrap_or_default();
            let target = normalize_amount(raw.target_amount.as_ref());
            if title.is_empty() || !target.is_positive() {
                warn!(index, "goal without a title or positive target skipped");
                return None;
            }

            let mut goal = FinancialGoal::new(GoalId::new(ids.resolve(raw.id.as_ref())), title, target);
            goal.description = raw.description.unwrap_or_default();
            goal.current_amount = normalize_amount(raw.current_amount.as_ref()).abs();
            goal.category = raw
                .category
                .as_deref()
                .and_then(|c| c.parse().ok())
                .unwrap_or_default();
            goal.priority = raw
                .priority
                .as_deref()
                .and_then(|p| p.parse().ok())
                .unwrap_or_default();
            goal.target_date = raw.target_date.as_deref().and_then(normalize_date);
            if let Some(created) = raw.created_at.as_deref().and_then(parse_timestamp) {
                goal.created_at = created;
            }
            // Status is derived from the amounts, never taken on faith
            if goal.current_amount >= goal.target_amount {
                goal.status = crate::models::GoalStatus::Completed;
            }

            Some(goal)
        })
        .collect()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            normalize_date(raw)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}
