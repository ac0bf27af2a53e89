//! Transaction filtering and pagination
//!
//! Mirrors the filter keys the transaction service accepts: type, category,
//! description search, date range, and page/page-size.

use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, DateRange, EntryKind, Transaction};

/// Default page size for paginated transaction listings
pub const DEFAULT_PER_PAGE: usize = 15;

/// Filter for transaction queries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<EntryKind>,
    pub category_id: Option<CategoryId>,
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    /// Inclusive date window
    pub date_range: Option<DateRange>,
    /// 1-based page number; `None` returns every match on one page
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl TransactionFilter {
    /// A filter that matches every transaction
    pub fn all() -> Self {
        Self::default()
    }

    /// Every transaction inside `range`
    pub fn in_range(range: DateRange) -> Self {
        Self {
            date_range: Some(range),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_page(mut self, page: usize, per_page: usize) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    /// Check whether a single transaction passes the non-paging criteria
    pub fn matches(&self, txn: &Transaction) -> bool {
        if self.kind.is_some_and(|kind| txn.kind != kind) {
            return false;
        }
        if self.category_id.is_some_and(|id| txn.category_id != id) {
            return false;
        }
        if let Some(range) = &self.date_range {
            if !range.contains(txn.transaction_date) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !needle.is_empty() && !txn.description.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Filter, sort newest first, and paginate
    pub fn apply(&self, transactions: Vec<Transaction>) -> Page<Transaction> {
        let mut matched: Vec<Transaction> =
            transactions.into_iter().filter(|t| self.matches(t)).collect();
        matched.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then(b.id.cmp(&a.id))
        });

        match self.page {
            Some(page) => Page::paginate(matched, page, self.per_page.unwrap_or(DEFAULT_PER_PAGE)),
            None => Page::single(matched),
        }
    }
}

/// One page of results plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: usize,
    pub last_page: usize,
    pub per_page: usize,
    pub total: usize,
    /// 1-based index of the first item on this page (0 when empty)
    pub from: usize,
    /// 1-based index of the last item on this page (0 when empty)
    pub to: usize,
}

impl<T> Page<T> {
    /// Everything on one page
    pub fn single(data: Vec<T>) -> Self {
        let total = data.len();
        Self {
            data,
            current_page: 1,
            last_page: 1,
            per_page: total.max(1),
            total,
            from: if total == 0 { 0 } else { 1 },
            to: total,
        }
    }

    /// Slice out page `page` (1-based, clamped to the valid range)
    pub fn paginate(items: Vec<T>, page: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total = items.len();
        let last_page = total.div_ceil(per_page).max(1);
        let current_page = page.clamp(1, last_page);
        let start = (current_page - 1) * per_page;

        let data: Vec<T> = items.into_iter().skip(start).take(per_page).collect();
        let (from, to) = if data.is_empty() {
            (0, 0)
        } else {
            (start + 1, start + data.len())
        };

        Self {
            data,
            current_page,
            last_page,
            per_page,
            total,
            from,
            to,
        }
    }
}
