//! Loose record shapes accepted from data files and legacy services
//!
//! Amounts arrive as numbers or strings, categories as ids or nested
//! objects, dates as plain dates or timestamps. Nothing here is trusted;
//! see `ingest::normalize_*` for the conversion into strict models.

use serde::{Deserialize, Serialize};

/// An amount as a JSON number or as text ("150.00", "$1,234.50")
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

/// A nested category object as embedded in legacy transaction/budget records
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RawCategoryStub {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// An identifier as a number or as numeric text
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// A category reference: either a bare id or a nested object
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum RawCategoryRef {
    Id(RawId),
    Nested(RawCategoryStub),
}

impl RawCategoryRef {
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Id(id) => id.as_u64(),
            Self::Nested(stub) => stub.id.as_ref().and_then(RawId::as_u64),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTransaction {
    pub id: Option<RawId>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub amount: Option<RawAmount>,
    pub category_id: Option<RawCategoryRef>,
    pub category: Option<RawCategoryRef>,
    pub description: Option<String>,
    #[serde(alias = "date")]
    pub transaction_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawCategory {
    pub id: Option<RawId>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub color: Option<String>,
}

/// Legacy budgets also carry cached `spent`/`remaining`/`percentage` fields
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawBudget {
    pub id: Option<RawId>,
    pub category_id: Option<RawCategoryRef>,
    pub category: Option<RawCategoryRef>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<RawAmount>,
    pub spent: Option<RawAmount>,
    pub remaining: Option<RawAmount>,
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawGoal {
    pub id: Option<RawId>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "targetAmount")]
    pub target_amount: Option<RawAmount>,
    #[serde(alias = "currentAmount")]
    pub current_amount: Option<RawAmount>,
    pub category: Option<String>,
    pub priority: Option<String>,
    #[serde(alias = "targetDate")]
    pub target_date: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: Option<String>,
}
