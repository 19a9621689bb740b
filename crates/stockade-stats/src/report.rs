//! Report shapes handed back to the API layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::FieldKind;

/// One distinct value of a field with its occurrence count and share.
///
/// `percentage` is `count / total item count * 100`, rounded to two decimal
/// places — the denominator is the inventory's item count, not the filled
/// count, so the shares of a sparsely filled field do not sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopValue {
    pub value: String,
    pub count: u64,
    pub percentage: Decimal,
}

/// Descriptive statistics for one field.
///
/// The four numeric summaries are only present for `Number` fields with at
/// least one filled value; `top_values` is only populated for text-like and
/// boolean fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStatistics {
    pub field_id: Uuid,
    pub field_name: String,
    pub field_kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<Decimal>,
    pub filled_count: u64,
    pub empty_count: u64,
    pub top_values: Vec<TopValue>,
}

/// The full statistics report for one inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub total_items: u64,
    pub total_likes: u64,
    pub total_comments: u64,
    pub view_count: u64,
    pub field_statistics: Vec<FieldStatistics>,
}
