//! The custom-field model statistics are computed over.
//!
//! Fields and values are plain data handed across the boundary by the data
//! layer; nothing here owns storage.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of custom field kinds an inventory can declare.
///
/// Every consumer matches on this enum exhaustively (no wildcard arms), so
/// adding a kind fails to compile until value parsing, display mapping, and
/// statistics all handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    MultilineText,
    Number,
    Link,
    Boolean,
}

/// A typed value stored for one item under one field.
///
/// At most one payload per item+field pair; a missing entry means the value
/// is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Boolean(bool),
}

impl FieldValue {
    /// Whether this payload agrees with the field's declared kind.
    ///
    /// `Text`, `MultilineText`, and `Link` fields all carry text payloads.
    /// A disagreeing payload is treated as empty by the aggregator, never as
    /// an error.
    pub fn matches_kind(&self, kind: FieldKind) -> bool {
        match kind {
            FieldKind::Text | FieldKind::MultilineText | FieldKind::Link => {
                matches!(self, FieldValue::Text(_))
            }
            FieldKind::Number => matches!(self, FieldValue::Number(_)),
            FieldKind::Boolean => matches!(self, FieldValue::Boolean(_)),
        }
    }
}

/// A custom field declared on an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: Uuid,
    pub name: String,
    pub kind: FieldKind,
}

/// An inventory item with its custom id, like tally, and field values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub custom_id: String,
    pub like_count: u64,
    /// Values keyed by field id.
    pub values: HashMap<Uuid, FieldValue>,
}

impl Item {
    /// The item's value for `field`, if present and of the declared kind.
    pub fn value_for(&self, field: &Field) -> Option<&FieldValue> {
        self.values
            .get(&field.id)
            .filter(|value| value.matches_kind(field.kind))
    }
}
