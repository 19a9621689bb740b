//! Pure statistics computation over an inventory snapshot.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::{
    field::{Field, FieldKind, FieldValue, Item},
    report::{FieldStatistics, StatisticsReport, TopValue},
};

/// How many distinct values a field reports, descending by count.
const TOP_GROUPS: usize = 5;

/// Input for one statistics computation.
///
/// The comment count and view counter belong to the inventory record, not to
/// its items, so the collaborator passes them through; they are reported
/// alongside the computed values.
#[derive(Debug, Clone, Copy)]
pub struct StatsSnapshot<'a> {
    pub items: &'a [Item],
    pub fields: &'a [Field],
    pub total_comments: u64,
    pub view_count: u64,
}

/// Computes the statistics report for one inventory.
///
/// Pure: identical snapshots produce identical reports, including group
/// order (ties in count keep first-seen order).
pub fn compute(snapshot: &StatsSnapshot<'_>) -> StatisticsReport {
    let total_items = snapshot.items.len() as u64;
    StatisticsReport {
        total_items,
        total_likes: snapshot.items.iter().map(|item| item.like_count).sum(),
        total_comments: snapshot.total_comments,
        view_count: snapshot.view_count,
        field_statistics: snapshot
            .fields
            .iter()
            .map(|field| field_statistics(field, snapshot.items, total_items))
            .collect(),
    }
}

fn field_statistics(field: &Field, items: &[Item], total_items: u64) -> FieldStatistics {
    // Kind-mismatched payloads are filtered out here, so they count as empty.
    let filled: Vec<&FieldValue> = items
        .iter()
        .filter_map(|item| item.value_for(field))
        .collect();
    let filled_count = filled.len() as u64;

    let mut stats = FieldStatistics {
        field_id: field.id,
        field_name: field.name.clone(),
        field_kind: field.kind,
        average: None,
        min: None,
        max: None,
        sum: None,
        filled_count,
        empty_count: total_items - filled_count,
        top_values: Vec::new(),
    };

    match field.kind {
        FieldKind::Number => {
            let numbers: Vec<Decimal> = filled
                .iter()
                .filter_map(|value| match value {
                    FieldValue::Number(n) => Some(*n),
                    FieldValue::Text(_) | FieldValue::Boolean(_) => None,
                })
                .collect();
            if !numbers.is_empty() {
                let sum: Decimal = numbers.iter().copied().sum();
                stats.sum = Some(sum);
                stats.average = Some(sum / Decimal::from(numbers.len() as u64));
                stats.min = numbers.iter().copied().min();
                stats.max = numbers.iter().copied().max();
            }
        }
        FieldKind::Text | FieldKind::MultilineText => {
            stats.top_values = top_groups(
                filled.iter().filter_map(|value| match value {
                    FieldValue::Text(t) => Some(t.as_str()),
                    FieldValue::Number(_) | FieldValue::Boolean(_) => None,
                }),
                total_items,
            );
        }
        FieldKind::Boolean => {
            stats.top_values = top_groups(
                filled.iter().filter_map(|value| match value {
                    FieldValue::Boolean(b) => Some(if *b { "Yes" } else { "No" }),
                    FieldValue::Text(_) | FieldValue::Number(_) => None,
                }),
                total_items,
            );
        }
        // Link values get no distribution; filled/empty counts only.
        FieldKind::Link => {}
    }

    stats
}

/// Groups values by exact string equality (case-sensitive, no trimming) and
/// reports the top groups descending by count. The sort is stable, so equal
/// counts keep first-seen order.
fn top_groups<'a>(values: impl Iterator<Item = &'a str>, total_items: u64) -> Vec<TopValue> {
    let mut groups: Vec<(&str, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for value in values {
        match index.get(value) {
            Some(&i) => groups[i].1 += 1,
            None => {
                index.insert(value, groups.len());
                groups.push((value, 1));
            }
        }
    }

    groups.sort_by(|a, b| b.1.cmp(&a.1));
    groups.truncate(TOP_GROUPS);
    groups
        .into_iter()
        .map(|(value, count)| TopValue {
            value: value.to_owned(),
            count,
            percentage: percentage(count, total_items),
        })
        .collect()
}

/// `count / total * 100` in exact decimal arithmetic, rounded to two places.
fn percentage(count: u64, total_items: u64) -> Decimal {
    if total_items == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(count) * Decimal::ONE_HUNDRED / Decimal::from(total_items)).round_dp(2)
}
