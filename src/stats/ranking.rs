use std::cmp::Ordering;

use crate::config::TieBreakKeys;

use super::StatTable;

/// Sorts the table descending by the tie-break tuple and stores each entity's
/// 1-based position as its rank. The sort is stable: entities that tie on
/// every key keep their current relative order.
pub fn assign_ranks(table: &mut StatTable, keys: &TieBreakKeys) {
    let mut keyed: Vec<(String, Vec<f64>)> = table
        .iter()
        .map(|(id, record)| (id.to_string(), keys.key_for(record)))
        .collect();

    keyed.sort_by(|a, b| compare_keys(&b.1, &a.1));

    let order: Vec<String> = keyed.into_iter().map(|(id, _)| id).collect();
    for (position, id) in order.iter().enumerate() {
        if let Some(record) = table.get_mut(id) {
            record.rank = position as u32 + 1;
        }
    }
    table.set_order(order);
}

fn compare_keys(a: &[f64], b: &[f64]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.partial_cmp(y).unwrap_or(Ordering::Equal))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
