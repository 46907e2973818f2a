//! Alert deduplication.
//!
//! Two key granularities exist on purpose, one per call site: the
//! recent-batch path collapses per (patient, category) and presents the
//! survivors critical-first, while the full-sweep path collapses per
//! (patient, category, title) and keeps the survivors in the order they
//! arrived. Both keep the highest-priority alert for a key and let ties
//! fall to the first-seen entry, so both are idempotent.

use std::collections::HashMap;

use crate::models::Alert;

/// Collapse to one alert per (patient, category), sorted critical-first.
pub fn dedup_by_category(alerts: Vec<Alert>) -> Vec<Alert> {
    let mut result = collapse(alerts, |alert| (alert.patient_id, alert.category));
    result.sort_by_key(|alert| alert.priority.rank());
    result
}

/// Collapse to one alert per (patient, category, title), preserving
/// insertion order.
pub fn dedup_by_title(alerts: Vec<Alert>) -> Vec<Alert> {
    collapse(alerts, |alert| {
        (alert.patient_id, alert.category, alert.title.clone())
    })
}

/// Keep the highest-priority alert per key, first-seen on ties, in
/// first-seen position.
fn collapse<K, F>(alerts: Vec<Alert>, key_of: F) -> Vec<Alert>
where
    K: std::hash::Hash + Eq,
    F: Fn(&Alert) -> K,
{
    let mut kept: Vec<Alert> = Vec::new();
    let mut index_by_key: HashMap<K, usize> = HashMap::new();

    for alert in alerts {
        match index_by_key.get(&key_of(&alert)) {
            None => {
                index_by_key.insert(key_of(&alert), kept.len());
                kept.push(alert);
            }
            Some(&index) => {
                // Strictly more severe replaces; equal severity keeps first-seen.
                if alert.priority.rank() < kept[index].priority.rank() {
                    kept[index] = alert;
                }
            }
        }
    }

    kept
}
