//! Merge validated candidates into a ranked result set.

use crate::models::{ResultSet, ValidatedResult};
use std::collections::HashMap;

/// Collapse duplicate locator strings and rank by reliability.
///
/// A duplicate replaces the kept entry only when it is strictly more
/// reliable, so ties keep the first one seen; the survivor stays in the slot
/// of the first occurrence. The sort is stable, so equal scores keep
/// emission order.
pub fn aggregate(results: Vec<ValidatedResult>) -> ResultSet {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(results.len());
    let mut kept: Vec<ValidatedResult> = Vec::with_capacity(results.len());

    for result in results {
        match slots.get(result.locator()) {
            Some(&slot) => {
                if result.reliability() > kept[slot].reliability() {
                    kept[slot] = result;
                }
            }
            None => {
                slots.insert(result.locator().to_string(), kept.len());
                kept.push(result);
            }
        }
    }

    kept.sort_by(|a, b| b.reliability().total_cmp(&a.reliability()));
    ResultSet::from_ranked(kept)
}
