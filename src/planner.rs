//! Load planning: deciding whether a mover can take a set of items.
//!
//! Planning only reads. The accepted [`LoadPlan`] is handed back to the
//! state machine, which commits it.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::error::{FleetError, Result};
use crate::model::{Mover, Weight};
use crate::storage::ItemStore;

/// A load that fits: distinct, known items within the mover's limit.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadPlan {
    /// Item ids in the order they were requested.
    pub item_ids: Vec<Uuid>,

    /// Sum of the items' weights.
    pub total_weight: f64,
}

/// Checks `item_ids` against the catalog and `mover`'s weight limit.
///
/// Rejections, in order of precedence:
/// - empty list: [`FleetError::InvalidInput`]
/// - repeated or unresolvable ids: [`FleetError::UnknownItem`], naming all of them
/// - total above the limit: [`FleetError::CapacityExceeded`]
///
/// A total exactly at the limit fits.
pub fn plan_load(items: &impl ItemStore, mover: &Mover, item_ids: &[Uuid]) -> Result<LoadPlan> {
    if item_ids.is_empty() {
        return Err(FleetError::InvalidInput(
            "at least one item is required to load".to_string(),
        ));
    }

    let (distinct, duplicated) = split_repeats(item_ids);

    let weights: HashMap<Uuid, Weight> = items
        .find_items(&distinct)?
        .into_iter()
        .map(|item| (item.id, item.weight))
        .collect();

    let missing: Vec<Uuid> = distinct
        .iter()
        .copied()
        .filter(|id| !weights.contains_key(id))
        .collect();

    if !missing.is_empty() || !duplicated.is_empty() {
        return Err(FleetError::UnknownItem {
            missing,
            duplicated,
        });
    }

    let total_weight: f64 = item_ids.iter().map(|id| weights[id]).sum();
    let limit = mover.weight_limit.get();
    if total_weight > limit {
        return Err(FleetError::CapacityExceeded {
            total: total_weight,
            limit,
        });
    }

    Ok(LoadPlan {
        item_ids: item_ids.to_vec(),
        total_weight,
    })
}

/// Splits `ids` into each id once, in first-seen order, and the ids that
/// appear more than once, in first-repeat order.
fn split_repeats(ids: &[Uuid]) -> (Vec<Uuid>, Vec<Uuid>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut distinct = Vec::new();
    let mut repeated = Vec::new();
    for &id in ids {
        if seen.insert(id) {
            distinct.push(id);
        } else if reported.insert(id) {
            repeated.push(id);
        }
    }
    (distinct, repeated)
}
