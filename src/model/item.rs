//! Item: a unit of cargo.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Weight;

/// A unit of cargo with a fixed weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub weight: Weight,
    pub created_at: Timestamp,
}

impl Item {
    pub fn new(name: impl Into<String>, weight: Weight) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            weight,
            created_at: Timestamp::now(),
        }
    }
}
