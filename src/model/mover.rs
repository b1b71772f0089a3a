//! Mover types: fleet units and their mission lifecycle state.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Weight;

/// A fleet unit with a weight capacity and a mission lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mover {
    pub id: Uuid,
    pub name: String,

    /// Fixed at creation.
    pub weight_limit: Weight,

    pub state: QuestState,

    /// Only grows, by one per ended mission.
    pub completed_missions: u64,

    /// Empty while resting. Unique ids; order carries no meaning.
    pub carried_items: Vec<Uuid>,

    pub created_at: Timestamp,
}

impl Mover {
    /// A freshly commissioned mover: resting, empty, no missions.
    pub fn new(name: impl Into<String>, weight_limit: Weight) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            weight_limit,
            state: QuestState::Resting,
            completed_missions: 0,
            carried_items: Vec::new(),
            created_at: Timestamp::now(),
        }
    }
}

/// Where a mover stands in its mission cycle.
///
/// `Resting → Loading → OnMission → Resting`, with no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestState {
    /// Idle with an empty hold.
    Resting,

    /// Cargo on board, not yet departed.
    Loading,

    /// Out on a mission with its cargo.
    OnMission,
}

impl QuestState {
    /// The stable name used in storage and output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resting => "resting",
            Self::Loading => "loading",
            Self::OnMission => "on-mission",
        }
    }

    /// Parses a stored name back into a state.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "resting" => Some(Self::Resting),
            "loading" => Some(Self::Loading),
            "on-mission" => Some(Self::OnMission),
            _ => None,
        }
    }
}

impl fmt::Display for QuestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
