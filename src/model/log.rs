//! Log entries: the audit record of committed transitions.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An immutable record of one committed transition.
///
/// `item_ids` is a snapshot of the mover's hold at the moment of the action.
/// For an ended mission that is the cargo the mover came back with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: Uuid,
    pub mover_id: Uuid,
    pub item_ids: Vec<Uuid>,
    pub action: Action,
    pub timestamp: Timestamp,
}

/// What the mover did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "loading")]
    Loading,

    #[serde(rename = "starting mission")]
    StartingMission,

    #[serde(rename = "ending mission")]
    EndingMission,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::StartingMission => "starting mission",
            Self::EndingMission => "ending mission",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "loading" => Some(Self::Loading),
            "starting mission" => Some(Self::StartingMission),
            "ending mission" => Some(Self::EndingMission),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
