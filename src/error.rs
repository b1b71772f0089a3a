//! Errors surfaced by fleet operations.

use uuid::Uuid;

use crate::model::QuestState;
use crate::storage::StorageError;

/// Why a fleet operation was refused or failed.
///
/// Every variant carries enough detail to explain itself; nothing is retried
/// or swallowed before it reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error("mover not found: {0}")]
    MoverNotFound(Uuid),

    #[error("mover is {actual}, must be {required}")]
    InvalidState {
        actual: QuestState,
        required: QuestState,
    },

    /// Item ids that don't resolve to one distinct stored item each.
    #[error("{}", describe_unknown(.missing, .duplicated))]
    UnknownItem {
        missing: Vec<Uuid>,
        duplicated: Vec<Uuid>,
    },

    #[error("total weight {total} exceeds the mover's limit of {limit}")]
    CapacityExceeded { total: f64, limit: f64 },

    #[error("{0}")]
    InvalidInput(String),

    #[error("storage failure: {0}")]
    Store(#[from] StorageError),
}

pub type Result<T> = core::result::Result<T, FleetError>;

impl FleetError {
    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MoverNotFound(_) => "not-found",
            Self::InvalidState { .. } => "invalid-state",
            Self::UnknownItem { .. } => "unknown-item",
            Self::CapacityExceeded { .. } => "capacity-exceeded",
            Self::InvalidInput(_) => "invalid-input",
            Self::Store(_) => "store-failure",
        }
    }

    /// The HTTP status a request surface should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::MoverNotFound(_) => 404,
            Self::InvalidState { .. }
            | Self::UnknownItem { .. }
            | Self::CapacityExceeded { .. }
            | Self::InvalidInput(_) => 400,
            Self::Store(_) => 500,
        }
    }
}

fn describe_unknown(missing: &[Uuid], duplicated: &[Uuid]) -> String {
    let join = |ids: &[Uuid]| {
        ids.iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    match (missing.is_empty(), duplicated.is_empty()) {
        (false, true) => format!("unknown items: {}", join(missing)),
        (true, false) => format!("duplicate items: {}", join(duplicated)),
        _ => format!(
            "unknown items: {}; duplicate items: {}",
            join(missing),
            join(duplicated)
        ),
    }
}
