//! The mission state machine.
//!
//! ```text
//! resting ──load──▶ loading ──start-mission──▶ on-mission
//!    ▲                                             │
//!    └──────────────── end-mission ────────────────┘
//! ```
//!
//! Each transition reads the mover, checks its source state, builds the next
//! mover and its log entry, and commits both through one conditional
//! [`MoverStore::save_mover`]. A rejected or conflicting transition writes
//! nothing.

use uuid::Uuid;

use crate::audit::{self, AuditLog};
use crate::error::{FleetError, Result};
use crate::model::{Action, Item, Mover, QuestState, Weight};
use crate::planner;
use crate::storage::{ItemStore, LogStore, MoverStore, StorageError};

/// Fleet operations over an injected store.
pub struct Fleet<'a, S> {
    store: &'a S,
}

impl<'a, S> Fleet<'a, S>
where
    S: MoverStore + ItemStore + LogStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Read and reset access to the mission log.
    pub fn audit_log(&self) -> AuditLog<'a, S> {
        AuditLog::new(self.store)
    }

    // ── Movers ──

    /// Commissions a new mover, resting with an empty hold.
    pub fn create_mover(&self, name: &str, weight_limit: f64) -> Result<Mover> {
        let name = require_name(name, "mover")?;
        let weight_limit = Weight::try_from(weight_limit)
            .map_err(|e| FleetError::InvalidInput(format!("invalid weight limit: {e}")))?;

        let mover = Mover::new(name, weight_limit);
        self.store.insert_mover(&mover)?;
        tracing::info!(mover = %mover.id, name = %mover.name, limit = %mover.weight_limit, "mover created");
        Ok(mover)
    }

    /// All movers, most completed missions first.
    pub fn list_movers(&self) -> Result<Vec<Mover>> {
        Ok(self.store.list_movers()?)
    }

    /// Administrative reset. Returns how many movers were removed.
    pub fn clear_movers(&self) -> Result<usize> {
        let removed = self.store.clear_movers()?;
        tracing::info!(removed, "movers cleared");
        Ok(removed)
    }

    /// Puts `item_ids` on board a resting mover.
    ///
    /// The state is checked before the items, so a busy mover reports
    /// [`FleetError::InvalidState`] whatever the item list holds.
    pub fn load(&self, mover_id: Uuid, item_ids: &[Uuid]) -> Result<Mover> {
        self.transition(mover_id, QuestState::Resting, Action::Loading, |prior| {
            let plan = planner::plan_load(self.store, prior, item_ids)?;
            tracing::debug!(mover = %prior.id, total = plan.total_weight, "load fits");

            let mut next = prior.clone();
            next.state = QuestState::Loading;
            next.carried_items = plan.item_ids;
            Ok(next)
        })
    }

    /// Sends a loaded mover out with its cargo.
    pub fn start_mission(&self, mover_id: Uuid) -> Result<Mover> {
        self.transition(
            mover_id,
            QuestState::Loading,
            Action::StartingMission,
            |prior| {
                let mut next = prior.clone();
                next.state = QuestState::OnMission;
                Ok(next)
            },
        )
    }

    /// Brings a mover home: unloads it and counts the mission.
    ///
    /// The log entry records the cargo the mover returned with.
    pub fn end_mission(&self, mover_id: Uuid) -> Result<Mover> {
        self.transition(
            mover_id,
            QuestState::OnMission,
            Action::EndingMission,
            |prior| {
                let mut next = prior.clone();
                next.state = QuestState::Resting;
                next.completed_missions += 1;
                next.carried_items.clear();
                Ok(next)
            },
        )
    }

    // ── Items ──

    pub fn create_item(&self, name: &str, weight: f64) -> Result<Item> {
        let name = require_name(name, "item")?;
        let weight = Weight::try_from(weight)
            .map_err(|e| FleetError::InvalidInput(format!("invalid item weight: {e}")))?;

        let item = Item::new(name, weight);
        self.store.insert_item(&item)?;
        tracing::info!(item = %item.id, name = %item.name, weight = %item.weight, "item created");
        Ok(item)
    }

    pub fn list_items(&self) -> Result<Vec<Item>> {
        Ok(self.store.list_items()?)
    }

    pub fn clear_items(&self) -> Result<usize> {
        let removed = self.store.clear_items()?;
        tracing::info!(removed, "items cleared");
        Ok(removed)
    }

    /// Runs one transition from `required` to whatever `advance` produces.
    ///
    /// The log entry snapshots the items the mover held *before* the
    /// transition, except for a load, where it records what was loaded.
    fn transition(
        &self,
        mover_id: Uuid,
        required: QuestState,
        action: Action,
        advance: impl FnOnce(&Mover) -> Result<Mover>,
    ) -> Result<Mover> {
        let prior = self
            .store
            .load_mover(mover_id)?
            .ok_or(FleetError::MoverNotFound(mover_id))?;
        if prior.state != required {
            return Err(FleetError::InvalidState {
                actual: prior.state,
                required,
            });
        }

        let next = advance(&prior)?;
        let logged = match action {
            Action::Loading => &next.carried_items,
            Action::StartingMission | Action::EndingMission => &prior.carried_items,
        };
        let entry = audit::entry(&next, action, logged);

        match self.store.save_mover(&prior, &next, &entry) {
            Ok(()) => {
                tracing::info!(
                    mover = %next.id,
                    action = %action,
                    state = %next.state,
                    items = entry.item_ids.len(),
                    "transition committed"
                );
                Ok(next)
            }
            Err(StorageError::Conflict(_)) => {
                tracing::warn!(mover = %mover_id, action = %action, "transition lost a race");
                match self.store.load_mover(mover_id)? {
                    Some(current) => Err(FleetError::InvalidState {
                        actual: current.state,
                        required,
                    }),
                    None => Err(FleetError::MoverNotFound(mover_id)),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn require_name<'n>(name: &'n str, what: &str) -> Result<&'n str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(FleetError::InvalidInput(format!("{what} name is required")));
    }
    Ok(name)
}
