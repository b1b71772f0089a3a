//! Mover commands: new, list, load, start, end, clear.

use clap::Subcommand;

use crate::{mission::Fleet, storage::Storage};

use super::format::{format_cleared, format_mover};
use super::{CommandResult, Output, parse_item_ids, resolve_mover};

#[derive(Debug, Subcommand)]
pub enum MoverCommand {
    /// Commission a new mover. Prints the mover.
    New {
        /// What to call it.
        name: String,

        /// The most weight it can carry. Fixed for the mover's lifetime.
        #[arg(long)]
        weight_limit: f64,
    },

    /// List movers, most completed missions first.
    List,

    /// Load items onto a resting mover.
    Load {
        /// Mover ID: full UUID or unambiguous prefix.
        mover: String,

        /// Item IDs (full UUIDs), each at most once.
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Send a loaded mover on its mission.
    Start {
        /// Mover ID: full UUID or unambiguous prefix.
        mover: String,
    },

    /// End a mover's mission: unload it and count the mission.
    End {
        /// Mover ID: full UUID or unambiguous prefix.
        mover: String,
    },

    /// Delete every mover.
    Clear,
}

pub(super) fn run(fleet: &Fleet<'_, Storage>, out: Output, command: MoverCommand) -> CommandResult {
    match command {
        MoverCommand::New { name, weight_limit } => {
            let mover = fleet.create_mover(&name, weight_limit)?;
            out.emit(&mover, || mover.id.to_string())?;
        }
        MoverCommand::List => {
            let movers = fleet.list_movers()?;
            out.emit(&movers, || {
                if movers.is_empty() {
                    "No movers".to_string()
                } else {
                    movers
                        .iter()
                        .map(format_mover)
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            })?;
        }
        MoverCommand::Load { mover, items } => {
            let id = resolve_mover(fleet, &mover)?;
            let items = parse_item_ids(&items)?;
            let mover = fleet.load(id, &items)?;
            out.emit(&mover, || format_mover(&mover))?;
        }
        MoverCommand::Start { mover } => {
            let id = resolve_mover(fleet, &mover)?;
            let mover = fleet.start_mission(id)?;
            out.emit(&mover, || format_mover(&mover))?;
        }
        MoverCommand::End { mover } => {
            let id = resolve_mover(fleet, &mover)?;
            let mover = fleet.end_mission(id)?;
            out.emit(&mover, || format_mover(&mover))?;
        }
        MoverCommand::Clear => {
            let removed = fleet.clear_movers()?;
            out.emit(
                &serde_json::json!({ "cleared": removed }),
                || format_cleared(removed, "mover", "movers"),
            )?;
        }
    }
    Ok(())
}
