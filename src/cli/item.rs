//! Item commands: new, list, clear.

use clap::Subcommand;

use crate::{mission::Fleet, storage::Storage};

use super::format::{format_cleared, format_item};
use super::{CommandResult, Output};

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Add an item to the catalog. Prints the item ID.
    New {
        name: String,

        /// Fixed for the item's lifetime.
        #[arg(long)]
        weight: f64,
    },

    /// List items in creation order.
    List,

    /// Delete every item.
    Clear,
}

pub(super) fn run(fleet: &Fleet<'_, Storage>, out: Output, command: ItemCommand) -> CommandResult {
    match command {
        ItemCommand::New { name, weight } => {
            let item = fleet.create_item(&name, weight)?;
            out.emit(&item, || item.id.to_string())?;
        }
        ItemCommand::List => {
            let items = fleet.list_items()?;
            out.emit(&items, || {
                if items.is_empty() {
                    "No items".to_string()
                } else {
                    items.iter().map(format_item).collect::<Vec<_>>().join("\n")
                }
            })?;
        }
        ItemCommand::Clear => {
            let removed = fleet.clear_items()?;
            out.emit(
                &serde_json::json!({ "cleared": removed }),
                || format_cleared(removed, "item", "items"),
            )?;
        }
    }
    Ok(())
}
