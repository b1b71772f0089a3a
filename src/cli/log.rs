//! Log commands: list, clear.

use clap::Subcommand;

use crate::{mission::Fleet, storage::Storage};

use super::format::{format_cleared, format_entry};
use super::{CommandResult, Output};

#[derive(Debug, Subcommand)]
pub enum LogCommand {
    /// List log entries, most recent first.
    List,

    /// Delete every log entry. An administrative reset.
    Clear,
}

pub(super) fn run(fleet: &Fleet<'_, Storage>, out: Output, command: LogCommand) -> CommandResult {
    let log = fleet.audit_log();
    match command {
        LogCommand::List => {
            let entries = log.entries()?;
            out.emit(&entries, || {
                if entries.is_empty() {
                    "No log entries".to_string()
                } else {
                    entries
                        .iter()
                        .map(format_entry)
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            })?;
        }
        LogCommand::Clear => {
            let removed = log.clear()?;
            out.emit(
                &serde_json::json!({ "cleared": removed }),
                || format_cleared(removed, "log entry", "log entries"),
            )?;
        }
    }
    Ok(())
}
