//! CLI interface for Fleet.
//!
//! Each subcommand is non-interactive: arguments in, one result out.
//! Results go to stdout (human-readable, or JSON with `--json`); logs and
//! errors go to stderr.
//!
//! - `fleet mover new|list|load|start|end|clear`: movers and their missions.
//! - `fleet item new|list|clear`: the cargo catalog.
//! - `fleet log list|clear`: the mission log.
//!
//! Mover arguments take a full UUID or an unambiguous prefix.

mod format;
mod item;
mod log;
mod mover;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::error::FleetError;
use crate::mission::Fleet;
use crate::storage::Storage;

use item::ItemCommand;
use log::LogCommand;
use mover::MoverCommand;

/// Fleet: track movers, their cargo, and their missions.
#[derive(Debug, Parser)]
#[command(name = "fleet", after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Database file. Overrides `FLEET_DB` and the config file.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print results (and errors) as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r#"Workflow: one mission
  1. fleet item new "Elven rope" --weight 2
     fleet item new "Lembas" --weight 1
     → each prints an item ID
  2. fleet mover new "Bill the pony" --weight-limit 10
     → prints a mover ID (e.g. a3b0fc12-...)
  3. fleet mover load a3b <item-id> <item-id>
  4. fleet mover start a3b
  5. fleet mover end a3b

Inspect:
  fleet mover list      # most missions first
  fleet log list        # most recent first"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage movers and run their missions.
    Mover {
        #[command(subcommand)]
        command: MoverCommand,
    },

    /// Manage the cargo catalog.
    Item {
        #[command(subcommand)]
        command: ItemCommand,
    },

    /// Read or reset the mission log.
    Log {
        #[command(subcommand)]
        command: LogCommand,
    },
}

/// How command results are printed.
#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    /// Print `value` as pretty JSON, or `text()` otherwise.
    fn emit<T: Serialize>(self, value: &T, text: impl FnOnce() -> String) -> Result<(), String> {
        if self.json {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| format!("failed to serialize output: {e}"))?;
            println!("{json}");
        } else {
            println!("{}", text());
        }
        Ok(())
    }

    /// Render a fleet error as the message `main` prints.
    fn error(self, err: &FleetError) -> String {
        if self.json {
            let body = serde_json::json!({
                "error": err.to_string(),
                "kind": err.kind(),
                "status": err.http_status(),
            });
            body.to_string()
        } else {
            format!("error[{}]: {err}", err.kind())
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();
    let out = Output { json: cli.json };

    let path = config.database_path(cli.db.as_deref())?;
    let storage = Storage::new(&path)
        .map_err(|e| format!("failed to open database at {}: {e}", path.display()))?;
    let fleet = Fleet::new(&storage);

    let result = match cli.command {
        Command::Mover { command } => mover::run(&fleet, out, command),
        Command::Item { command } => item::run(&fleet, out, command),
        Command::Log { command } => log::run(&fleet, out, command),
    };

    result.map_err(|e| match e {
        CommandError::Fleet(e) => out.error(&e),
        CommandError::Usage(msg) => msg,
    })
}

/// Why a command failed: bad arguments, or the fleet refused.
#[derive(Debug)]
enum CommandError {
    Usage(String),
    Fleet(FleetError),
}

impl From<FleetError> for CommandError {
    fn from(e: FleetError) -> Self {
        Self::Fleet(e)
    }
}

impl From<String> for CommandError {
    fn from(msg: String) -> Self {
        Self::Usage(msg)
    }
}

type CommandResult = Result<(), CommandError>;

/// Resolve a mover reference (full UUID or unambiguous prefix) to an id.
///
/// A full UUID is passed through unchecked; the operation itself reports
/// a missing mover.
fn resolve_mover(fleet: &Fleet<'_, Storage>, reference: &str) -> Result<Uuid, CommandError> {
    if let Ok(id) = reference.parse::<Uuid>() {
        return Ok(id);
    }

    let prefix = reference.to_ascii_lowercase();
    let movers = fleet.list_movers()?;
    let matches: Vec<Uuid> = movers
        .iter()
        .map(|m| m.id)
        .filter(|id| id.to_string().starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [] => Err(format!("no mover matching '{reference}'").into()),
        [id] => Ok(*id),
        many => {
            let ids: Vec<String> = many.iter().map(format::short_id).collect();
            Err(format!(
                "'{reference}' is ambiguous; it matches {} movers: {}",
                many.len(),
                ids.join(", ")
            )
            .into())
        }
    }
}

/// Parse item arguments, which must be full UUIDs.
fn parse_item_ids(args: &[String]) -> Result<Vec<Uuid>, CommandError> {
    args.iter()
        .map(|arg| {
            arg.parse::<Uuid>()
                .map_err(|e| CommandError::Usage(format!("invalid item id '{arg}': {e}")))
        })
        .collect()
}
