//! Fleet configuration.
//!
//! Loaded from `~/.fleet/config.toml`. A missing file means defaults.
//!
//! ```toml
//! database = "/var/lib/fleet/fleet.sqlite"
//! log = "fleet=debug"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::storage::Storage;

/// Environment variable overriding the database path.
pub const DATABASE_ENV: &str = "FLEET_DB";

/// Environment variable overriding the log filter.
pub const LOG_ENV: &str = "FLEET_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Fleet configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Where the fleet database lives.
    pub database: Option<PathBuf>,

    /// Log filter directives, in `RUST_LOG` syntax.
    pub log: Option<String>,
}

impl Config {
    /// Load config from `~/.fleet/config.toml`, or defaults if there is none.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.fleet/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".fleet").join("config.toml"))
    }

    /// Resolve the database path.
    ///
    /// Checks in order: explicit `--db` value, `FLEET_DB`, the config file,
    /// then `~/.fleet/fleet.sqlite`.
    pub fn database_path(&self, explicit: Option<&Path>) -> Result<PathBuf, String> {
        self.resolve_database(explicit, env::var(DATABASE_ENV).ok())
    }

    /// Resolve the log filter: `FLEET_LOG`, the config file, then `warn`.
    pub fn log_filter(&self) -> String {
        self.resolve_log_filter(env::var(LOG_ENV).ok())
    }

    fn resolve_database(
        &self,
        explicit: Option<&Path>,
        from_env: Option<String>,
    ) -> Result<PathBuf, String> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = from_env.filter(|s| !s.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        Storage::default_path().ok_or_else(|| {
            format!("could not determine home directory; pass --db or set {DATABASE_ENV}")
        })
    }

    fn resolve_log_filter(&self, from_env: Option<String>) -> String {
        from_env
            .filter(|s| !s.is_empty())
            .or_else(|| self.log.clone())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }
}
