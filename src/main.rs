mod audit;
mod cli;
mod config;
mod error;
mod mission;
mod model;
mod planner;
mod storage;

use std::{io, process};

use tracing_subscriber::EnvFilter;

use config::Config;

fn main() {
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}");
        process::exit(1);
    });

    init_logging(&config);

    if let Err(e) = cli::run(&config) {
        eprintln!("{e}");
        process::exit(1);
    }
}

/// Structured logs go to stderr so stdout stays clean for command output.
fn init_logging(config: &Config) {
    let filter = config.log_filter();
    let filter = EnvFilter::try_new(&filter).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter '{filter}': {e}");
        EnvFilter::new("warn")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
