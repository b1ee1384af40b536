//! Tracing subscriber setup.
//!
//! The interactive screen owns the terminal, so it only logs when a log file
//! is given. Scripted runs log to stderr, leaving stdout for the command.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "fake_artist=info";

fn env_filter() -> EnvFilter {
    EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()))
}

/// Install the global subscriber for this process.
pub fn init(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter());
    match log_file {
        Some(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            registry
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .try_init()?;
        }
        None if interactive => {}
        None => {
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()?;
        }
    }
    Ok(())
}
