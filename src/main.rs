//! fake-artist — entry screen for Fake Artist Goes to New York.
//!
//! This is the binary root. It declares the front-end modules, parses the
//! CLI, and hands the entry command to the session layer by printing it.
//!
//! ## Module structure
//!
//! - `cli`      — clap parser, scripted create/join flows, command output
//! - `logging`  — tracing subscriber setup
//! - `theme`    — dark/light palettes
//! - `welcome`  — interactive entry screen (ratatui + crossterm)
//!
//! The entry-flow core (`entry`, `dispatch`) lives in the library crate.

mod cli;
mod logging;
mod theme;
mod welcome;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, print_command};
use fake_artist::dispatch::{EntryController, command_channel};
use welcome::run_welcome_screen;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.options.log_file.as_deref(), cli.command.is_none())?;

    let (commands, mut emitted) = command_channel();

    // Both branches consume the sender, so `recv` below sees the channel
    // close when no command was emitted.
    match &cli.command {
        None => run_welcome_screen(commands, cli.options.theme).await?,
        Some(command) => {
            let mut form = EntryController::new(commands);
            cli::run_command(command, &mut form)?;
        }
    }

    match emitted.recv().await {
        Some(command) => print_command(&command, cli.options.format())?,
        None => info!("entry screen closed without a command"),
    }
    Ok(())
}
