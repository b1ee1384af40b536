//! Command-line surface: interactive screen by default, or a scripted
//! `create` / `join` flow that drives the same entry form.

mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::warn;

use fake_artist::dispatch::EntryController;

use crate::theme::ThemeMode;

pub use output::{OutputFormat, print_command};

/// The top-level CLI. Without a subcommand the interactive entry screen runs.
#[derive(Parser, Debug)]
#[command(
    name = "fake-artist",
    version,
    about = "Entry screen for Fake Artist Goes to New York"
)]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options shared by every mode.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOptions {
    /// Print the emitted command as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Color palette of the entry screen (Ctrl+T toggles at runtime)
    #[arg(long, global = true, value_enum, default_value = "dark")]
    pub theme: ThemeMode,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new game
    Create {
        /// Your display name
        #[arg(short, long)]
        name: String,
    },
    /// Join an existing game by room code
    Join {
        /// Your display name
        #[arg(short, long)]
        name: String,
        /// Four-character room code (case-insensitive)
        #[arg(short, long)]
        code: String,
    },
}

/// Why a scripted flow produced no command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RejectedInput {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("room code {code:?} must be exactly 4 characters")]
    RoomCodeLength { code: String },
}

/// Feed a scripted command through the entry form, exactly as if the fields
/// had been typed and the buttons pressed.
pub fn run_command(command: &Command, form: &mut EntryController) -> anyhow::Result<()> {
    match command {
        Command::Create { name } => {
            form.set_player_name(name.as_str());
            if !form.submit_create()? {
                warn!("create rejected: empty name");
                return Err(RejectedInput::EmptyName.into());
            }
        }
        Command::Join { name, code } => {
            form.set_player_name(name.as_str());
            if !form.enter_join_mode() {
                warn!("join rejected: empty name");
                return Err(RejectedInput::EmptyName.into());
            }
            form.set_room_code(code);
            if !form.submit_join()? {
                let code = form.state().room_code().to_string();
                warn!(%code, "join rejected: room code length");
                return Err(RejectedInput::RoomCodeLength { code }.into());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake_artist::dispatch::command_channel;
    use fake_artist::entry::EntryCommand;

    fn rejection(err: anyhow::Error) -> RejectedInput {
        err.downcast::<RejectedInput>().unwrap()
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["fake-artist"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.options.theme, ThemeMode::Dark);
        assert_eq!(cli.options.format(), OutputFormat::Text);
    }

    #[test]
    fn parses_join_with_global_options() {
        let cli = Cli::try_parse_from([
            "fake-artist",
            "join",
            "--name",
            "Ann",
            "-c",
            "xy12",
            "--json",
            "--theme",
            "light",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Join {
                name: "Ann".into(),
                code: "xy12".into()
            })
        );
        assert_eq!(cli.options.format(), OutputFormat::Json);
        assert_eq!(cli.options.theme, ThemeMode::Light);
    }

    #[test]
    fn join_requires_code() {
        assert!(Cli::try_parse_from(["fake-artist", "join", "-n", "Ann"]).is_err());
    }

    #[test]
    fn scripted_create_emits_stripped_name() {
        let (tx, mut rx) = command_channel();
        let mut form = EntryController::new(tx);
        run_command(&Command::Create { name: " Ann ".into() }, &mut form).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            EntryCommand::CreateGame { name: "Ann".into() }
        );
    }

    #[test]
    fn scripted_create_rejects_blank_name() {
        let (tx, mut rx) = command_channel();
        let mut form = EntryController::new(tx);
        let err = run_command(&Command::Create { name: "  ".into() }, &mut form).unwrap_err();
        assert_eq!(rejection(err), RejectedInput::EmptyName);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn scripted_join_normalizes_code() {
        let (tx, mut rx) = command_channel();
        let mut form = EntryController::new(tx);
        let join = Command::Join {
            name: "Ann".into(),
            code: "xy12z".into(),
        };
        run_command(&join, &mut form).unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            EntryCommand::JoinGame {
                name: "Ann".into(),
                room_code: "XY12".into(),
            }
        );
    }

    #[test]
    fn scripted_join_rejects_short_code() {
        let (tx, _rx) = command_channel();
        let mut form = EntryController::new(tx);
        let join = Command::Join {
            name: "Ann".into(),
            code: "ab".into(),
        };
        let err = run_command(&join, &mut form).unwrap_err();
        assert_eq!(
            rejection(err),
            RejectedInput::RoomCodeLength { code: "AB".into() }
        );
    }

    #[test]
    fn scripted_join_rejects_blank_name_before_code() {
        let (tx, _rx) = command_channel();
        let mut form = EntryController::new(tx);
        let join = Command::Join {
            name: "".into(),
            code: "abcd".into(),
        };
        let err = run_command(&join, &mut form).unwrap_err();
        assert_eq!(rejection(err), RejectedInput::EmptyName);
    }
}
