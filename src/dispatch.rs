//! Command dispatch: an entry form wired to an outbound channel.
//!
//! `EntryController` owns an [`EntryState`] and the sending half of an mpsc
//! channel. Front ends call its operations; when a submit passes validation,
//! the resulting [`EntryCommand`] is sent exactly once. The session layer
//! holds the receiving half and never sees suppressed submits.

// `thiserror::Error` is a derive macro: it writes the `std::error::Error` and
// `Display` impls for an error enum from the `#[error("...")]` attributes.
use thiserror::Error;
// An *unbounded* mpsc ("multi-producer, single-consumer") channel never makes
// the sender wait, so `send` is a plain synchronous call that fits inside a
// key handler. It only fails when the receiver has been dropped.
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info};

use crate::entry::{Controls, EntryCommand, EntryMode, EntryState, Validity};

// Type aliases keep the channel's element type in one place; callers write
// `CommandSender` instead of repeating the generic parameter.

/// Sending half for outbound entry commands.
pub type CommandSender = UnboundedSender<EntryCommand>;
/// Receiving half for outbound entry commands.
pub type CommandReceiver = UnboundedReceiver<EntryCommand>;

/// Create a connected sender/receiver pair for entry commands.
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    unbounded_channel()
}

/// Failure to hand a command to the session layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The receiver was dropped, so nobody can act on the command.
    ///
    /// The command travels back inside the error (tokio's `SendError` hands
    /// the unsent value back too), so the caller can still log or retry it.
    #[error("session layer is gone; dropped {0}")]
    ReceiverClosed(EntryCommand),
}

/// Owns the entry form state and emits accepted commands over a channel.
///
/// The controller is the single mutation gateway for the form: fields are
/// private, and front ends read the state through a shared `&EntryState`
/// borrow while all writes go through `&mut self` methods.
pub struct EntryController {
    state: EntryState,
    commands: CommandSender,
}

impl EntryController {
    pub fn new(commands: CommandSender) -> Self {
        Self {
            state: EntryState::new(),
            commands,
        }
    }

    /// Borrow the form state for rendering.
    pub fn state(&self) -> &EntryState {
        &self.state
    }

    pub fn validity(&self) -> Validity {
        self.state.validity()
    }

    pub fn controls(&self) -> Controls {
        self.state.controls()
    }

    pub fn set_player_name(&mut self, text: impl Into<String>) {
        self.state.set_player_name(text);
    }

    pub fn set_room_code(&mut self, text: &str) {
        self.state.set_room_code(text);
    }

    pub fn enter_join_mode(&mut self) -> bool {
        let joined = self.state.enter_join_mode();
        debug!(joined, "enter join mode");
        joined
    }

    pub fn exit_join_mode(&mut self) {
        self.state.exit_join_mode();
        debug!("exit join mode");
    }

    /// Emit a create command if the name is valid.
    ///
    /// `Ok(true)` means a command was sent, `Ok(false)` that the submit was
    /// suppressed by validation.
    pub fn submit_create(&mut self) -> Result<bool, DispatchError> {
        let command = self.state.submit_create();
        self.emit(command, "create")
    }

    /// Emit a join command if the name and room code are valid.
    pub fn submit_join(&mut self) -> Result<bool, DispatchError> {
        let command = self.state.submit_join();
        self.emit(command, "join")
    }

    /// Submit whichever command belongs to the current mode.
    pub fn submit_current(&mut self) -> Result<bool, DispatchError> {
        match self.state.mode() {
            EntryMode::Initial => self.submit_create(),
            EntryMode::JoiningEntry => self.submit_join(),
        }
    }

    fn emit(&self, command: Option<EntryCommand>, kind: &str) -> Result<bool, DispatchError> {
        // `let ... else` binds the `Some` value or runs the `else` block,
        // which must leave the function. It keeps the happy path unindented.
        let Some(command) = command else {
            debug!(kind, validity = ?self.state.validity(), "submit suppressed");
            return Ok(false);
        };
        // `%command` records the field with its `Display` impl; `?` (used
        // above for `validity`) would use `Debug` instead.
        info!(%command, "emitting entry command");
        self.commands
            .send(command)
            .map_err(|err| DispatchError::ReceiverClosed(err.0))?;
        Ok(true)
    }
}
