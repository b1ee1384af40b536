//! Entry-flow state machine: player name, room code, and create/join mode.
//!
//! This module is the core of the entry screen. It owns the three pieces of
//! form state, derives validity from them, and turns raw input into the two
//! outbound commands the session layer consumes. It has no terminal, channel,
//! or CLI dependencies — front ends call these operations and render the
//! derived `Validity` / `Controls` values.
//!
//! Invalid submits are not errors: they simply produce no command. A command
//! is never produced from input that fails its validity predicate.

use std::fmt;

// `Serialize` and `Deserialize` are derive macros from `serde`. They generate
// the conversion code at compile time, so a state snapshot or an outbound
// command can be written as JSON (or any other serde format) for free.
use serde::{Deserialize, Serialize};

/// Number of characters in a room code.
pub const ROOM_CODE_LEN: usize = 4;

// ── Mode ─────────────────────────────────────────────────────────────────────

/// Which secondary control set is active.
///
/// `Initial` shows the create button and the join toggle; `JoiningEntry`
/// shows the room code input together with back/join buttons.
///
/// `#[derive(Clone, Copy)]` gives this enum *copy* semantics: it holds no heap
/// data, so `let m = state.mode();` copies the value instead of moving it.
/// `#[default]` on a variant lets `#[derive(Default)]` work on an enum; the
/// marked variant is what `EntryMode::default()` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryMode {
    #[default]
    Initial,
    JoiningEntry,
}

// ── Outbound commands ────────────────────────────────────────────────────────

/// A command produced by a successful submit.
///
/// `#[serde(tag = "command")]` makes the JSON *internally tagged*: the variant
/// name is written into a `"command"` field next to the payload, e.g.
/// `{"command":"join_game","name":"Ann","room_code":"XY12"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EntryCommand {
    /// Start a new game session. `name` is stripped and non-empty.
    CreateGame { name: String },
    /// Join an existing session. `room_code` is exactly four upper-case chars.
    JoinGame { name: String, room_code: String },
}

impl EntryCommand {
    /// The stripped player name carried by either command.
    pub fn name(&self) -> &str {
        match self {
            EntryCommand::CreateGame { name } | EntryCommand::JoinGame { name, .. } => name,
        }
    }
}

impl fmt::Display for EntryCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryCommand::CreateGame { name } => write!(f, "create game as {name:?}"),
            EntryCommand::JoinGame { name, room_code } => {
                write!(f, "join room {room_code} as {name:?}")
            }
        }
    }
}

// ── Derived values ───────────────────────────────────────────────────────────

/// Validity flags derived from the current state. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Validity {
    /// The stripped player name is non-empty.
    pub name_valid: bool,
    /// The name is valid and the stripped room code has exactly four chars.
    pub join_valid: bool,
}

/// Which affordances a presentation layer should show and enable.
///
/// Derived from mode and validity so that a front end cannot enable a submit
/// control whose command would be suppressed. Front ends decide *what to
/// draw* from the `*_visible` flags and *how to draw it* from `*_enabled`,
/// so they never need to match on [`EntryMode`] themselves.
///
/// All fields are plain `bool`s, which makes the struct `Copy`: it is
/// recomputed on every frame and handed around by value, never borrowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub create_visible: bool,
    pub create_enabled: bool,
    pub join_toggle_visible: bool,
    pub join_toggle_enabled: bool,
    pub room_code_visible: bool,
    pub back_visible: bool,
    pub join_visible: bool,
    pub join_enabled: bool,
}

/// Upper-case `raw` and keep at most its first [`ROOM_CODE_LEN`] characters.
///
/// Total for any input and idempotent. Characters are counted as Unicode
/// scalar values; nothing is filtered out.
pub fn normalize_room_code(raw: &str) -> String {
    raw.to_uppercase().chars().take(ROOM_CODE_LEN).collect()
}

// ── Entry state ──────────────────────────────────────────────────────────────

/// All mutable state of one entry-screen session.
///
/// A plain owned struct with no lifetimes or shared pointers. Fields are private
/// so every mutation goes through the operations below, which is what keeps
/// the room code normalized at all times; readers get `&str` borrows through
/// the accessor methods.
///
/// Deserializing goes through [`EntryStateSnapshot`] so the room code is
/// re-normalized; a snapshot can never hold a lower-case or over-long code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryStateSnapshot")]
pub struct EntryState {
    player_name: String,
    room_code: String,
    mode: EntryMode,
}

/// Wire shape of [`EntryState`] before normalization.
///
/// `#[serde(from = "...")]` on `EntryState` tells serde to deserialize this
/// type first and then convert it with the `From` impl below, so the
/// normalization rule cannot be bypassed by hand-written JSON.
#[derive(Deserialize)]
struct EntryStateSnapshot {
    #[serde(default)]
    player_name: String,
    #[serde(default)]
    room_code: String,
    #[serde(default)]
    mode: EntryMode,
}

impl From<EntryStateSnapshot> for EntryState {
    fn from(snapshot: EntryStateSnapshot) -> Self {
        Self {
            player_name: snapshot.player_name,
            room_code: normalize_room_code(&snapshot.room_code),
            mode: snapshot.mode,
        }
    }
}

impl EntryState {
    /// A fresh form: empty name, empty room code, `Initial` mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn room_code(&self) -> &str {
        &self.room_code
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    /// Replace the player name verbatim. Stripping happens only at
    /// validation and submit time, so typed spaces stay visible.
    ///
    /// `impl Into<String>` accepts both `&str` and an owned `String`; an owned
    /// value is moved in without another allocation.
    pub fn set_player_name(&mut self, text: impl Into<String>) {
        self.player_name = text.into();
    }

    /// Normalize `text` with [`normalize_room_code`] and store it.
    pub fn set_room_code(&mut self, text: &str) {
        self.room_code = normalize_room_code(text);
    }

    /// Switch to `JoiningEntry` if the name is valid; no-op otherwise.
    ///
    /// Returns `true` when the form is in `JoiningEntry` afterwards.
    pub fn enter_join_mode(&mut self) -> bool {
        if self.validity().name_valid {
            self.mode = EntryMode::JoiningEntry;
        }
        self.mode == EntryMode::JoiningEntry
    }

    /// Return to `Initial` and clear the room code, from any mode.
    pub fn exit_join_mode(&mut self) {
        self.mode = EntryMode::Initial;
        self.room_code.clear();
    }

    /// Build a create command from the stripped name, if the name is valid.
    ///
    /// `Option` rather than `Result`: a suppressed submit is an expected
    /// outcome, not a failure. Takes `&self` because building a command
    /// never changes the form.
    pub fn submit_create(&self) -> Option<EntryCommand> {
        if !self.validity().name_valid {
            return None;
        }
        Some(EntryCommand::CreateGame {
            name: self.player_name.trim().to_string(),
        })
    }

    /// Build a join command if both the name and the room code are valid.
    pub fn submit_join(&self) -> Option<EntryCommand> {
        if !self.validity().join_valid {
            return None;
        }
        Some(EntryCommand::JoinGame {
            name: self.player_name.trim().to_string(),
            room_code: self.room_code.trim().to_uppercase(),
        })
    }

    /// Derive both validity flags from the current state.
    pub fn validity(&self) -> Validity {
        // `.trim()` returns a borrowed `&str` slice, so validation never
        // allocates. `.chars().count()` counts Unicode scalar values, not bytes.
        let name_valid = !self.player_name.trim().is_empty();
        let join_valid = name_valid && self.room_code.trim().chars().count() == ROOM_CODE_LEN;
        Validity {
            name_valid,
            join_valid,
        }
    }

    /// Derive which controls are visible and enabled in the current mode.
    pub fn controls(&self) -> Controls {
        let validity = self.validity();
        let initial = self.mode == EntryMode::Initial;
        // The two modes show disjoint control sets: `Initial` owns create and
        // the join toggle, `JoiningEntry` owns room code, back and join.
        Controls {
            create_visible: initial,
            create_enabled: initial && validity.name_valid,
            join_toggle_visible: initial,
            join_toggle_enabled: initial && validity.name_valid,
            room_code_visible: !initial,
            back_visible: !initial,
            join_visible: !initial,
            join_enabled: !initial && validity.join_valid,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> EntryState {
        let mut state = EntryState::new();
        state.set_player_name(name);
        state
    }

    #[test]
    fn initial_state() {
        let state = EntryState::new();
        assert_eq!(state.player_name(), "");
        assert_eq!(state.room_code(), "");
        assert_eq!(state.mode(), EntryMode::Initial);
        assert_eq!(
            state.validity(),
            Validity {
                name_valid: false,
                join_valid: false
            }
        );
    }

    // ── Room code normalization ──────────────────────────────────────────

    #[test]
    fn room_code_is_uppercased_and_truncated() {
        let mut state = EntryState::new();
        state.set_room_code("xy12z");
        assert_eq!(state.room_code(), "XY12");
        state.set_room_code("ab");
        assert_eq!(state.room_code(), "AB");
        state.set_room_code("");
        assert_eq!(state.room_code(), "");
    }

    #[test]
    fn room_code_normalization_is_idempotent() {
        for raw in ["xy12z", "ab", "  q ", "éüñx", "a-b!c", "straße"] {
            let once = normalize_room_code(raw);
            assert_eq!(normalize_room_code(&once), once, "input {raw:?}");

            let mut state = EntryState::new();
            state.set_room_code(raw);
            state.set_room_code(raw);
            assert_eq!(state.room_code(), once);
        }
    }

    #[test]
    fn room_code_keeps_non_alphanumeric_characters() {
        assert_eq!(normalize_room_code("a-1!"), "A-1!");
        assert_eq!(normalize_room_code(" ab "), " AB ");
    }

    #[test]
    fn room_code_counts_chars_not_bytes() {
        assert_eq!(normalize_room_code("éüñxy"), "ÉÜÑX");
        // Upper-casing happens before truncation, so expansions count.
        assert_eq!(normalize_room_code("ßab"), "SSAB");
    }

    // ── Validity ─────────────────────────────────────────────────────────

    #[test]
    fn name_validity_ignores_surrounding_whitespace() {
        assert!(!named("").validity().name_valid);
        assert!(!named("   ").validity().name_valid);
        assert!(!named("\t\n").validity().name_valid);
        assert!(named(" Ann ").validity().name_valid);
    }

    #[test]
    fn player_name_is_stored_verbatim() {
        let state = named("  Ann ");
        assert_eq!(state.player_name(), "  Ann ");
    }

    #[test]
    fn join_validity_needs_valid_name_and_four_chars() {
        let mut state = named("Ann");
        state.set_room_code("AB");
        assert!(!state.validity().join_valid);
        state.set_room_code("ABCD");
        assert!(state.validity().join_valid);

        state.set_player_name("   ");
        assert!(!state.validity().join_valid);
    }

    #[test]
    fn join_validity_strips_room_code_whitespace() {
        let mut state = named("Ann");
        state.set_room_code(" ABC");
        assert_eq!(state.room_code(), " ABC");
        assert!(!state.validity().join_valid);
    }

    // ── Mode transitions ─────────────────────────────────────────────────

    #[test]
    fn enter_join_mode_is_guarded_by_name() {
        let mut state = EntryState::new();
        assert!(!state.enter_join_mode());
        assert_eq!(state.mode(), EntryMode::Initial);

        state.set_player_name("   ");
        assert!(!state.enter_join_mode());
        assert_eq!(state.mode(), EntryMode::Initial);

        state.set_player_name("Ann");
        assert!(state.enter_join_mode());
        assert_eq!(state.mode(), EntryMode::JoiningEntry);
    }

    #[test]
    fn exit_join_mode_clears_room_code() {
        let mut state = named("Ann");
        state.enter_join_mode();
        state.set_room_code("wxyz");
        state.exit_join_mode();
        assert_eq!(state.mode(), EntryMode::Initial);
        assert_eq!(state.room_code(), "");

        // Idempotent, and valid from `Initial` too.
        state.set_room_code("ab");
        state.exit_join_mode();
        state.exit_join_mode();
        assert_eq!(state.mode(), EntryMode::Initial);
        assert_eq!(state.room_code(), "");
    }

    #[test]
    fn name_edits_keep_the_mode() {
        let mut state = named("Ann");
        state.enter_join_mode();
        state.set_player_name("");
        assert_eq!(state.mode(), EntryMode::JoiningEntry);
    }

    // ── Submits ──────────────────────────────────────────────────────────

    #[test]
    fn submit_create_with_empty_name_emits_nothing() {
        assert_eq!(named("").submit_create(), None);
        assert_eq!(named("  ").submit_create(), None);
    }

    #[test]
    fn submit_create_strips_name() {
        assert_eq!(
            named("  Ann ").submit_create(),
            Some(EntryCommand::CreateGame { name: "Ann".into() })
        );
    }

    #[test]
    fn submit_join_scenario() {
        let mut state = named("Ann");
        state.enter_join_mode();
        state.set_room_code("xy12z");
        assert_eq!(state.room_code(), "XY12");
        assert!(state.validity().join_valid);
        assert_eq!(
            state.submit_join(),
            Some(EntryCommand::JoinGame {
                name: "Ann".into(),
                room_code: "XY12".into(),
            })
        );
    }

    #[test]
    fn submit_join_with_short_code_emits_nothing() {
        let mut state = named("Ann");
        state.enter_join_mode();
        state.set_room_code("xy");
        assert_eq!(state.submit_join(), None);
    }

    // ── Controls ─────────────────────────────────────────────────────────

    #[test]
    fn controls_in_initial_mode() {
        let controls = EntryState::new().controls();
        assert!(controls.create_visible);
        assert!(!controls.create_enabled);
        assert!(controls.join_toggle_visible);
        assert!(!controls.join_toggle_enabled);
        assert!(!controls.room_code_visible);
        assert!(!controls.join_enabled);

        let controls = named("Ann").controls();
        assert!(controls.create_enabled);
        assert!(controls.join_toggle_enabled);
    }

    #[test]
    fn controls_in_joining_mode() {
        let mut state = named("Ann");
        state.enter_join_mode();
        let controls = state.controls();
        assert!(!controls.create_visible);
        assert!(!controls.create_enabled);
        assert!(!controls.join_toggle_visible);
        assert!(controls.room_code_visible);
        assert!(controls.back_visible);
        assert!(controls.join_visible);
        assert!(!controls.join_enabled);

        state.set_room_code("abcd");
        assert!(state.controls().join_enabled);
    }

    // ── Serialization ────────────────────────────────────────────────────

    #[test]
    fn deserialize_renormalizes_room_code() {
        let json = r#"{"player_name":"Ann","room_code":"abcdef","mode":"joining_entry"}"#;
        let state: EntryState = serde_json::from_str(json).unwrap();
        assert_eq!(state.room_code(), "ABCD");
        assert_eq!(state.mode(), EntryMode::JoiningEntry);
    }

    #[test]
    fn state_snapshot_survives_json() {
        let mut state = named(" Ann");
        state.enter_join_mode();
        state.set_room_code("qr");
        let json = serde_json::to_string(&state).unwrap();
        let back: EntryState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn commands_serialize_internally_tagged() {
        let create = EntryCommand::CreateGame { name: "Ann".into() };
        assert_eq!(
            serde_json::to_string(&create).unwrap(),
            r#"{"command":"create_game","name":"Ann"}"#
        );
        let join = EntryCommand::JoinGame {
            name: "Ann".into(),
            room_code: "XY12".into(),
        };
        assert_eq!(
            serde_json::to_string(&join).unwrap(),
            r#"{"command":"join_game","name":"Ann","room_code":"XY12"}"#
        );
    }

    #[test]
    fn command_display() {
        let join = EntryCommand::JoinGame {
            name: "Ann".into(),
            room_code: "XY12".into(),
        };
        assert_eq!(join.to_string(), r#"join room XY12 as "Ann""#);
        assert_eq!(join.name(), "Ann");
    }
}
