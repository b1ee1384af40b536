//! Interactive entry screen: player name, then create a game or join one.
//!
//! This module renders the entry form as a centered ratatui card and maps
//! crossterm key events onto the operations of [`EntryController`]. It runs
//! its own event loop and returns once a command has been emitted over the
//! channel or the user quits.
//!
//! All form rules (trimming, room code normalization, guarded join mode) live
//! in `entry`; this module only tracks focus and text cursors, and derives
//! what to draw from `Validity` and `Controls`.

use anyhow::Result;
use crossterm::{
    event::{Event as TermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
// `StreamExt` is an extension trait that adds `.next()` to async streams.
use n0_future::StreamExt;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tokio::time::{Duration, interval};
use tracing::debug;

use fake_artist::dispatch::{CommandSender, DispatchError, EntryController};
use fake_artist::entry::{Controls, EntryMode, Validity};
use crate::theme::{Theme, ThemeMode};

// ── Screen state ────────────────────────────────────────────────────────────

/// Which control currently has keyboard focus.
///
/// `Name` is always on screen; the others exist only while the matching
/// `Controls::*_visible` flag is set.
///
/// `#[derive(PartialEq)]` is what makes `state.field == EntryField::Name`
/// compile, since Rust has no built-in equality for user types. `Copy` lets the
/// focus order below hand out fields by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryField {
    Name,
    Create,
    JoinToggle,
    RoomCode,
    Back,
    Join,
}

/// Columns taken by the focus marker in front of every control.
const MARKER_WIDTH: u16 = 2;

/// Focus order over the controls currently on screen, top to bottom.
///
/// The list is rebuilt from `Controls` on every Tab, so focus can never land
/// on a control the current mode hides.
fn focus_order(controls: Controls) -> Vec<EntryField> {
    let candidates = [
        (EntryField::Name, true),
        (EntryField::Create, controls.create_visible),
        (EntryField::JoinToggle, controls.join_toggle_visible),
        (EntryField::RoomCode, controls.room_code_visible),
        (EntryField::Back, controls.back_visible),
        (EntryField::Join, controls.join_visible),
    ];
    // `into_iter()` on an array yields owned tuples; `filter` + `map` is a
    // lazy iterator chain that only runs when `collect()` drives it.
    candidates
        .into_iter()
        .filter(|(_, visible)| *visible)
        .map(|(field, _)| field)
        .collect()
}

/// Everything the screen needs between frames.
///
/// The form itself is owned by the controller; cursors are char indices into
/// the stored name and room code.
struct WelcomeState {
    form: EntryController,
    theme: Theme,
    field: EntryField,
    name_cursor: usize,
    code_cursor: usize,
    /// Explains why the last Enter did nothing. Cleared on the next key.
    notice: Option<&'static str>,
    submitted: bool,
    should_quit: bool,
}

impl WelcomeState {
    fn new(commands: CommandSender, theme_mode: ThemeMode) -> Self {
        Self {
            form: EntryController::new(commands),
            theme: Theme::for_mode(theme_mode),
            field: EntryField::Name,
            name_cursor: 0,
            code_cursor: 0,
            notice: None,
            submitted: false,
            should_quit: false,
        }
    }

    fn mode(&self) -> EntryMode {
        self.form.state().mode()
    }

    /// Move focus forward, wrapping from the last control back to `Name`.
    fn next_field(&mut self) {
        let order = focus_order(self.form.controls());
        // `position` returns `Option<usize>`; a hidden field falls back to 0.
        let pos = order.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = order[(pos + 1) % order.len()];
    }

    /// Move focus backward. Adding `len - 1` instead of subtracting 1 keeps
    /// the `usize` arithmetic from underflowing at position 0.
    fn prev_field(&mut self) {
        let order = focus_order(self.form.controls());
        let pos = order.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = order[(pos + order.len() - 1) % order.len()];
    }

    /// Guarded switch into join mode; focuses the room code input on success.
    fn open_join(&mut self) {
        if self.form.enter_join_mode() {
            self.field = EntryField::RoomCode;
            self.code_cursor = 0;
        } else {
            self.notice = Some(hint_for(self.form.validity(), EntryMode::Initial));
        }
    }

    /// Leave join mode (clears the room code) and focus the join toggle.
    fn back(&mut self) {
        self.form.exit_join_mode();
        self.field = EntryField::JoinToggle;
        self.code_cursor = 0;
    }

    /// Record the outcome of a submit: done on emission, a notice otherwise.
    fn after_submit(&mut self, emitted: bool) {
        if emitted {
            self.submitted = true;
        } else {
            self.notice = Some(hint_for(self.form.validity(), self.mode()));
        }
    }
}

/// What the user still has to fix before the current mode can submit.
fn hint_for(validity: Validity, mode: EntryMode) -> &'static str {
    if !validity.name_valid {
        "Enter your name first"
    } else if mode == EntryMode::JoiningEntry && !validity.join_valid {
        "Room code needs 4 characters"
    } else {
        ""
    }
}

// ── UI rendering ────────────────────────────────────────────────────────────

/// Style for a button span given its enabled/focused state.
fn button_style(theme: &Theme, bg: ratatui::style::Color, enabled: bool, focused: bool) -> Style {
    let mut style = if enabled {
        Style::default()
            .fg(theme.button_fg)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.disabled_fg).bg(theme.disabled_bg)
    };
    if focused {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Focus marker shown in front of the focused control.
fn marker<'a>(theme: &Theme, focused: bool) -> Span<'a> {
    if focused {
        Span::styled("▸ ", Style::default().fg(theme.focus_marker))
    } else {
        Span::raw("  ")
    }
}

/// The part of `value` that fits in `width` columns with the cursor visible.
///
/// Returns the visible text and the cursor's column inside it. One column is
/// kept free on the right so a cursor after the last char stays in view.
/// Positions are char indices, matching the edit cursor.
fn scroll_window(value: &str, cursor: usize, width: usize) -> (String, usize) {
    if width == 0 {
        return (String::new(), 0);
    }
    let len = value.chars().count();
    let cursor = cursor.min(len);
    let start = (cursor + 1).saturating_sub(width);
    let visible = value.chars().skip(start).take(width).collect();
    (visible, cursor - start)
}

/// A labelled single-line input: pushes the label line and the value line.
///
/// Long values scroll sideways so the cursor stays inside `width` columns.
/// Returns the row index of the value line and the cursor column within the
/// value, so the caller can place the terminal cursor.
///
/// The `'a` lifetime ties the borrowed `&str` arguments to the returned
/// lines: ratatui `Span`s can borrow text instead of copying it, and the
/// compiler checks that the borrowed strings outlive the frame.
#[allow(clippy::too_many_arguments)]
fn push_input<'a>(
    lines: &mut Vec<Line<'a>>,
    theme: &Theme,
    label: &'a str,
    value: &'a str,
    placeholder: &'a str,
    cursor: usize,
    width: u16,
    focused: bool,
) -> (u16, usize) {
    let label_style = if focused {
        Style::default()
            .fg(theme.label_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.label)
    };
    lines.push(Line::from(Span::styled(format!("  {label}"), label_style)));

    let row = lines.len() as u16;
    let field_width = usize::from(width.saturating_sub(MARKER_WIDTH));
    let (value_span, col) = if value.is_empty() {
        let span = Span::styled(
            placeholder,
            Style::default()
                .fg(theme.placeholder)
                .add_modifier(Modifier::ITALIC),
        );
        (span, 0)
    } else {
        let (visible, col) = scroll_window(value, cursor, field_width);
        // An owned `String` also converts into a `Span`, so the windowed copy
        // needs no borrow.
        (Span::styled(visible, Style::default().fg(theme.text)), col)
    };
    lines.push(Line::from(vec![marker(theme, focused), value_span]));
    (row, col)
}

/// Render the entry form into a terminal frame.
fn ui_welcome(f: &mut ratatui::Frame, state: &WelcomeState) {
    let theme = &state.theme;
    let form = state.form.state();
    let controls = state.form.controls();
    let area = f.area();

    let card_w: u16 = 48;
    let card_h: u16 = 18;
    let x = area.width.saturating_sub(card_w) / 2;
    let y = area.height.saturating_sub(card_h) / 2;
    let card = Rect::new(x, y, card_w.min(area.width), card_h.min(area.height));

    f.render_widget(Clear, card);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            " fake-artist ",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    f.render_widget(block, card);

    let inner = Rect::new(
        card.x + 2,
        card.y + 1,
        card.width.saturating_sub(4),
        card.height.saturating_sub(2),
    );

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        "  Fake Artist Goes to New York",
        Style::default()
            .fg(theme.subtitle)
            .add_modifier(Modifier::ITALIC),
    )));
    lines.push(Line::from(""));

    let name_cursor = push_input(
        &mut lines,
        theme,
        "Player Name",
        form.player_name(),
        "Enter your name",
        state.name_cursor,
        inner.width,
        state.field == EntryField::Name,
    );
    lines.push(Line::from(""));

    // ── Mode-specific controls ───────────────────────────────────────────
    //
    // Each block is gated on a `Controls` visibility flag rather than on the
    // mode, so this renderer and the focus order agree on what exists.

    if controls.create_visible {
        let focused = state.field == EntryField::Create;
        lines.push(Line::from(vec![
            marker(theme, focused),
            Span::styled(
                "  Create Game  ",
                button_style(theme, theme.create_bg, controls.create_enabled, focused),
            ),
        ]));
    }
    if controls.create_visible && controls.join_toggle_visible {
        lines.push(Line::from(Span::styled(
            "        or",
            Style::default().fg(theme.hint_text),
        )));
    }
    if controls.join_toggle_visible {
        let focused = state.field == EntryField::JoinToggle;
        lines.push(Line::from(vec![
            marker(theme, focused),
            Span::styled(
                "   Join Game   ",
                button_style(theme, theme.join_bg, controls.join_toggle_enabled, focused),
            ),
        ]));
    }

    // `Option<(u16, usize)>`: `None` when the room code input is hidden.
    let mut code_cursor = None;
    if controls.room_code_visible {
        code_cursor = Some(push_input(
            &mut lines,
            theme,
            "Room Code",
            form.room_code(),
            "Room Code (4 letters)",
            state.code_cursor,
            inner.width,
            state.field == EntryField::RoomCode,
        ));
        lines.push(Line::from(""));
    }
    if controls.back_visible || controls.join_visible {
        let mut buttons: Vec<Span> = Vec::new();
        if controls.back_visible {
            let focused = state.field == EntryField::Back;
            buttons.push(marker(theme, focused));
            buttons.push(Span::styled(
                "  Back  ",
                button_style(theme, theme.back_bg, true, focused),
            ));
            buttons.push(Span::raw("  "));
        }
        if controls.join_visible {
            let focused = state.field == EntryField::Join;
            buttons.push(marker(theme, focused));
            buttons.push(Span::styled(
                "  Join  ",
                button_style(theme, theme.join_bg, controls.join_enabled, focused),
            ));
        }
        lines.push(Line::from(buttons));
    }
    lines.push(Line::from(""));

    // ── Notice or key hints ──────────────────────────────────────────────
    if let Some(notice) = state.notice {
        lines.push(Line::from(Span::styled(
            format!("  {notice}"),
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        let esc_action = if controls.back_visible { " back" } else { " quit" };
        let key_style = Style::default()
            .fg(theme.hint_key)
            .add_modifier(Modifier::BOLD);
        let text_style = Style::default().fg(theme.hint_text);
        lines.push(Line::from(vec![
            Span::styled("  Enter", key_style),
            Span::styled(" select  ", text_style),
            Span::styled("Tab", key_style),
            Span::styled(" next  ", text_style),
            Span::styled("Esc", key_style),
            Span::styled(esc_action, text_style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);

    // Put the terminal cursor inside the focused text input. The value starts
    // after the focus marker. `saturating_add` clamps at `u16::MAX` instead of
    // panicking on overflow, and the final `min` keeps the cursor on the card
    // even if the window math were ever off by one.
    let cursor = match state.field {
        EntryField::Name => Some(name_cursor),
        EntryField::RoomCode => code_cursor,
        _ => None,
    };
    if let Some((row, col)) = cursor {
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        let last_col = inner.x.saturating_add(inner.width.saturating_sub(1));
        let x = inner
            .x
            .saturating_add(MARKER_WIDTH)
            .saturating_add(col)
            .min(last_col);
        f.set_cursor_position((x, inner.y.saturating_add(row)));
    }
}

// ── Key handling ────────────────────────────────────────────────────────────

/// Handle a key press on the entry screen.
///
/// Global keys (Esc, Ctrl+C, Ctrl+T, focus movement, Enter) are handled first;
/// anything else goes to the focused text input, if any.
///
/// Takes `&mut WelcomeState` because keys mutate the form, while `ui_welcome`
/// only needs `&WelcomeState`. The only error is a closed command channel,
/// which `?` passes straight up to the event loop.
fn handle_welcome_key(state: &mut WelcomeState, key: KeyEvent) -> Result<(), DispatchError> {
    state.notice = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => state.should_quit = true,
            KeyCode::Char('t') => state.theme.toggle(),
            _ => {}
        }
        return Ok(());
    }

    match key.code {
        // Esc means "Back" wherever a Back button is on screen, else quit.
        KeyCode::Esc => {
            if state.form.controls().back_visible {
                state.back();
            } else {
                state.should_quit = true;
            }
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                state.prev_field();
            } else {
                state.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => state.prev_field(),
        KeyCode::Down => state.next_field(),
        KeyCode::Enter => match state.field {
            EntryField::Name => {
                let emitted = state.form.submit_current()?;
                state.after_submit(emitted);
            }
            EntryField::Create => {
                let emitted = state.form.submit_create()?;
                state.after_submit(emitted);
            }
            EntryField::JoinToggle => state.open_join(),
            EntryField::RoomCode | EntryField::Join => {
                let emitted = state.form.submit_join()?;
                state.after_submit(emitted);
            }
            EntryField::Back => state.back(),
        },
        _ => match state.field {
            // The form only exposes `&str` borrows, so edits work on an owned
            // copy that is written back through the controller.
            EntryField::Name => {
                let mut name = state.form.state().player_name().to_string();
                if edit_text(&mut name, &mut state.name_cursor, key) {
                    state.form.set_player_name(name);
                }
            }
            EntryField::RoomCode => {
                let mut raw = state.form.state().room_code().to_string();
                if edit_text(&mut raw, &mut state.code_cursor, key) {
                    // Upper-casing can expand a char (`ß` becomes `SS`), so the
                    // cursor is the upper-cased length of the text before it.
                    let before: String = raw.chars().take(state.code_cursor).collect();
                    state.code_cursor = before.to_uppercase().chars().count();
                    state.form.set_room_code(&raw);
                }
                // Normalization may have truncated the edit.
                let len = state.form.state().room_code().chars().count();
                state.code_cursor = state.code_cursor.min(len);
            }
            _ => {}
        },
    }
    Ok(())
}

/// Byte offset of the `char_idx`-th character, or the end of the string.
fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Apply a single-line editing key to `text` at a char-indexed `cursor`.
///
/// Returns `true` when the text changed (cursor-only moves return `false`).
fn edit_text(text: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    let len = text.chars().count();
    *cursor = (*cursor).min(len);
    match key.code {
        KeyCode::Char(c) => {
            text.insert(byte_index(text, *cursor), c);
            *cursor += 1;
            true
        }
        KeyCode::Backspace if *cursor > 0 => {
            *cursor -= 1;
            text.remove(byte_index(text, *cursor));
            true
        }
        KeyCode::Delete if *cursor < len => {
            text.remove(byte_index(text, *cursor));
            true
        }
        KeyCode::Left => {
            *cursor = cursor.saturating_sub(1);
            false
        }
        KeyCode::Right => {
            *cursor = (*cursor + 1).min(len);
            false
        }
        KeyCode::Home => {
            *cursor = 0;
            false
        }
        KeyCode::End => {
            *cursor = len;
            false
        }
        _ => false,
    }
}

// ── Public entry point ──────────────────────────────────────────────────────

/// Run the interactive entry screen.
///
/// Returns after a command has been sent on `commands` or the user quit; the
/// caller tells the two apart by reading its receiver. The terminal is
/// restored before any error is returned.
pub async fn run_welcome_screen(commands: CommandSender, theme_mode: ThemeMode) -> Result<()> {
    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;

    let result = match Terminal::new(CrosstermBackend::new(std::io::stdout())) {
        Ok(mut terminal) => {
            let mut state = WelcomeState::new(commands, theme_mode);
            event_loop(&mut terminal, &mut state).await
        }
        Err(err) => Err(err.into()),
    };

    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut WelcomeState,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut tick = interval(Duration::from_millis(50));

    loop {
        // `&*state` reborrows the `&mut` as a shared borrow for the closure;
        // drawing never mutates the screen state.
        terminal.draw(|f| ui_welcome(f, &*state))?;

        // `select!` waits on both futures and runs the branch of whichever
        // finishes first. The tick redraws the frame after a resize even
        // when no key arrives.
        tokio::select! {
            ev = events.next() => {
                match ev {
                    Some(Ok(TermEvent::Key(key))) => {
                        // Windows also reports release/repeat events.
                        if key.kind != KeyEventKind::Press { continue; }

                        handle_welcome_key(state, key)?;

                        if state.should_quit {
                            debug!("entry screen closed without a command");
                            return Ok(());
                        }
                        if state.submitted {
                            return Ok(());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => return Err(err.into()),
                    None => return Ok(()),
                }
            }
            _ = tick.tick() => {}
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
