//! Centralized color theme for the entry screen.
//!
//! Defines a `Theme` struct with named color slots for every semantic role used
//! by the form. Two palettes are provided — dark (default) and light — and a
//! runtime toggle switches between them with Ctrl+T.

use clap::ValueEnum;
use ratatui::style::Color;

/// Which palette is currently active.
///
/// `ValueEnum` lets clap parse `--theme dark|light` straight into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeMode {
    Dark,
    Light,
}

/// A complete color palette for the entry screen.
///
/// Every color the form uses is looked up here — no hardcoded `Color::*`
/// constants in the rendering code.
pub struct Theme {
    pub mode: ThemeMode,

    // ── Surfaces / borders ───────────────────────────────────────────────
    pub border: Color,
    pub title: Color,
    pub subtitle: Color,

    // ── Text ─────────────────────────────────────────────────────────────
    pub label: Color,
    pub label_focused: Color,
    pub text: Color,
    pub placeholder: Color,

    // ── Buttons ──────────────────────────────────────────────────────────
    pub create_bg: Color,
    pub join_bg: Color,
    pub back_bg: Color,
    pub button_fg: Color,
    pub disabled_bg: Color,
    pub disabled_fg: Color,
    pub focus_marker: Color,

    // ── Status / hints ───────────────────────────────────────────────────
    pub warning: Color,
    pub hint_key: Color,
    pub hint_text: Color,
}

impl Theme {
    /// Dark theme — gray-900 style card with blue/green actions.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,

            border: Color::Rgb(55, 65, 81),
            title: Color::Rgb(243, 244, 246),
            subtitle: Color::Rgb(156, 163, 175),

            label: Color::Rgb(156, 163, 175),
            label_focused: Color::Rgb(96, 165, 250),
            text: Color::Rgb(243, 244, 246),
            placeholder: Color::Rgb(107, 114, 128),

            create_bg: Color::Rgb(37, 99, 235),
            join_bg: Color::Rgb(22, 163, 74),
            back_bg: Color::Rgb(75, 85, 99),
            button_fg: Color::Rgb(255, 255, 255),
            disabled_bg: Color::Rgb(55, 65, 81),
            disabled_fg: Color::Rgb(107, 114, 128),
            focus_marker: Color::Rgb(96, 165, 250),

            warning: Color::Rgb(251, 191, 36),
            hint_key: Color::Rgb(134, 239, 172),
            hint_text: Color::Rgb(107, 114, 128),
        }
    }

    /// Light theme — same roles, darker ink on a light terminal.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,

            border: Color::Rgb(209, 213, 219),
            title: Color::Rgb(17, 24, 39),
            subtitle: Color::Rgb(75, 85, 99),

            label: Color::Rgb(75, 85, 99),
            label_focused: Color::Rgb(29, 78, 216),
            text: Color::Rgb(17, 24, 39),
            placeholder: Color::Rgb(156, 163, 175),

            create_bg: Color::Rgb(29, 78, 216),
            join_bg: Color::Rgb(21, 128, 61),
            back_bg: Color::Rgb(107, 114, 128),
            button_fg: Color::Rgb(255, 255, 255),
            disabled_bg: Color::Rgb(229, 231, 235),
            disabled_fg: Color::Rgb(156, 163, 175),
            focus_marker: Color::Rgb(29, 78, 216),

            warning: Color::Rgb(180, 83, 9),
            hint_key: Color::Rgb(21, 128, 61),
            hint_text: Color::Rgb(107, 114, 128),
        }
    }

    /// Palette for the given mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Toggle between dark and light palettes.
    pub fn toggle(&mut self) {
        *self = match self.mode {
            ThemeMode::Dark => Self::light(),
            ThemeMode::Light => Self::dark(),
        };
    }
}
