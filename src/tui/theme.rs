//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;
use crate::scoring::{LIKELY_THRESHOLD, POSSIBLE_THRESHOLD};

/// Resolved theme variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Terminal background luma above which the light palette is used
const LIGHT_LUMA_THRESHOLD: f32 = 0.6;

/// Pick a concrete theme. `Auto` queries the terminal background and
/// falls back to dark when the terminal doesn't answer.
pub fn resolve_theme(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::Dark,
        ThemeMode::Light => Theme::Light,
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > LIGHT_LUMA_THRESHOLD => Theme::Light,
            Ok(_) => Theme::Dark,
            Err(e) => {
                tracing::debug!(error = %e, "terminal background unknown, using dark theme");
                Theme::Dark
            }
        },
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Score-based colors (high score is good)
    pub score_high: Color,
    pub score_mid: Color,
    pub score_low: Color,

    // Score bar colors
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub favorite_marker: Color,

    // Styles
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
}

impl ThemeColors {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    /// Dark theme palette
    pub fn dark() -> Self {
        Self {
            score_high: Color::Rgb(46, 204, 113),
            score_mid: Color::Rgb(241, 196, 15),
            score_low: Color::Rgb(231, 76, 60),
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            favorite_marker: Color::Yellow,
            header_style: Style::new().bold(),
            row_selected: Style::new().bg(Color::Rgb(40, 58, 107)).bold(),
            muted: Color::Gray,
            title_color: Color::Rgb(155, 89, 255),
            tab_active_style: Style::new().fg(Color::Rgb(155, 89, 255)).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Rgb(155, 89, 255),
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Rgb(155, 89, 255),
            popup_title: Style::new().fg(Color::Rgb(155, 89, 255)).bold(),
            popup_bg: Color::Indexed(234),
        }
    }

    /// Light theme palette
    pub fn light() -> Self {
        Self {
            score_high: Color::Rgb(31, 95, 74),
            score_mid: Color::Rgb(156, 110, 0),
            score_low: Color::Rgb(85, 34, 68),
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Indexed(244),
            favorite_marker: Color::Rgb(156, 110, 0),
            header_style: Style::new().bold(),
            row_selected: Style::new().bg(Color::Indexed(189)).bold(),
            muted: Color::Indexed(242),
            title_color: Color::Rgb(40, 58, 107),
            tab_active_style: Style::new().fg(Color::Rgb(40, 58, 107)).bold(),
            tab_inactive_style: Style::new().fg(Color::Indexed(246)),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Rgb(40, 58, 107),
            flash_success: Color::Rgb(31, 95, 74),
            flash_error: Color::Rgb(170, 30, 30),
            popup_border: Color::Rgb(40, 58, 107),
            popup_title: Style::new().fg(Color::Rgb(40, 58, 107)).bold(),
            popup_bg: Color::Indexed(255),
        }
    }

    /// Color for a 0-100 score, banded at the label thresholds
    pub fn score_color(&self, score: f64) -> Color {
        if score >= LIKELY_THRESHOLD {
            self.score_high
        } else if score >= POSSIBLE_THRESHOLD {
            self.score_mid
        } else {
            self.score_low
        }
    }
}
