//! Centralized theme constants and style functions for consistent UI styling.
//!
//! All colors, layout constants, and common styles are defined here
//! so every screen and component looks the same.

use haraka_api::endpoints::{fee_assignments::AssignmentStatus, payments::PaymentStatus, Money};
use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// Colors
// =============================================================================

/// Paid amounts and completed payments
pub const COLOR_POSITIVE: Color = Color::Green;

/// Outstanding balances and failed payments
pub const COLOR_NEGATIVE: Color = Color::Red;

/// Zero amounts and cancelled items
pub const COLOR_ZERO: Color = Color::DarkGray;

/// Background color for selected/highlighted rows
pub const COLOR_SELECTION_BG: Color = Color::DarkGray;

/// Color for table headers
pub const COLOR_HEADER: Color = Color::Yellow;

/// Color for help text and secondary information
pub const COLOR_HELP_TEXT: Color = Color::Gray;

/// Color for screen titles and accent text
pub const COLOR_TITLE: Color = Color::Cyan;

/// Color for loading/status messages and pending payments
pub const COLOR_LOADING: Color = Color::Yellow;

/// Border color for error alerts and destructive confirmations
pub const COLOR_BORDER_DANGER: Color = Color::Red;

/// Border color for success alerts
pub const COLOR_BORDER_SUCCESS: Color = Color::Green;

/// Border color for informational popups
pub const COLOR_BORDER_INFO: Color = Color::Blue;

/// Border color for accent/highlighted elements
pub const COLOR_BORDER_ACCENT: Color = Color::Cyan;

/// Color for input fields when focused
pub const COLOR_INPUT_FOCUSED: Color = Color::Yellow;

/// Background for form fields when focused
pub const COLOR_FORM_FIELD_BG: Color = Color::DarkGray;

// =============================================================================
// Layout Constants
// =============================================================================

/// Standard margin around screen content
pub const SCREEN_MARGIN: u16 = 2;

/// Height of the title/header area
pub const TITLE_HEIGHT: u16 = 1;

/// Height of the help bar at the bottom
pub const HELP_BAR_HEIGHT: u16 = 3;

/// Height of a single-line bordered input
pub const INPUT_HEIGHT: u16 = 3;

/// Height of the student card shown above per-student screens
pub const STUDENT_CARD_HEIGHT: u16 = 4;

/// Standard column spacing for tables
pub const TABLE_COLUMN_SPACING: u16 = 2;

/// Height of summary cards
pub const SUMMARY_CARD_HEIGHT: u16 = 3;

// =============================================================================
// Style Functions
// =============================================================================

/// Style for selected/highlighted rows in tables and lists
pub fn selection_style() -> Style {
    Style::default()
        .bg(COLOR_SELECTION_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for table headers
pub fn header_style() -> Style {
    Style::default()
        .fg(COLOR_HEADER)
        .add_modifier(Modifier::BOLD)
}

/// Style for help bar text
pub fn help_text_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

/// Style for screen titles
pub fn title_style() -> Style {
    Style::default()
        .fg(COLOR_TITLE)
        .add_modifier(Modifier::BOLD)
}

/// Style for loading/status messages
pub fn loading_style() -> Style {
    Style::default().fg(COLOR_LOADING)
}

/// Style for form fields when focused
pub fn form_field_focused_style() -> Style {
    Style::default()
        .fg(COLOR_INPUT_FOCUSED)
        .bg(COLOR_FORM_FIELD_BG)
        .add_modifier(Modifier::BOLD)
}

/// Style for form fields when not focused
pub fn form_field_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for read-only form values
pub fn form_field_readonly_style() -> Style {
    Style::default().fg(COLOR_HELP_TEXT)
}

pub fn danger_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_DANGER)
        .add_modifier(Modifier::BOLD)
}

pub fn success_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_SUCCESS)
        .add_modifier(Modifier::BOLD)
}

pub fn info_border_style() -> Style {
    Style::default()
        .fg(COLOR_BORDER_INFO)
        .add_modifier(Modifier::BOLD)
}

pub fn accent_border_style() -> Style {
    Style::default().fg(COLOR_BORDER_ACCENT)
}

// =============================================================================
// Status Colors
// =============================================================================

/// Outstanding balances are red, settled ones gray.
pub fn balance_color(balance: Money) -> Color {
    if balance.is_positive() {
        COLOR_NEGATIVE
    } else {
        COLOR_ZERO
    }
}

pub fn payment_status_color(status: PaymentStatus) -> Color {
    match status {
        PaymentStatus::Completed => COLOR_POSITIVE,
        PaymentStatus::Pending | PaymentStatus::Processing => COLOR_LOADING,
        PaymentStatus::Failed => COLOR_NEGATIVE,
        PaymentStatus::Cancelled | PaymentStatus::Unknown => COLOR_ZERO,
    }
}

pub fn assignment_status_color(status: AssignmentStatus) -> Color {
    match status {
        AssignmentStatus::Active => COLOR_LOADING,
        AssignmentStatus::FullyPaid => COLOR_POSITIVE,
        AssignmentStatus::Cancelled => COLOR_ZERO,
    }
}
