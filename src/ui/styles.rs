//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::message::MessageKind;

// =============================================================================
// Transcript styles
// =============================================================================

/// Style for the "You" label above outgoing messages.
pub fn user_label_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Style for the bot name above replies.
pub fn bot_label_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Style for message body text, by origin.
///
/// System notices take the bot style with the marker modifiers added.
pub fn message_text_style(kind: MessageKind) -> Style {
    let base = match kind.base() {
        MessageKind::User => Style::default().fg(Color::White),
        _ => Style::default().fg(Color::Gray),
    };

    if kind.is_system_marked() {
        base.patch(system_marker_style())
    } else {
        base
    }
}

/// Modifiers layered on top of the bot style for system notices.
pub fn system_marker_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM)
}

/// Placeholder text in an empty panel.
pub fn hint_text_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

// =============================================================================
// Input and chrome
// =============================================================================

pub fn input_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn transcript_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn input_prompt_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn status_bar_style() -> Style {
    Style::default().fg(Color::Black).bg(Color::Gray)
}

pub fn popup_border_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}
