//! Transcript rendering.
//!
//! Each message becomes a block of lines:
//! - user messages: right-aligned "You" label, then the text
//! - bot messages: left-aligned bot label, then the text
//! - system notices: drawn as bot messages, with a marker before the text
//!   and the marker modifiers on the text style
//!
//! Text is wrapped to the panel width here so the view can pin the newest
//! line to the bottom by counting lines.

use ratatui::{
    layout::Alignment,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

use crate::domain::message::Message;

use super::styles;

const USER_LABEL: &str = "You";
const BOT_LABEL: &str = "Nebula";
const SYSTEM_MARKER: &str = "• ";

/// Builds the visual lines for a run of messages, separated by blank lines.
pub fn build_transcript_lines(messages: &[Message], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (index, message) in messages.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.extend(message_lines(message, width));
    }

    lines
}

fn message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    let text_style = styles::message_text_style(message.kind);
    let (label, label_style, alignment) = if message.kind.is_remote_side() {
        (BOT_LABEL, styles::bot_label_style(), Alignment::Left)
    } else {
        (USER_LABEL, styles::user_label_style(), Alignment::Right)
    };

    let marked = message.kind.is_system_marked();
    let body_width = if marked {
        width.saturating_sub(SYSTEM_MARKER.chars().count())
    } else {
        width
    };

    let mut lines =
        vec![Line::from(Span::styled(label.to_owned(), label_style)).alignment(alignment)];
    lines.extend(
        wrap_text(&message.text, body_width)
            .into_iter()
            .enumerate()
            .map(|(row, chunk)| {
                let mut spans = Vec::with_capacity(2);
                if marked {
                    let lead = if row == 0 { SYSTEM_MARKER } else { "  " };
                    spans.push(Span::styled(lead.to_owned(), text_style));
                }
                spans.push(Span::styled(chunk, text_style));
                Line::from(spans).alignment(alignment)
            }),
    );
    lines
}

/// Splits text into rows no wider than `width` terminal columns.
///
/// Explicit newlines always start a new row. Breaks prefer the last space
/// that fits; a word longer than the row is split mid-word. Always returns at
/// least one row.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for paragraph in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        let mut last_space: Option<usize> = None;

        for ch in paragraph.chars() {
            let ch_width = ch.width().unwrap_or(0);

            if row_width + ch_width > width && !row.is_empty() {
                if ch == ' ' {
                    // The space itself is the break.
                    rows.push(std::mem::take(&mut row).trim_end().to_owned());
                    row_width = 0;
                    last_space = None;
                    continue;
                }
                match last_space {
                    Some(split_at) => {
                        let tail = row.split_off(split_at + 1);
                        rows.push(row.trim_end().to_owned());
                        row = tail;
                    }
                    None => rows.push(std::mem::take(&mut row)),
                }
                row_width = row.chars().map(|c| c.width().unwrap_or(0)).sum();
                last_space = None;
            }

            if ch == ' ' {
                last_space = Some(row.len());
            }
            row.push(ch);
            row_width += ch_width;
        }

        rows.push(row);
    }

    rows
}
