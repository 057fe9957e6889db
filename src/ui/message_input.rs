//! Message input field rendering.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::message_input_state::MessageInputState;

use super::styles;

const PLACEHOLDER_TEXT: &str = "Type a message and press Enter";

const PROMPT_SYMBOL: &str = "> ";

/// Renders the input field and places the terminal cursor inside it.
///
/// When the text is wider than the field, it scrolls horizontally so the
/// cursor stays visible.
pub fn render_message_input(frame: &mut Frame<'_>, area: Rect, input_state: &MessageInputState) {
    let inner_width = usize::from(area.width.saturating_sub(2));
    let cursor_column = PROMPT_SYMBOL.len() + input_state.cursor_columns();
    let offset = horizontal_offset(cursor_column, inner_width);

    let paragraph = Paragraph::new(build_input_line(input_state))
        .scroll((0, clamp_u16(offset)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles::input_border_style()),
        );
    frame.render_widget(paragraph, area);

    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(clamp_u16(cursor_column - offset));
    let cursor_y = area.y.saturating_add(1);
    frame.set_cursor_position((cursor_x, cursor_y));
}

fn build_input_line(input_state: &MessageInputState) -> Line<'static> {
    let prompt = Span::styled(PROMPT_SYMBOL.to_owned(), styles::input_prompt_style());

    if input_state.is_empty() {
        Line::from(vec![
            prompt,
            Span::styled(PLACEHOLDER_TEXT.to_owned(), styles::input_placeholder_style()),
        ])
    } else {
        Line::from(vec![
            prompt,
            Span::styled(input_state.text(), styles::input_text_style()),
        ])
    }
}

/// Columns hidden on the left so that `cursor_column` fits in `width`.
fn horizontal_offset(cursor_column: usize, width: usize) -> usize {
    if width == 0 {
        return cursor_column;
    }
    cursor_column.saturating_sub(width - 1)
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
