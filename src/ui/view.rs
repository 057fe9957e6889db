use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::domain::shell_state::ShellState;

use super::message_input::render_message_input;
use super::message_rendering::build_transcript_lines;
use super::styles;

const TRANSCRIPT_TITLE: &str = " Nebula Chat ";
const EMPTY_TRANSCRIPT_TEXT: &str = "No messages yet. Say hello!";
const KEY_HINTS: &str = "Enter/Ctrl+S: send | Ctrl+E: explore | Esc: quit";

pub fn render(frame: &mut Frame<'_>, state: &ShellState) {
    // 3 lines for input: 1 border + 1 text + 1 border
    let [transcript_area, input_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_transcript(frame, transcript_area, state);
    render_message_input(frame, input_area, state.input());

    let status = Paragraph::new(status_line(state)).style(styles::status_bar_style());
    frame.render_widget(status, status_area);

    if let Some(text) = state.popup() {
        render_popup(frame, text);
    }
}

fn render_transcript(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let block = Block::default()
        .title(TRANSCRIPT_TITLE)
        .borders(Borders::ALL)
        .border_style(styles::transcript_border_style());

    let transcript = state.transcript();
    if transcript.is_empty() {
        let panel = Paragraph::new(EMPTY_TRANSCRIPT_TEXT)
            .style(styles::hint_text_style())
            .block(block);
        frame.render_widget(panel, area);
        return;
    }

    let width = usize::from(area.width.saturating_sub(2));
    let viewport_height = usize::from(area.height.saturating_sub(2));
    let lines = build_transcript_lines(transcript.messages(), width);
    let offset = transcript
        .scroll_anchor()
        .map(|anchor| {
            let through_anchor = build_transcript_lines(&transcript.messages()[..=anchor], width);
            bottom_pinned_offset(through_anchor.len(), viewport_height)
        })
        .unwrap_or(0);

    let panel = Paragraph::new(lines)
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
        .block(block);
    frame.render_widget(panel, area);
}

/// First visible line such that line `line_count - 1` sits at the bottom.
fn bottom_pinned_offset(line_count: usize, viewport_height: usize) -> usize {
    line_count.saturating_sub(viewport_height)
}

fn render_popup(frame: &mut Frame<'_>, text: &str) {
    let area = centered_rect(frame.area(), 40, 5);
    let popup = Paragraph::new(Line::from(text.to_owned()).centered())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(styles::popup_border_style())
                .title(" Explore ")
                .title_bottom(Line::from(" any key to close ").centered()),
        );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    rect
}

fn status_line(state: &ShellState) -> String {
    let transport = state.transport_label();
    match state.connection_state() {
        Some(connection) => format!(
            "transport: {transport} ({}) | {KEY_HINTS}",
            connection.as_label()
        ),
        None => format!("transport: {transport} | {KEY_HINTS}"),
    }
}
