//! Field input and status bars along the bottom of the editor.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, FieldInput, FieldTarget, Panel, StatusKind};
use crate::models::position_label;

const TEXT_HINTS: &str = "tab panel · ctrl-s save · ctrl-q quit";
const FORM_HINTS: &str = "j/k question · h/l answer · n/x question · J/K move · a/d answer · [/] move · c correct · t/e edit · tab · ctrl-s · ctrl-q";
const INPUT_HINTS: &str = "enter apply · esc cancel";

/// Render the single-line input used to edit a form field.
pub fn render_input(frame: &mut Frame, area: Rect, input: &FieldInput) {
    let label = match input.target {
        FieldTarget::QuestionText => " Question text ".to_string(),
        FieldTarget::AnswerText(index) => format!(" Answer {} ", position_label(index)),
    };

    let widget = Paragraph::new(format!("> {}", input.value))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(label),
        );
    frame.render_widget(widget, area);

    let cursor_x = area.x + 3 + input.value.chars().count() as u16;
    let cursor_y = area.y + 1;
    frame.set_cursor_position(Position::new(cursor_x, cursor_y));
}

/// Render key hints on the left and the latest status message on the right.
pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let hints = if app.field_input().is_some() {
        INPUT_HINTS
    } else if app.focus == Panel::Form {
        FORM_HINTS
    } else {
        TEXT_HINTS
    };

    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    frame.render_widget(Paragraph::new(hints).fg(Color::DarkGray), chunks[0]);

    let mut spans = Vec::new();
    if let Some(status) = app.status() {
        let color = match status.kind {
            StatusKind::Info => Color::Green,
            StatusKind::Error => Color::Red,
        };
        spans.push(Span::styled(status.text.as_str(), Style::default().fg(color)));
    }
    if app.is_dirty() {
        spans.push(Span::styled("  [modified]", Style::default().fg(Color::Yellow)));
    }

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
    frame.render_widget(widget, chunks[1]);
}
