mod form;
mod status;
mod text_panel;

use ratatui::{prelude::*, widgets::Block};

use crate::app::{App, Panel};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    let input_height = if app.field_input().is_some() { 3 } else { 0 };
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(input_height),
        Constraint::Length(1),
    ])
    .split(area);

    let panels = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(chunks[0]);

    // The field input owns the cursor while it is open.
    let editing = app.field_input().is_some();

    text_panel::render(
        frame,
        panels[0],
        markdown_title(app),
        app.markdown(),
        !editing && app.focus == Panel::Markdown,
    );
    form::render(frame, panels[1], app, !editing && app.focus == Panel::Form);
    text_panel::render(
        frame,
        panels[2],
        Line::from(" JSON "),
        app.json(),
        !editing && app.focus == Panel::Json,
    );

    if let Some(input) = app.field_input() {
        status::render_input(frame, chunks[1], input);
    }
    status::render_status(frame, chunks[2], app);
}

fn markdown_title(app: &App) -> Line<'static> {
    let label = match app.current_question() {
        Some(_) => format!(" Markdown · Q{} ", app.selected_question_index() + 1),
        None => " Markdown · new question ".to_string(),
    };

    if app.markdown_valid() {
        Line::from(label)
    } else {
        Line::from(vec![
            Span::raw(label),
            Span::styled("(incomplete) ", Style::default().fg(Color::Yellow)),
        ])
    }
}
