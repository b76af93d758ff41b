use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::{Question, position_label};

const QUESTION_PREVIEW_LENGTH: usize = 40;

pub fn render(frame: &mut Frame, area: Rect, app: &App, focused: bool) {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_color)
        .title(" Form ")
        .padding(Padding::horizontal(1));

    let (lines, selected_line) = build_lines(app, focused);
    let visible = block.inner(area).height as usize;
    let scroll = selected_line.saturating_sub(visible.saturating_sub(1));

    let widget = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(widget, area);
}

/// Lines of the form and the index of the line holding the selection.
fn build_lines(app: &App, focused: bool) -> (Vec<Line<'_>>, usize) {
    let document = app.document();
    let mut lines = vec![
        Line::from(Span::styled(
            document.name.as_str(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(
            format!(
                "{} min  ·  {} question{}",
                document.duration,
                document.len(),
                if document.len() == 1 { "" } else { "s" }
            )
            .fg(Color::DarkGray),
        ),
        Line::from(""),
    ];

    if document.is_empty() {
        lines.push(Line::from("No questions yet. Press n to add one.".fg(Color::DarkGray)));
        return (lines, 0);
    }

    let mut selected_line = 0;
    for (index, question) in document.questions.iter().enumerate() {
        let is_selected = index == app.selected_question_index();
        if is_selected {
            selected_line = lines.len();
        }
        lines.push(question_line(index, question, is_selected));

        if is_selected {
            if focused && !question.answers.is_empty() {
                selected_line = lines.len() + app.selected_answer_index();
            }
            lines.extend(answer_lines(question, app.selected_answer_index(), focused));
            lines.push(Line::from(""));
        }
    }

    (lines, selected_line)
}

fn question_line(index: usize, question: &Question, is_selected: bool) -> Line<'static> {
    let style = if is_selected {
        Style::default().fg(Color::White).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if is_selected { ">" } else { " " };
    let preview = if question.text.trim().is_empty() {
        "(no question text)".to_string()
    } else {
        truncate(question.text.lines().next().unwrap_or_default())
    };

    Line::from(vec![
        Span::styled(format!("{} ", marker), style),
        Span::styled(format!("{:2}. ", index + 1), Style::default().fg(Color::DarkGray)),
        Span::styled(preview, style),
    ])
}

fn answer_lines(question: &Question, selected: usize, focused: bool) -> Vec<Line<'static>> {
    if question.answers.is_empty() {
        return vec![Line::from("      (no answers)".fg(Color::DarkGray))];
    }

    question
        .answers_with_correctness()
        .enumerate()
        .map(|(index, (answer, is_correct))| {
            let is_selected = focused && index == selected;
            let style = match (is_selected, is_correct) {
                (true, _) => Style::default().fg(Color::Cyan).bold(),
                (false, true) => Style::default().fg(Color::Green),
                (false, false) => Style::default().fg(Color::Gray),
            };
            let check = if is_correct { "✓" } else { " " };

            Line::from(vec![
                Span::styled(format!("    {} ", check), Style::default().fg(Color::Green)),
                Span::styled(format!("{}. ", position_label(index)), style),
                Span::styled(answer.text.replace('\n', " ⏎ "), style),
            ])
        })
        .collect()
}

fn truncate(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
