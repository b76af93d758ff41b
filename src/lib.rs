//! # quiz-editor
//!
//! Editing multiple-choice quiz questions as markdown, as a form, or as JSON.
//!
//! The heart of the crate is [`codec`], which turns a narrow markdown dialect
//! into [`Question`]s and back:
//!
//! ```rust
//! use quiz_editor::codec;
//!
//! fn main() -> Result<(), codec::DecodeFailure> {
//!     let question = codec::decode(
//!         "**Question**\nWhat is 2+2?\n\n**Answers**\nA. 3\nB. 4\n\n**Correct Answer**\nB",
//!     )?;
//!     assert_eq!(question.correct_answer().map(|a| a.text.as_str()), Some("4"));
//!
//!     println!("{}", codec::encode(&question));
//!     Ok(())
//! }
//! ```
//!
//! [`Editor`] runs the three synchronized panels in the terminal:
//!
//! ```rust,no_run
//! use quiz_editor::{Editor, QuizError, config};
//!
//! fn main() -> Result<(), QuizError> {
//!     let config = config::load(None)?;
//!     let editor = Editor::open(Some("quiz.json".into()), &config.quiz)?;
//!     editor.run()
//! }
//! ```

mod app;
pub mod codec;
pub mod config;
pub mod data;
pub mod logging;
pub mod models;
pub mod terminal;
mod text_buffer;
mod ui;

use std::io;
use std::path::PathBuf;

use ::config::ConfigError;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;
use tracing::info;
use tracing_appender::rolling::InitError;

pub use app::{App, FieldInput, FieldTarget, Panel, StatusKind, StatusMessage};
pub use data::LoadError;
pub use models::{Answer, AnswerLetter, MAX_ANSWERS, Question, QuizDocument};
pub use text_buffer::TextBuffer;

use crate::config::QuizDefaults;

/// Error type for editor operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to open log file: {0}")]
    Logging(#[from] InitError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// The interactive editor.
pub struct Editor {
    app: App,
}

impl Editor {
    /// Create an editor on a document. Saving writes to `path`, if given.
    pub fn new(document: QuizDocument, path: Option<PathBuf>) -> Self {
        Self {
            app: App::new(document, path),
        }
    }

    /// Open the quiz at `path`. A path that does not exist yet, or no path at
    /// all, starts a new quiz from `defaults`.
    pub fn open(path: Option<PathBuf>, defaults: &QuizDefaults) -> Result<Self, QuizError> {
        let document = match &path {
            Some(path) if path.exists() => data::load_quiz(path)?,
            _ => defaults.new_document(),
        };
        Ok(Self::new(document, path))
    }

    /// Run the editor in the terminal.
    ///
    /// This takes over the terminal and returns when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        info!(path = ?self.app.path(), "starting editor");
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::EditorTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(app, key) {
                    break;
                }
            }
            Event::Paste(text) => handle_paste(app, &text),
            _ => {}
        }
    }

    Ok(())
}

/// Returns true if the editor should exit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => return app.request_quit(),
            KeyCode::Char('s') => app.save(),
            _ => {}
        }
        return false;
    }

    if app.field_input().is_some() {
        handle_field_input(app, key.code);
        return false;
    }

    match key.code {
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_previous(),
        code => match app.focus {
            Panel::Markdown => app.edit_markdown(|buffer| edit_text(buffer, code)),
            Panel::Json => app.edit_json(|buffer| edit_text(buffer, code)),
            Panel::Form => handle_form_input(app, code),
        },
    }
    false
}

/// Insert pasted text into the focused text panel or field.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.field_input().is_some() {
        for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            app.input_push(c);
        }
        return;
    }

    let text = text.replace("\r\n", "\n");
    match app.focus {
        Panel::Markdown => app.edit_markdown(|buffer| buffer.insert_str(&text)),
        Panel::Json => app.edit_json(|buffer| buffer.insert_str(&text)),
        Panel::Form => {}
    }
}

fn edit_text(buffer: &mut TextBuffer, key: KeyCode) {
    match key {
        KeyCode::Char(c) => buffer.insert_char(c),
        KeyCode::Enter => buffer.insert_newline(),
        KeyCode::Backspace => buffer.backspace(),
        KeyCode::Delete => buffer.delete(),
        KeyCode::Left => buffer.move_left(),
        KeyCode::Right => buffer.move_right(),
        KeyCode::Up => buffer.move_up(),
        KeyCode::Down => buffer.move_down(),
        KeyCode::Home => buffer.move_home(),
        KeyCode::End => buffer.move_end(),
        _ => {}
    }
}

fn handle_form_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.select_next_question(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_question(),
        KeyCode::Right | KeyCode::Char('l') => app.select_next_answer(),
        KeyCode::Left | KeyCode::Char('h') => app.select_previous_answer(),
        KeyCode::Char('n') => app.add_question(),
        KeyCode::Char('x') => app.remove_question(),
        KeyCode::Char('K') => app.move_question_up(),
        KeyCode::Char('J') => app.move_question_down(),
        KeyCode::Char('a') => app.add_answer(),
        KeyCode::Char('d') => app.remove_answer(),
        KeyCode::Char('[') => app.move_answer_up(),
        KeyCode::Char(']') => app.move_answer_down(),
        KeyCode::Char('c') => app.mark_correct(),
        KeyCode::Char('t') => app.begin_edit_question_text(),
        KeyCode::Enter | KeyCode::Char('e') => app.begin_edit_answer_text(),
        _ => {}
    }
}

fn handle_field_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter => app.commit_input(),
        KeyCode::Esc => app.cancel_input(),
        KeyCode::Backspace => app.input_pop(),
        KeyCode::Char(c) => app.input_push(c),
        _ => {}
    }
}
