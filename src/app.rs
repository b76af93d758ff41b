use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::codec::{self, QuestionSink};
use crate::data;
use crate::models::{Answer, Question, QuizDocument};
use crate::text_buffer::TextBuffer;

/// The three views of the editor, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Markdown,
    Form,
    Json,
}

impl Panel {
    pub fn next(self) -> Self {
        match self {
            Panel::Markdown => Panel::Form,
            Panel::Form => Panel::Json,
            Panel::Json => Panel::Markdown,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Panel::Markdown => Panel::Json,
            Panel::Form => Panel::Markdown,
            Panel::Json => Panel::Form,
        }
    }
}

/// Which form field a single-line input edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    QuestionText,
    AnswerText(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub target: FieldTarget,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Editor state shared by the three panels.
///
/// The document is the single source of truth. The markdown buffer always
/// shows the selected question and the JSON buffer the whole document; each
/// panel's edits flow into the document and from there into the other two.
pub struct App {
    pub focus: Panel,
    document: QuizDocument,
    selected_question: usize,
    selected_answer: usize,
    markdown: TextBuffer,
    json: TextBuffer,
    markdown_valid: bool,
    field_input: Option<FieldInput>,
    status: Option<StatusMessage>,
    path: Option<PathBuf>,
    dirty: bool,
    quit_armed: bool,
}

impl App {
    pub fn new(document: QuizDocument, path: Option<PathBuf>) -> Self {
        let mut app = Self {
            focus: Panel::Markdown,
            document,
            selected_question: 0,
            selected_answer: 0,
            markdown: TextBuffer::new(),
            json: TextBuffer::new(),
            markdown_valid: true,
            field_input: None,
            status: None,
            path,
            dirty: false,
            quit_armed: false,
        };
        app.refresh_markdown();
        app.refresh_json();
        app
    }

    pub fn document(&self) -> &QuizDocument {
        &self.document
    }

    pub fn selected_question_index(&self) -> usize {
        self.selected_question
    }

    pub fn selected_answer_index(&self) -> usize {
        self.selected_answer
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.document.question(self.selected_question)
    }

    pub fn markdown(&self) -> &TextBuffer {
        &self.markdown
    }

    pub fn json(&self) -> &TextBuffer {
        &self.json
    }

    /// Whether the markdown panel currently holds a complete question.
    pub fn markdown_valid(&self) -> bool {
        self.markdown_valid
    }

    pub fn field_input(&self) -> Option<&FieldInput> {
        self.field_input.as_ref()
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Any new change needs its own quit confirmation.
    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.quit_armed = false;
    }

    fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind: StatusKind::Error,
            text: text.into(),
        });
    }

    // Panel synchronisation

    /// Apply `edit` to the markdown buffer and, if the text changed, decode it
    /// into the selected question.
    pub fn edit_markdown(&mut self, edit: impl FnOnce(&mut TextBuffer)) {
        let revision = self.markdown.revision();
        edit(&mut self.markdown);
        if self.markdown.revision() != revision {
            self.on_markdown_changed();
        }
    }

    /// Apply `edit` to the JSON buffer and, if the text changed, parse it into
    /// the document.
    pub fn edit_json(&mut self, edit: impl FnOnce(&mut TextBuffer)) {
        let revision = self.json.revision();
        edit(&mut self.json);
        if self.json.revision() != revision {
            self.on_json_changed();
        }
    }

    fn on_markdown_changed(&mut self) {
        let text = self.markdown.text();
        match codec::decode_into(&text, self) {
            Ok(()) => {
                debug!(question = self.selected_question, "decoded markdown");
                self.markdown_valid = true;
            }
            Err(failure) => {
                // Mid-edit text rarely decodes; keep the last good question.
                debug!(reason = %failure.reason, "markdown does not decode yet");
                self.markdown_valid = false;
            }
        }
    }

    fn on_json_changed(&mut self) {
        match QuizDocument::from_json_str(&self.json.text()) {
            Ok(document) => {
                debug!(questions = document.len(), "applied JSON edit");
                self.document = document;
                self.mark_dirty();
                self.clamp_selection();
                self.refresh_markdown();
                if self.status.as_ref().is_some_and(|s| s.kind == StatusKind::Error) {
                    self.status = None;
                }
            }
            Err(failure) => {
                warn!(line = failure.line, column = failure.column, "invalid JSON: {}", failure.message);
                self.set_error(format!("JSON: {failure}"));
            }
        }
    }

    fn refresh_markdown(&mut self) {
        let text = self
            .current_question()
            .map(codec::encode)
            .unwrap_or_default();
        self.markdown_valid = codec::decode(&text).is_ok();
        self.markdown.set_text(&text);
    }

    fn refresh_json(&mut self) {
        match self.document.to_json_pretty() {
            Ok(json) => self.json.set_text(&json),
            Err(err) => error!("failed to render quiz JSON: {}", err),
        }
    }

    /// The document changed through the form: re-render both text panels.
    fn structure_changed(&mut self) {
        self.mark_dirty();
        self.clamp_selection();
        self.refresh_markdown();
        self.refresh_json();
    }

    fn clamp_selection(&mut self) {
        self.selected_question = self
            .selected_question
            .min(self.document.len().saturating_sub(1));
        let answers = self.current_question().map_or(0, |q| q.answers.len());
        self.selected_answer = self.selected_answer.min(answers.saturating_sub(1));
    }

    // Form: selection

    pub fn select_next_question(&mut self) {
        if self.selected_question + 1 < self.document.len() {
            self.selected_question += 1;
            self.selected_answer = 0;
            self.refresh_markdown();
        }
    }

    pub fn select_previous_question(&mut self) {
        if self.selected_question > 0 {
            self.selected_question -= 1;
            self.selected_answer = 0;
            self.refresh_markdown();
        }
    }

    pub fn select_next_answer(&mut self) {
        let answers = self.current_question().map_or(0, |q| q.answers.len());
        if self.selected_answer + 1 < answers {
            self.selected_answer += 1;
        }
    }

    pub fn select_previous_answer(&mut self) {
        self.selected_answer = self.selected_answer.saturating_sub(1);
    }

    // Form: questions

    pub fn add_question(&mut self) {
        self.selected_question = if self.document.is_empty() {
            self.document.add_question(Question::blank())
        } else {
            self.document
                .insert_question_after(self.selected_question, Question::blank())
        };
        self.selected_answer = 0;
        self.structure_changed();
    }

    pub fn remove_question(&mut self) {
        if self.document.remove_question(self.selected_question).is_some() {
            self.selected_answer = 0;
            self.structure_changed();
        }
    }

    pub fn move_question_up(&mut self) {
        if self.selected_question > 0
            && self
                .document
                .move_question(self.selected_question, self.selected_question - 1)
        {
            self.selected_question -= 1;
            self.structure_changed();
        }
    }

    pub fn move_question_down(&mut self) {
        if self
            .document
            .move_question(self.selected_question, self.selected_question + 1)
        {
            self.selected_question += 1;
            self.structure_changed();
        }
    }

    // Form: answers

    pub fn add_answer(&mut self) {
        let Some(question) = self.document.question_mut(self.selected_question) else {
            self.set_error("Add a question first");
            return;
        };
        if question.add_answer(Answer::default()) {
            self.selected_answer = question.answers.len() - 1;
            self.structure_changed();
        } else {
            self.set_error("A question holds at most 10 answers (A-J)");
        }
    }

    pub fn remove_answer(&mut self) {
        let index = self.selected_answer;
        let removed = self
            .document
            .question_mut(self.selected_question)
            .and_then(|question| question.remove_answer(index));
        if removed.is_some() {
            self.structure_changed();
        }
    }

    pub fn move_answer_up(&mut self) {
        let index = self.selected_answer;
        if index == 0 {
            return;
        }
        let moved = self
            .document
            .question_mut(self.selected_question)
            .is_some_and(|question| question.move_answer(index, index - 1));
        if moved {
            self.selected_answer -= 1;
            self.structure_changed();
        }
    }

    pub fn move_answer_down(&mut self) {
        let index = self.selected_answer;
        let moved = self
            .document
            .question_mut(self.selected_question)
            .is_some_and(|question| question.move_answer(index, index + 1));
        if moved {
            self.selected_answer += 1;
            self.structure_changed();
        }
    }

    /// Mark the selected answer as the correct one.
    pub fn mark_correct(&mut self) {
        let index = self.selected_answer;
        let marked = self
            .document
            .question_mut(self.selected_question)
            .filter(|question| index < question.answers.len())
            .is_some_and(|question| question.set_correct_index(index));
        if marked {
            self.structure_changed();
        }
    }

    // Form: field input

    pub fn begin_edit_question_text(&mut self) {
        if let Some(question) = self.current_question() {
            self.field_input = Some(FieldInput {
                target: FieldTarget::QuestionText,
                value: question.text.clone(),
            });
        }
    }

    pub fn begin_edit_answer_text(&mut self) {
        let index = self.selected_answer;
        let value = self
            .current_question()
            .and_then(|question| question.answers.get(index))
            .map(|answer| answer.text.clone());
        if let Some(value) = value {
            self.field_input = Some(FieldInput {
                target: FieldTarget::AnswerText(index),
                value,
            });
        }
    }

    pub fn input_push(&mut self, c: char) {
        if let Some(input) = self.field_input.as_mut() {
            input.value.push(c);
        }
    }

    pub fn input_pop(&mut self) {
        if let Some(input) = self.field_input.as_mut() {
            input.value.pop();
        }
    }

    pub fn cancel_input(&mut self) {
        self.field_input = None;
    }

    pub fn commit_input(&mut self) {
        let Some(input) = self.field_input.take() else {
            return;
        };
        let Some(question) = self.document.question_mut(self.selected_question) else {
            return;
        };

        let value = input.value.trim().to_string();
        match input.target {
            FieldTarget::QuestionText => question.text = value,
            FieldTarget::AnswerText(index) => match question.answers.get_mut(index) {
                Some(answer) => answer.text = value,
                None => return,
            },
        }
        self.structure_changed();
    }

    /// Returns true when the editor may exit. With unsaved changes the first
    /// request only warns.
    pub fn request_quit(&mut self) -> bool {
        if !self.dirty || self.quit_armed {
            return true;
        }
        self.quit_armed = true;
        self.set_error("Unsaved changes: ctrl-s to save, ctrl-q again to quit");
        false
    }

    /// Write the document to its file.
    pub fn save(&mut self) {
        let Some(path) = self.path.clone() else {
            self.set_error("No file to save to; start the editor with a file path");
            return;
        };

        match data::save_quiz(&path, &self.document) {
            Ok(()) => {
                self.dirty = false;
                self.quit_armed = false;
                self.set_info(format!("Saved {}", path.display()));
            }
            Err(err) => {
                error!("{}", err);
                self.set_error(err.to_string());
            }
        }
    }
}

impl QuestionSink for App {
    /// A question decoded from the markdown panel replaces the selected one.
    fn accept(&mut self, question: Question) {
        match self.document.question_mut(self.selected_question) {
            Some(current) => *current = question,
            None => {
                self.selected_question = self.document.add_question(question);
                info!("created first question from markdown");
            }
        }
        self.mark_dirty();
        self.clamp_selection();
        self.refresh_json();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnswerLetter;

    const MARKDOWN: &str = "**Question**\nWhat is 2+2?\n\n**Answers**\nA. 3\nB. 4\n\n**Correct Answer**\nB";

    fn sample_document() -> QuizDocument {
        let mut document = QuizDocument::new("Arithmetic", 10);
        document.add_question(codec::decode(MARKDOWN).unwrap());
        document.add_question(Question::new(
            "What is 3+3?",
            vec![Answer::new("6"), Answer::new("7")],
            AnswerLetter::from_char('A'),
        ));
        document
    }

    #[test]
    fn test_new_renders_both_panels() {
        let app = App::new(sample_document(), None);
        assert_eq!(app.markdown().text(), MARKDOWN);
        assert!(app.markdown_valid());
        assert!(app.json().text().contains("\"name\": \"Arithmetic\""));
        assert!(!app.is_dirty());
    }

    #[test]
    fn test_markdown_edit_updates_document_and_json() {
        let mut app = App::new(sample_document(), None);
        app.edit_markdown(|buffer| {
            buffer.move_down();
            buffer.move_end();
            buffer.insert_str(" Really?");
        });

        assert!(app.markdown_valid());
        assert_eq!(app.document().questions[0].text, "What is 2+2? Really?");
        assert!(app.json().text().contains("What is 2+2? Really?"));
        assert!(app.is_dirty());
    }

    #[test]
    fn test_incomplete_markdown_keeps_state() {
        let mut app = App::new(sample_document(), None);
        let before = app.document().clone();
        app.edit_markdown(|buffer| buffer.set_text("**Question**\nhalf typed"));

        assert!(!app.markdown_valid());
        assert_eq!(app.document(), &before);
        assert_eq!(app.markdown().text(), "**Question**\nhalf typed");
    }

    #[test]
    fn test_markdown_into_empty_document() {
        let mut app = App::new(QuizDocument::default(), None);
        assert_eq!(app.markdown().text(), "");
        app.edit_markdown(|buffer| buffer.insert_str(MARKDOWN));

        assert_eq!(app.document().len(), 1);
        assert_eq!(app.current_question().map(|q| q.text.as_str()), Some("What is 2+2?"));
    }

    #[test]
    fn test_json_edit_replaces_document() {
        let mut app = App::new(sample_document(), None);
        let mut edited = app.document().clone();
        edited.questions.truncate(1);
        edited.questions[0].text = "Edited in JSON".to_string();
        let json = edited.to_json_pretty().unwrap();

        app.edit_json(|buffer| buffer.set_text(&json));

        assert_eq!(app.document(), &edited);
        assert!(app.markdown().text().contains("Edited in JSON"));
        assert!(app.status().is_none());
    }

    #[test]
    fn test_invalid_json_reports_and_keeps_state() {
        let mut app = App::new(sample_document(), None);
        let before = app.document().clone();
        app.edit_json(|buffer| buffer.insert_char('x'));

        assert_eq!(app.document(), &before);
        let status = app.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.starts_with("JSON:"));
    }

    #[test]
    fn test_form_edits_refresh_text_panels() {
        let mut app = App::new(sample_document(), None);
        app.select_next_answer();
        app.move_answer_up();
        assert_eq!(app.selected_answer_index(), 0);
        assert_eq!(app.document().questions[0].answers[0].text, "4");
        // Correctness stays with the position.
        assert!(app.markdown().text().ends_with("\nB"));
        assert_eq!(app.document().questions[0].correct_answer().map(|a| a.text.as_str()), Some("3"));

        app.mark_correct();
        assert!(app.markdown().text().ends_with("\nA"));
        assert!(app.json().text().contains("\"is_correct\": true"));
    }

    #[test]
    fn test_question_management() {
        let mut app = App::new(sample_document(), None);
        app.add_question();
        assert_eq!(app.selected_question_index(), 1);
        assert_eq!(app.document().len(), 3);
        assert!(!app.markdown_valid());

        app.move_question_up();
        assert_eq!(app.selected_question_index(), 0);
        assert_eq!(app.document().questions[0], Question::blank());

        app.remove_question();
        assert_eq!(app.document().len(), 2);
        assert_eq!(app.current_question().map(|q| q.text.as_str()), Some("What is 2+2?"));

        app.select_next_question();
        app.remove_question();
        assert_eq!(app.selected_question_index(), 0);
        app.remove_question();
        assert!(app.document().is_empty());
        assert_eq!(app.markdown().text(), "");
    }

    #[test]
    fn test_field_input() {
        let mut app = App::new(sample_document(), None);
        app.begin_edit_answer_text();
        app.input_pop();
        app.input_push('0');
        app.commit_input();
        assert_eq!(app.document().questions[0].answers[0].text, "0");
        assert!(app.field_input().is_none());

        app.begin_edit_question_text();
        app.input_push('!');
        app.cancel_input();
        assert_eq!(app.document().questions[0].text, "What is 2+2?");
    }

    #[test]
    fn test_answer_limit_reported() {
        let mut app = App::new(sample_document(), None);
        for _ in 0..8 {
            app.add_answer();
        }
        assert!(app.status().is_none());
        app.add_answer();
        assert_eq!(app.status().map(|s| s.kind), Some(StatusKind::Error));
        assert_eq!(app.current_question().map(|q| q.answers.len()), Some(10));
    }

    #[test]
    fn test_save_without_path() {
        let mut app = App::new(sample_document(), None);
        app.save();
        assert_eq!(app.status().map(|s| s.kind), Some(StatusKind::Error));
    }

    #[test]
    fn test_save_to_file() {
        let path = std::env::temp_dir().join(format!("quiz-editor-app-{}.json", std::process::id()));
        let mut app = App::new(sample_document(), Some(path.clone()));
        app.add_answer();
        assert!(app.is_dirty());

        app.save();
        let saved = data::load_quiz(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(!app.is_dirty());
        assert_eq!(&saved, app.document());
        assert_eq!(app.status().map(|s| s.kind), Some(StatusKind::Info));
    }

    #[test]
    fn test_panel_cycle() {
        let mut app = App::new(QuizDocument::default(), None);
        app.focus_next();
        assert_eq!(app.focus, Panel::Form);
        app.focus_previous();
        app.focus_previous();
        assert_eq!(app.focus, Panel::Json);
    }
}
