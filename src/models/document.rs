//! The quiz document exchanged with the JSON panel and saved to disk.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::question::{Question, move_item};

pub const DEFAULT_QUIZ_NAME: &str = "Untitled Quiz";
pub const DEFAULT_QUIZ_DURATION: u32 = 60;

/// JSON text that could not be read as a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct JsonParseFailure {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl From<serde_json::Error> for JsonParseFailure {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// A named, timed collection of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDocument {
    #[serde(default = "default_name")]
    pub name: String,
    /// Whole minutes. Fractional or negative values are rejected on parse.
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub questions: Vec<Question>,
}

fn default_name() -> String {
    DEFAULT_QUIZ_NAME.to_string()
}

fn default_duration() -> u32 {
    DEFAULT_QUIZ_DURATION
}

impl Default for QuizDocument {
    fn default() -> Self {
        Self::new(DEFAULT_QUIZ_NAME, DEFAULT_QUIZ_DURATION)
    }
}

impl QuizDocument {
    pub fn new(name: impl Into<String>, duration: u32) -> Self {
        Self {
            name: name.into(),
            duration,
            questions: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, JsonParseFailure> {
        Ok(serde_json::from_str(json)?)
    }

    /// Two-space indented JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn question_mut(&mut self, index: usize) -> Option<&mut Question> {
        self.questions.get_mut(index)
    }

    /// Append a question and return its index.
    pub fn add_question(&mut self, question: Question) -> usize {
        self.questions.push(question);
        self.questions.len() - 1
    }

    /// Insert a question right after `index`, or at the end when `index` is
    /// out of range. Returns the new question's index.
    pub fn insert_question_after(&mut self, index: usize, question: Question) -> usize {
        let position = (index + 1).min(self.questions.len());
        self.questions.insert(position, question);
        position
    }

    pub fn remove_question(&mut self, index: usize) -> Option<Question> {
        if index < self.questions.len() {
            Some(self.questions.remove(index))
        } else {
            None
        }
    }

    pub fn move_question(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.questions, from, to)
    }
}
