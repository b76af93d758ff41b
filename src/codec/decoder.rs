//! Line scanner turning dialect text into a [`Question`].

use crate::models::{Answer, AnswerLetter, Question};

use super::dialect::{self, Headline};
use super::{DecodeFailure, DecodeFailureReason};

/// Where the scanner is in the document. States only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the question headline.
    None,
    /// Collecting question text.
    Question,
    /// Collecting answers.
    Answers,
    /// Waiting for the correct-answer letter.
    CorrectAnswer,
}

#[derive(Debug)]
struct Decoder {
    state: State,
    text: String,
    answers: Vec<Answer>,
    buffer: Option<String>,
    correct: Option<char>,
}

impl Decoder {
    fn new() -> Self {
        Self {
            state: State::None,
            text: String::new(),
            answers: Vec::new(),
            buffer: None,
            correct: None,
        }
    }

    fn feed(&mut self, line: &str) {
        match self.state {
            State::None => {
                if dialect::is_headline(line, Headline::Question) {
                    self.state = State::Question;
                }
            }
            State::Question => {
                if dialect::is_headline(line, Headline::Answers) {
                    self.state = State::Answers;
                } else {
                    self.text.push_str(line);
                    self.text.push('\n');
                }
            }
            State::Answers => {
                if dialect::is_headline(line, Headline::CorrectAnswer) {
                    self.flush_answer();
                    self.state = State::CorrectAnswer;
                } else if dialect::answer_start(line).is_some() {
                    self.flush_answer();
                    self.buffer = Some(line.to_string());
                } else if let Some(buffer) = self.buffer.as_mut() {
                    buffer.push('\n');
                    buffer.push_str(line);
                }
            }
            State::CorrectAnswer => {
                // Only the first letter line counts.
                if self.correct.is_none() {
                    self.correct = dialect::leading_letter(line);
                }
            }
        }
    }

    fn flush_answer(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.answers
                .push(Answer::new(dialect::strip_answer_marker(&buffer)));
        }
    }

    fn finish(mut self) -> Result<Question, DecodeFailureReason> {
        self.flush_answer();

        let text = self.text.trim();
        if text.is_empty() {
            return Err(DecodeFailureReason::MissingQuestion);
        }
        if self.answers.is_empty() {
            return Err(DecodeFailureReason::NoAnswers);
        }
        let letter = self
            .correct
            .ok_or(DecodeFailureReason::MissingCorrectAnswer)?;
        let letter =
            AnswerLetter::from_char(letter).ok_or(DecodeFailureReason::UnknownCorrectLetter(letter))?;

        Ok(Question::new(text, self.answers, Some(letter)))
    }
}

pub(super) fn decode(markdown: &str) -> Result<Question, DecodeFailure> {
    let mut decoder = Decoder::new();
    for line in markdown.lines() {
        decoder.feed(line);
    }
    decoder.finish().map_err(|reason| DecodeFailure {
        reason,
        input: markdown.to_string(),
    })
}
