//! Markdown codec for quiz questions.
//!
//! The dialect is a narrow, line-oriented markdown:
//!
//! ```text
//! **Question**
//! What is 2+2?
//!
//! **Answers**
//! A. 3
//! B. 4
//!
//! **Correct Answer**
//! B
//! ```
//!
//! [`decode`] tolerates the usual variations in headline markup (`##`/`###`
//! prefixes, bold, trailing colons, question numbers) and bold answer letters;
//! [`encode`] always writes the canonical form above. Both are pure.

mod batch;
mod decoder;
pub mod dialect;
mod encoder;

use thiserror::Error;

use crate::models::Question;

pub use batch::{BatchDecode, SectionFailure, decode_batch, encode_batch, split_sections};

/// Why a text did not yield a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeFailureReason {
    #[error("question text is empty")]
    MissingQuestion,
    #[error("no answers found")]
    NoAnswers,
    #[error("no correct answer letter found")]
    MissingCorrectAnswer,
    #[error("correct answer letter `{0}` is outside A-J")]
    UnknownCorrectLetter(char),
}

/// The input did not contain a complete question. Nothing is decoded
/// partially; the offending input is kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no valid question: {reason}")]
pub struct DecodeFailure {
    pub reason: DecodeFailureReason,
    pub input: String,
}

/// Receiver for decoded questions.
pub trait QuestionSink {
    fn accept(&mut self, question: Question);
}

impl QuestionSink for Vec<Question> {
    fn accept(&mut self, question: Question) {
        self.push(question);
    }
}

/// Parse one question from dialect text.
pub fn decode(markdown: &str) -> Result<Question, DecodeFailure> {
    decoder::decode(markdown)
}

/// Decode `markdown` and hand the question to `sink`. On failure the sink is
/// left untouched.
pub fn decode_into<S: QuestionSink + ?Sized>(
    markdown: &str,
    sink: &mut S,
) -> Result<(), DecodeFailure> {
    let question = decode(markdown)?;
    sink.accept(question);
    Ok(())
}

/// Render a question in the canonical dialect.
pub fn encode(question: &Question) -> String {
    encoder::encode(question)
}
