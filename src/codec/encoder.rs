//! Serializer producing the canonical spelling of the dialect.

use crate::models::{Question, position_label};

use super::dialect::Headline;

pub(super) fn encode(question: &Question) -> String {
    let mut out = String::new();

    out.push_str(Headline::Question.canonical());
    out.push('\n');
    out.push_str(&question.text);
    out.push_str("\n\n");

    out.push_str(Headline::Answers.canonical());
    out.push('\n');
    for (index, answer) in question.answers.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", position_label(index), answer.text));
    }
    out.push('\n');

    out.push_str(Headline::CorrectAnswer.canonical());
    out.push('\n');
    if let Some(letter) = question.correct_letter {
        out.push(letter.as_char());
    }

    out
}
