//! Recognition vocabulary of the question dialect.
//!
//! Every spelling the decoder accepts lives in one of the tables below, so a
//! new variant is a new table row rather than another branch in the scanner.

use crate::models::AnswerLetter;

/// Section markers of the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Headline {
    Question,
    Answers,
    CorrectAnswer,
}

impl Headline {
    /// Keyword as matched against a case-folded line.
    pub fn keyword(self) -> &'static str {
        match self {
            Headline::Question => "question",
            Headline::Answers => "answers",
            Headline::CorrectAnswer => "correct answer",
        }
    }

    /// The spelling the encoder writes.
    pub fn canonical(self) -> &'static str {
        match self {
            Headline::Question => "**Question**",
            Headline::Answers => "**Answers**",
            Headline::CorrectAnswer => "**Correct Answer**",
        }
    }
}

/// Markup allowed in front of a headline keyword.
const HEADLINE_PREFIXES: &[&str] = &["## **", "### **", "**", "## ", "### ", ""];

/// Line endings that make a keyword line a headline whatever sits between.
const HEADLINE_SUFFIXES: &[&str] = &["**", ":**", ":"];

/// Longest question number accepted after a keyword (`**Question 12:**`).
const MAX_NUMBER_DIGITS: usize = 2;

/// Opening and closing markup around an answer letter, in stripping order.
const ANSWER_PREFIXES: &[(&str, &str)] = &[("**", ".**"), ("**", "."), ("", ".")];

/// Whether `line` introduces the section named by `headline`.
pub fn is_headline(line: &str, headline: Headline) -> bool {
    let folded = line.trim().to_lowercase();
    let keyword = headline.keyword();

    HEADLINE_PREFIXES.iter().any(|prefix| {
        let rest = match folded
            .strip_prefix(*prefix)
            .and_then(|rest| rest.strip_prefix(keyword))
        {
            Some(rest) => rest,
            None => return false,
        };

        HEADLINE_SUFFIXES
            .iter()
            .any(|suffix| folded.ends_with(*suffix))
            || is_numbering(rest)
    })
}

/// Empty, or a short number with optional `:` and closing `**`.
fn is_numbering(rest: &str) -> bool {
    let rest = rest.trim();
    let rest = rest.strip_suffix("**").unwrap_or(rest);
    let rest = rest.strip_suffix(':').unwrap_or(rest).trim();

    rest.is_empty()
        || (rest.len() <= MAX_NUMBER_DIGITS && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Splits a leading answer marker off `text`, returning the letter and what
/// follows the first matching form.
fn split_answer_marker(text: &str) -> Option<(AnswerLetter, &str)> {
    ANSWER_PREFIXES.iter().find_map(|(open, close)| {
        let rest = text.strip_prefix(*open)?;
        let mut chars = rest.chars();
        let letter = AnswerLetter::from_char(chars.next()?)?;
        let rest = chars.as_str().strip_prefix(*close)?;
        Some((letter, rest))
    })
}

/// The letter of a line that opens a new answer (`A. ...`, `**b.** ...`).
pub fn answer_start(line: &str) -> Option<AnswerLetter> {
    split_answer_marker(line.trim()).map(|(letter, _)| letter)
}

/// Answer text with its letter marker removed and surrounding whitespace
/// trimmed. Text without a marker is only trimmed.
pub fn strip_answer_marker(text: &str) -> &str {
    let text = text.trim();
    match split_answer_marker(text) {
        Some((_, rest)) => rest.trim(),
        None => text,
    }
}

/// A letter leading the line after optional whitespace, uppercased. Anything
/// after the letter is ignored.
pub fn leading_letter(line: &str) -> Option<char> {
    line.trim_start()
        .chars()
        .next()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
}
