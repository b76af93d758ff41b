//! Several questions in one text.
//!
//! Sections are separated by `---` lines, or simply start at the next
//! question headline, which is what [`encode_batch`] relies on.

use crate::models::Question;

use super::dialect::{self, Headline};
use super::{DecodeFailure, decode, encode};

/// Outcome of decoding a multi-question text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchDecode {
    pub questions: Vec<Question>,
    pub failures: Vec<SectionFailure>,
}

impl BatchDecode {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A section that did not decode, numbered from 0 among non-blank sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFailure {
    pub section: usize,
    pub failure: DecodeFailure,
}

fn is_delimiter(line: &str) -> bool {
    let line = line.trim();
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

/// Split `markdown` into the sections that each hold one question.
pub fn split_sections(markdown: &str) -> Vec<String> {
    let mut sections = Vec::new();
    let mut current = String::new();
    let mut has_question = false;

    let mut close = |current: &mut String, has_question: &mut bool| {
        if !current.trim().is_empty() {
            sections.push(std::mem::take(current));
        }
        current.clear();
        *has_question = false;
    };

    for line in markdown.lines() {
        if is_delimiter(line) {
            close(&mut current, &mut has_question);
            continue;
        }

        if dialect::is_headline(line, Headline::Question) {
            if has_question {
                close(&mut current, &mut has_question);
            }
            has_question = true;
        }

        current.push_str(line);
        current.push('\n');
    }
    close(&mut current, &mut has_question);

    sections
}

/// Decode every section, keeping the questions that decode and recording the
/// ones that do not.
pub fn decode_batch(markdown: &str) -> BatchDecode {
    let mut batch = BatchDecode::default();

    for (section, text) in split_sections(markdown).iter().enumerate() {
        match decode(text) {
            Ok(question) => batch.questions.push(question),
            Err(failure) => batch.failures.push(SectionFailure { section, failure }),
        }
    }

    batch
}

/// Encode each question, separated by a blank line.
pub fn encode_batch(questions: &[Question]) -> String {
    questions.iter().map(encode).collect::<Vec<_>>().join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DecodeFailureReason;
    use crate::models::{Answer, AnswerLetter};

    fn question(text: &str, letter: char) -> Question {
        Question::new(
            text,
            vec![Answer::new("first"), Answer::new("second")],
            AnswerLetter::from_char(letter),
        )
    }

    #[test]
    fn test_batch_round_trip() {
        let questions = vec![question("One?", 'A'), question("Two?", 'B'), question("Three?", 'A')];
        let text = encode_batch(&questions);

        assert_eq!(split_sections(&text).len(), 3);
        let batch = decode_batch(&text);
        assert!(batch.is_clean());
        assert_eq!(batch.questions, questions);
    }

    #[test]
    fn test_delimited_sections() {
        let text = "### **Question:**
Capital of France?
### **Answers:**
A. Paris
B. Rome
### **Correct Answer:**
A.
---

---
### **Question:**
Broken, no answers
### **Answers:**
### **Correct Answer:**
A.
---
";
        let batch = decode_batch(text);
        assert_eq!(batch.questions.len(), 1);
        assert_eq!(batch.questions[0].text, "Capital of France?");
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].section, 1);
        assert_eq!(batch.failures[0].failure.reason, DecodeFailureReason::NoAnswers);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_sections("\n  \n---\n").is_empty());
        assert_eq!(decode_batch(""), BatchDecode::default());
        assert_eq!(encode_batch(&[]), "");
    }
}
