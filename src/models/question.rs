use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of answer positions that can be named by a letter (`A` through `J`).
pub const MAX_ANSWERS: usize = 10;

/// A letter naming an answer position. `A` is the first answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnswerLetter(u8);

impl AnswerLetter {
    /// Letter for a 0-based answer position, if it is addressable.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < MAX_ANSWERS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Parse a letter, ignoring case. Letters past `J` are rejected.
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Self::from_index((upper as u8 - b'A') as usize)
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        (b'A' + self.0) as char
    }

    /// Every addressable letter, in order.
    pub fn all() -> impl Iterator<Item = AnswerLetter> {
        (0..MAX_ANSWERS as u8).map(Self)
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Label shown in front of the answer at `index`.
///
/// Positions past `J` keep counting up the alphabet so nothing is lost when
/// rendering, even though those labels are not read back.
pub fn position_label(index: usize) -> char {
    char::from_u32('A' as u32 + index as u32).unwrap_or('?')
}

/// A single answer option. Whether it is correct is decided by its position
/// in the owning [`Question`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
}

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A multiple-choice question.
///
/// On the wire every answer carries an `is_correct` flag; in memory only the
/// correct letter is kept and the flags are recomputed from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    pub text: String,
    pub answers: Vec<Answer>,
    pub correct_letter: Option<AnswerLetter>,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        answers: Vec<Answer>,
        correct_letter: Option<AnswerLetter>,
    ) -> Self {
        Self {
            text: text.into(),
            answers,
            correct_letter,
        }
    }

    /// A fresh question as the form editor creates it: no text, one empty
    /// answer, nothing marked correct.
    pub fn blank() -> Self {
        Self::new("", vec![Answer::default()], None)
    }

    /// Whether the answer at `index` is the correct one.
    pub fn is_correct(&self, index: usize) -> bool {
        self.correct_letter
            .is_some_and(|letter| letter.index() == index && index < self.answers.len())
    }

    /// The correct answer, or `None` when no letter is set or the letter
    /// points past the last answer.
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.correct_letter
            .and_then(|letter| self.answers.get(letter.index()))
    }

    /// Answers paired with their derived correctness flag.
    pub fn answers_with_correctness(&self) -> impl Iterator<Item = (&Answer, bool)> {
        self.answers
            .iter()
            .enumerate()
            .map(|(index, answer)| (answer, self.is_correct(index)))
    }

    /// Mark the answer at `index` as correct. Returns false if the position
    /// has no letter.
    pub fn set_correct_index(&mut self, index: usize) -> bool {
        match AnswerLetter::from_index(index) {
            Some(letter) => {
                self.correct_letter = Some(letter);
                true
            }
            None => false,
        }
    }

    /// Append an answer. Returns false once every letter is taken.
    pub fn add_answer(&mut self, answer: Answer) -> bool {
        if self.answers.len() >= MAX_ANSWERS {
            return false;
        }
        self.answers.push(answer);
        true
    }

    pub fn remove_answer(&mut self, index: usize) -> Option<Answer> {
        if index < self.answers.len() {
            Some(self.answers.remove(index))
        } else {
            None
        }
    }

    /// Move an answer to a new position. The correct letter stays where it is,
    /// so correctness follows the position rather than the answer.
    pub fn move_answer(&mut self, from: usize, to: usize) -> bool {
        move_item(&mut self.answers, from, to)
    }
}

pub(crate) fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}

#[derive(Serialize, Deserialize)]
struct QuestionRecord {
    #[serde(default)]
    text: String,
    #[serde(default)]
    answers: Vec<AnswerRecord>,
}

#[derive(Serialize, Deserialize)]
struct AnswerRecord {
    #[serde(default)]
    text: String,
    #[serde(default)]
    is_correct: bool,
}

impl From<QuestionRecord> for Question {
    fn from(record: QuestionRecord) -> Self {
        let correct_letter = record
            .answers
            .iter()
            .position(|answer| answer.is_correct)
            .and_then(AnswerLetter::from_index);
        let answers = record
            .answers
            .into_iter()
            .map(|answer| Answer::new(answer.text))
            .collect();

        Question::new(record.text, answers, correct_letter)
    }
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        let answers = question
            .answers
            .iter()
            .enumerate()
            .map(|(index, answer)| AnswerRecord {
                text: answer.text.clone(),
                is_correct: question.is_correct(index),
            })
            .collect();

        QuestionRecord {
            text: question.text,
            answers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new(
            "What is 2+2?",
            vec![Answer::new("3"), Answer::new("4"), Answer::new("5")],
            AnswerLetter::from_char('B'),
        )
    }

    #[test]
    fn test_letters() {
        assert_eq!(AnswerLetter::from_char('a').map(AnswerLetter::index), Some(0));
        assert_eq!(AnswerLetter::from_char('J').map(AnswerLetter::index), Some(9));
        assert!(AnswerLetter::from_char('K').is_none());
        assert!(AnswerLetter::from_char('1').is_none());
        assert_eq!(AnswerLetter::from_index(2).map(AnswerLetter::as_char), Some('C'));
        assert!(AnswerLetter::from_index(MAX_ANSWERS).is_none());
        assert_eq!(AnswerLetter::all().count(), MAX_ANSWERS);
        assert_eq!(position_label(11), 'L');
    }

    #[test]
    fn test_correctness_is_positional() {
        let question = sample();
        let flags: Vec<bool> = question
            .answers_with_correctness()
            .map(|(_, correct)| correct)
            .collect();
        assert_eq!(flags, vec![false, true, false]);
        assert_eq!(question.correct_answer(), Some(&Answer::new("4")));
    }

    #[test]
    fn test_letter_past_last_answer() {
        let mut question = sample();
        question.correct_letter = AnswerLetter::from_char('E');
        assert!(question.correct_answer().is_none());
        assert!(!question.answers_with_correctness().any(|(_, correct)| correct));
    }

    #[test]
    fn test_move_answer_keeps_letter() {
        let mut question = sample();
        assert!(question.move_answer(1, 0));
        assert_eq!(question.answers[0].text, "4");
        assert_eq!(question.correct_letter, AnswerLetter::from_char('B'));
        assert_eq!(question.correct_answer(), Some(&Answer::new("3")));
        assert!(!question.move_answer(0, 3));
    }

    #[test]
    fn test_add_answer_limit() {
        let mut question = Question::blank();
        for _ in 1..MAX_ANSWERS {
            assert!(question.add_answer(Answer::default()));
        }
        assert!(!question.add_answer(Answer::default()));
        assert_eq!(question.answers.len(), MAX_ANSWERS);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "What is 2+2?",
                "answers": [
                    { "text": "3", "is_correct": false },
                    { "text": "4", "is_correct": true },
                    { "text": "5", "is_correct": false }
                ]
            })
        );

        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_json_without_flags() {
        let question: Question =
            serde_json::from_str(r#"{"text": "Pick", "answers": [{"text": "x"}]}"#).unwrap();
        assert_eq!(question.answers.len(), 1);
        assert!(question.correct_letter.is_none());
    }
}
