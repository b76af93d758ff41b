mod document;
mod question;

pub use document::{DEFAULT_QUIZ_DURATION, DEFAULT_QUIZ_NAME, JsonParseFailure, QuizDocument};
pub use question::{Answer, AnswerLetter, MAX_ANSWERS, Question, position_label};
