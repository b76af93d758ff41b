mod loader;

pub use loader::{LoadError, load_quiz, read_text, save_quiz, write_text};
