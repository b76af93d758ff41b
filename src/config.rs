//! Layered configuration.
//!
//! `defaults/quiz-editor.default.toml` is embedded into the binary. A user file
//! and `QUIZ_EDITOR__*` environment variables are layered on top of it through
//! [`Loader`] before deserializing into [`EditorConfig`].

use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;

use crate::models::QuizDocument;

const DEFAULT_TOML: &str = include_str!("../defaults/quiz-editor.default.toml");

/// Prefix of environment variables that override configuration keys, e.g.
/// `QUIZ_EDITOR__QUIZ__DURATION=90`.
pub const ENV_PREFIX: &str = "QUIZ_EDITOR";

#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    pub quiz: QuizDefaults,
    pub logging: LoggingConfig,
}

/// Values given to newly created quizzes.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizDefaults {
    pub name: String,
    pub duration: u32,
}

impl QuizDefaults {
    pub fn new_document(&self) -> QuizDocument {
        QuizDocument::new(self.name.clone(), self.duration)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

impl LoggingConfig {
    /// Log file for the interactive editor, if one is configured.
    pub fn file(&self) -> Option<&Path> {
        let file = self.file.trim();
        if file.is_empty() {
            None
        } else {
            Some(Path::new(file))
        }
    }
}

/// Helper for layering overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer `QUIZ_EDITOR__SECTION__KEY` environment variables.
    pub fn with_env(mut self) -> Self {
        let source = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override. Overrides win over every layered
    /// source, which is how command-line flags such as `--name` take effect.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<EditorConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Defaults, then `path` if given, then the environment. Further overrides
/// can be applied before building.
pub fn loader(path: Option<&Path>) -> Loader {
    let mut loader = Loader::new();
    if let Some(path) = path {
        loader = loader.with_file(path);
    }
    loader.with_env()
}

pub fn load(path: Option<&Path>) -> Result<EditorConfig, ConfigError> {
    loader(path).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_embedded_defaults() {
        let config = Loader::new().build().unwrap();
        assert_eq!(config.quiz.name, "Untitled Quiz");
        assert_eq!(config.quiz.duration, 60);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file().is_none());
    }

    #[test]
    fn test_override() {
        let config = Loader::new()
            .set_override("quiz.duration", 90_i64)
            .unwrap()
            .set_override("logging.file", "editor.log")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.quiz.duration, 90);
        assert_eq!(config.logging.file(), Some(Path::new("editor.log")));

        let document = config.quiz.new_document();
        assert_eq!(document.duration, 90);
        assert!(document.is_empty());
    }

    #[test]
    fn test_user_file_layers_over_defaults() {
        let path = std::env::temp_dir().join(format!("quiz-editor-config-{}.toml", std::process::id()));
        fs::write(&path, "[quiz]\nname = \"Rust Basics\"\n").unwrap();

        let config = Loader::new().with_file(&path).build().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.quiz.name, "Rust Basics");
        assert_eq!(config.quiz.duration, 60);
    }

    #[test]
    fn test_missing_file() {
        let missing = std::env::temp_dir().join("quiz-editor-does-not-exist.toml");
        assert!(Loader::new().with_file(&missing).build().is_err());
        assert!(load(Some(&missing)).is_err());
    }

    #[test]
    fn test_override_wins_over_user_file() {
        let path = std::env::temp_dir().join(format!("quiz-editor-override-{}.toml", std::process::id()));
        fs::write(&path, "[quiz]\nname = \"From file\"\nduration = 30\n").unwrap();

        let config = loader(Some(&path))
            .set_override("quiz.name", "From flag")
            .unwrap()
            .build()
            .unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.quiz.name, "From flag");
        assert_eq!(config.quiz.duration, 30);
    }
}
