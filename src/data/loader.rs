use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::models::{JsonParseFailure, QuizDocument};

/// Failure reading or writing quiz files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: JsonParseFailure,
    },
    #[error("failed to serialize quiz: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn read_text<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_text<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), LoadError> {
    let path = path.as_ref();
    fs::write(path, contents).map_err(|source| LoadError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_quiz<P: AsRef<Path>>(path: P) -> Result<QuizDocument, LoadError> {
    let path = path.as_ref();
    let json = read_text(path)?;

    let document = QuizDocument::from_json_str(&json).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), questions = document.len(), "loaded quiz");
    Ok(document)
}

pub fn save_quiz<P: AsRef<Path>>(path: P, document: &QuizDocument) -> Result<(), LoadError> {
    let path = path.as_ref();
    let mut json = document.to_json_pretty()?;
    json.push('\n');
    write_text(path, &json)?;

    info!(path = %path.display(), questions = document.len(), "saved quiz");
    Ok(())
}
