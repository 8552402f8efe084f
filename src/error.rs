//! Error types for the curriculum registry

use std::path::PathBuf;

use thiserror::Error;

/// Result type for curriculum operations
pub type Result<T> = std::result::Result<T, CurriculumError>;

/// Curriculum registry errors
///
/// These are configuration errors: an id that does not resolve, or a data
/// bundle that cannot be read. Navigation queries never produce them.
#[derive(Error, Debug)]
pub enum CurriculumError {
    #[error("Level '{id}' not found{}", suggestion_suffix(.suggestion))]
    LevelNotFound {
        id: String,
        suggestion: Option<String>,
    },

    #[error("Exercise '{slug}' not found{}", suggestion_suffix(.suggestion))]
    ExerciseNotFound {
        slug: String,
        suggestion: Option<String>,
    },

    #[error("Level '{0}' is defined more than once")]
    DuplicateLevel(String),

    #[error("Exercise '{0}' is registered more than once")]
    DuplicateExercise(String),

    #[error("Manifest lists level '{0}' but no level file defines it")]
    MissingLevel(String),

    #[error("Level '{0}' is defined but not listed in the manifest")]
    UnlistedLevel(String),

    #[error("Invalid curriculum data in {path}: {message}")]
    InvalidFormat { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Errors raised by exercise operations invoked from learner code
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExerciseError {
    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Function '{name}' expects {expected} argument(s), got {actual}")]
    InvalidArguments {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("{0}")]
    Logic(String),
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}
