use std::io;
use thiserror::Error;

/// Application-wide error type.
///
/// Every variant is raised while building the engine or while the shell parses
/// input. Classifying a request never fails.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid tunable, empty prompt pool, bad trigger weight or a trigger table
    /// that is missing a category.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A trigger pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents a request the shell could not turn into an `AnalyzeRequest`.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_error_converts() {
        let err: AppError = regex::Regex::new("(unclosed").unwrap_err().into();
        assert!(matches!(err, AppError::Pattern(_)));
        assert!(err.to_string().starts_with("Pattern error"));
    }

    #[test]
    fn test_json_error_is_validation() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
