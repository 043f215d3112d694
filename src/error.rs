use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not a git repository (or any of the parent directories)")]
    NotARepository,
    #[error("git executable not found")]
    ToolUnavailable,
    #[error("cannot resolve '{reference}'")]
    Reference {
        reference: String,
        hint: Option<String>,
    },
    #[error("version control error: {0}")]
    VersionControl(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn reference(reference: impl Into<String>, hint: impl Into<String>) -> Self {
        AppError::Reference {
            reference: reference.into(),
            hint: Some(hint.into()),
        }
    }

    /// Follow-up advice printed after the error line, when there is any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            AppError::NotARepository => Some("Run this command from within a git repository."),
            AppError::ToolUnavailable => Some("Install git and make sure it is on PATH."),
            AppError::Reference { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
