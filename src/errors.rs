use thiserror::Error;

/// Every failure the store, router and client can report.
#[derive(Debug, Error)]
pub enum FaqError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("unrecognized action '{0}'")]
    UnrecognizedAction(String),
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
    #[error("connection error: {0}")]
    Transport(String),
    #[error("{0}")]
    Server(String),
    #[error("another request is still in progress")]
    Busy,
}

impl FaqError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            FaqError::Validation(_) => "VALIDATION",
            FaqError::NotFound(_) => "NOT_FOUND",
            FaqError::UnrecognizedAction(_) => "UNRECOGNIZED_ACTION",
            FaqError::InvalidPayload(_) => "INVALID_PAYLOAD",
            FaqError::Storage(_) => "STORAGE",
            FaqError::Transport(_) => "TRANSPORT",
            FaqError::Server(_) => "SERVER",
            FaqError::Busy => "BUSY",
        }
    }
}

impl From<serde_json::Error> for FaqError {
    fn from(err: serde_json::Error) -> Self {
        FaqError::InvalidPayload(err.to_string())
    }
}

impl From<reqwest::Error> for FaqError {
    fn from(err: reqwest::Error) -> Self {
        FaqError::Transport(err.to_string())
    }
}

pub type FaqResult<T> = std::result::Result<T, FaqError>;
