use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("no empty cell available for a new tile")]
    NoSpaceAvailable,

    #[error("invalid options: {message}")]
    InvalidOptions { message: String },
}

impl GameError {
    #[must_use]
    pub fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidGrid {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}
