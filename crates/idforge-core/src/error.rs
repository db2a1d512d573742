//! Error types for token generation and the record store.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, IdError>;

#[derive(Debug, thiserror::Error)]
pub enum IdError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("record file {} is corrupt: {reason}", path.display())]
    CorruptStore { path: PathBuf, reason: String },

    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ID not found: {0}")]
    NotFound(String),

    #[error("generation secret not configured")]
    MissingSecret,

    #[error("could not mint a unique ID for {0:?}")]
    Collision(String),
}

impl IdError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::CorruptStore {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the invocation should abort with a non-zero exit code.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}
