use marquee_lookup::LookupError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or write the persisted key-value documents.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A form field that failed local validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Select a movie first")]
    MissingMovie,
    #[error("Please enter your name")]
    EmptyName,
    #[error("Please write a comment")]
    EmptyComment,
    #[error("Rating must be between 1 and 5 (got {0})")]
    RatingOutOfRange(i64),
    #[error("Please enter a movie title")]
    EmptyTitle,
    #[error("Please give a reason")]
    EmptyReason,
    #[error("Category cannot be empty")]
    EmptyCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Incorrect password. Please try again.")]
    WrongPassword,
    #[error("Admin login required. Run 'marquee admin login' first.")]
    LoginRequired,
}

#[derive(Debug, Error)]
pub enum MarqueeError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("\"{title}\" is already in the catalog ({id})")]
    Duplicate { id: String, title: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl MarqueeError {
    /// User-facing failures that end as a transient notice rather than a command error.
    ///
    /// Everything except storage I/O: the action is aborted and state is left as it was.
    pub fn is_notice(&self) -> bool {
        !matches!(self, MarqueeError::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
