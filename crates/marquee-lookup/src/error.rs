use thiserror::Error;

/// Every way a lookup can fail. All of them abort the action without changing local state.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Please enter a movie title")]
    EmptyQuery,

    #[error("Error contacting the movie database: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Movie database returned HTTP {status}")]
    Status { status: u16, body: String },

    /// `Response: "False"`, either no match or a key/quota problem
    #[error("{0}")]
    NotFound(String),

    #[error("Unexpected response from the movie database: {0}")]
    Malformed(String),
}
