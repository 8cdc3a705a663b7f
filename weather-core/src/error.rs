use thiserror::Error;

/// Everything that can go wrong between reading a city name and having a
/// snapshot to render.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The city input was empty or whitespace only.
    #[error("City name must not be empty")]
    EmptyCity,

    /// The request never produced an HTTP response.
    #[error("Failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Weather service returned status {status}")]
    NotFound { status: u16 },

    /// The body was not the JSON document we expected.
    #[error("Failed to parse weather response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The service answered with an empty body or a JSON `null`.
    #[error("Weather service returned no results")]
    EmptyResults,

    /// A required section of the payload was missing.
    #[error("Weather response is missing the `{section}` section")]
    Incomplete { section: &'static str },
}

/// User-facing bucket of a [`QueryError`], used to pick placeholder text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Incomplete,
    Unexpected,
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::EmptyCity => ErrorKind::Validation,
            QueryError::NotFound { .. } => ErrorKind::NotFound,
            QueryError::Incomplete { .. } | QueryError::EmptyResults => ErrorKind::Incomplete,
            QueryError::Transport(_) | QueryError::Malformed(_) => ErrorKind::Unexpected,
        }
    }
}
