use thiserror::Error;

/// Problems found while reading the invitation document.
///
/// None of these stop the page from rendering: the caller logs them and
/// falls back to empty content or a finished countdown.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invitation document is not valid JSON: {0}")]
    Document(#[from] serde_json::Error),
    #[error("event date is missing")]
    MissingDate,
    #[error("unrecognized event date `{0}`")]
    InvalidDate(String),
    #[error("unknown time zone `{0}`")]
    UnknownTimeZone(String),
    #[error("event date `{0}` does not exist in its time zone")]
    NonexistentLocalTime(String),
}
