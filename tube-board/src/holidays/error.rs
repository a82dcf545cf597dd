//! Holiday calendar error types.

/// Errors from fetching or caching the bank holiday calendar.
#[derive(Debug, thiserror::Error)]
pub enum HolidayError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("API error {status}")]
    Api { status: u16 },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response lacked the requested division
    #[error("division not found: {0}")]
    MissingDivision(String),

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}
