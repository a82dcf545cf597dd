//! Failures talking to the Unified API or reading canned responses.

use std::path::PathBuf;

/// Why an upstream request produced no usable data.
#[derive(Debug, thiserror::Error)]
pub enum TflError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Status outside 2xx that has no dedicated variant.
    #[error("TfL returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 429.
    #[error("rate limited by TfL")]
    RateLimited,

    /// 401 or 403; the app key was rejected.
    #[error("app key rejected by TfL")]
    Unauthorized,

    /// The body was not the expected JSON. `excerpt` is the start of it.
    #[error("undecodable response: {message}")]
    Decode {
        message: String,
        excerpt: Option<String>,
    },

    /// A canned response file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The request limiter was shut down.
    #[error("client closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_cause() {
        assert_eq!(TflError::RateLimited.to_string(), "rate limited by TfL");
        assert_eq!(
            TflError::Status {
                status: 503,
                body: "Service Unavailable".into(),
            }
            .to_string(),
            "TfL returned 503: Service Unavailable"
        );

        let decode = TflError::Decode {
            message: "expected value at line 1".into(),
            excerpt: Some("<html>".into()),
        };
        assert_eq!(decode.to_string(), "undecodable response: expected value at line 1");
    }

    #[test]
    fn io_error_keeps_path_and_source() {
        let err = TflError::Io {
            path: PathBuf::from("fixtures/940GZZLUBNK.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "cannot read fixtures/940GZZLUBNK.json: gone");
        assert!(std::error::Error::source(&err).is_some());
    }
}
