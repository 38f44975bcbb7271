//! Error type shared by the REST client, configuration loading and forms.
//!
//! The carousel itself never fails; everything that can go wrong in this crate
//! lives on the I/O edges and is funnelled through [`Error`].

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the journal client.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure talking to the API.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, or a placeholder when it could not be read.
        body: String,
    },

    /// A response body did not match the expected record shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Filesystem failure (config or log file).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User input rejected before it reached the API.
    #[error("{0}")]
    Validation(String),
}

impl Error {
    /// Returns true when the error came from rejected user input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = Error::Status {
            status: 404,
            body: "not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "request failed with status 404: not found"
        );
    }

    #[test]
    fn test_validation_is_plain_message() {
        let err = Error::Validation("content is required".to_string());
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "content is required");
    }

    #[test]
    fn test_decode_from_serde() {
        let err: Error = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, Error::Decode(_)));
        assert!(!err.is_validation());
    }
}
