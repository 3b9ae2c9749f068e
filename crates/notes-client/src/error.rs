//! Error types for notes-client

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Classified failure of a remote note operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The API answered 404
    #[error("note not found")]
    NotFound,

    /// The API answered with any other non-2xx status
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// Connection, DNS, or body decoding failure
    #[error("transport error: {0}")]
    Transport(String),
}

impl RemoteError {
    /// Classify a non-success status code
    pub fn from_status(status: u16) -> Self {
        if status == 404 {
            RemoteError::NotFound
        } else {
            RemoteError::HttpStatus(status)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound)
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        // Keep the whole source chain; reqwest's Display alone hides the cause
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        RemoteError::Transport(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_404_is_not_found() {
        assert_eq!(RemoteError::from_status(404), RemoteError::NotFound);
        assert!(RemoteError::from_status(404).is_not_found());
    }

    #[test]
    fn test_other_statuses_keep_their_code() {
        assert_eq!(RemoteError::from_status(500), RemoteError::HttpStatus(500));
        assert_eq!(RemoteError::from_status(400), RemoteError::HttpStatus(400));
        assert!(!RemoteError::from_status(503).is_not_found());
    }

    #[test]
    fn test_display() {
        assert_eq!(RemoteError::HttpStatus(502).to_string(), "unexpected HTTP status 502");
        assert_eq!(
            RemoteError::Transport("connection refused".into()).to_string(),
            "transport error: connection refused"
        );
    }
}
