// Error taxonomy for the upload client. Each upload call resolves to
// exactly one of these; none is fatal and the caller may retry freely.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// Caught before any request is sent: file missing, empty, or not a
    /// recognized video type.
    #[error("invalid upload: {0}")]
    Validation(String),

    /// The request never produced a response (connect failure, dropped
    /// connection, DNS error).
    #[error("could not reach the analysis server: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-success status. `message` carries
    /// the body's `detail` field when one could be parsed.
    #[error("server rejected the upload (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    /// The server answered 2xx but the body did not carry an artifact URL.
    #[error("unexpected response from server: {0}")]
    Protocol(String),
}

impl UploadError {
    /// True when the failure happened before the server saw the request.
    pub fn is_client_side(&self) -> bool {
        matches!(self, UploadError::Validation(_) | UploadError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The Transport arm is exercised in tests/upload_test.rs, where a
    // refused connection produces a real reqwest::Error.
    #[test]
    fn only_pre_server_failures_are_client_side() {
        assert!(UploadError::Validation("empty file".into()).is_client_side());
        assert!(!UploadError::Server {
            status: 500,
            message: "bad file".into(),
        }
        .is_client_side());
        assert!(!UploadError::Protocol("no file_url".into()).is_client_side());
    }
}
