//! Error types for form submission

use thiserror::Error;

/// Transport-level failures of a submission
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Submission task ended without a result")]
    Interrupted,
}

impl SubmitError {
    /// Whether the request timed out
    pub fn is_timeout(&self) -> bool {
        matches!(self, SubmitError::Request(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(
            SubmitError::Status(502).to_string(),
            "Server responded with status 502"
        );
    }

    #[test]
    fn test_decode_from_serde_error() {
        let err: SubmitError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, SubmitError::Decode(_)));
        assert!(!err.is_timeout());
    }
}
