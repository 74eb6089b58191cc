/// Remote failure types shared by the catalog client and the session
use thiserror::Error;

/// Result type alias using `RemoteError`
pub type Result<T> = std::result::Result<T, RemoteError>;

/// Failure reported by a remote catalog call.
///
/// Only `AuthExpired` carries a side effect for callers (re-authorization);
/// every other variant is reported and the operation abandoned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The credential was rejected (HTTP 401)
    #[error("Access token expired or revoked")]
    AuthExpired,

    /// The service answered with a non-success status
    #[error("Remote service error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// The service could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not have the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl RemoteError {
    /// Create a status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Whether this failure means the credential is no longer usable
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_auth_expired_is_classified_as_expiry() {
        assert!(RemoteError::AuthExpired.is_auth_expired());
        assert!(!RemoteError::status(429, "slow down").is_auth_expired());
        assert!(!RemoteError::status(403, "forbidden").is_auth_expired());
        assert!(!RemoteError::network("connection refused").is_auth_expired());
        assert!(!RemoteError::decode("missing field `tracks`").is_auth_expired());
    }

    #[test]
    fn status_error_display_includes_code() {
        let err = RemoteError::status(503, "Service Unavailable");
        assert_eq!(
            err.to_string(),
            "Remote service error (503): Service Unavailable"
        );
    }
}
