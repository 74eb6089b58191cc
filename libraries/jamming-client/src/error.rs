//! Error types for the Spotify client.

use jamming_core::RemoteError;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when talking to the Spotify Web API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// The access token was rejected (expired or revoked)
    #[error("Access token expired")]
    AuthExpired,

    /// Invalid base URL in the configuration
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse service response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Service is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Rate limited by the service
    #[error("Rate limited, retry after {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    /// The authorization redirect did not carry a token
    #[error("Invalid authorization redirect: {0}")]
    InvalidRedirect(String),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<ClientError> for RemoteError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::AuthExpired => RemoteError::AuthExpired,
            ClientError::ServerError { status, message } => RemoteError::status(status, message),
            ClientError::RateLimited { retry_after_secs } => RemoteError::status(
                429,
                format!("rate limited, retry after {retry_after_secs}s"),
            ),
            ClientError::ParseError(msg) => RemoteError::decode(msg),
            ClientError::Request(e) if e.is_decode() => RemoteError::decode(e.to_string()),
            other => RemoteError::network(other.to_string()),
        }
    }
}

/// Map a transport failure, keeping "could not connect" apart.
pub(crate) fn map_send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

/// Turn a non-success response into the matching error.
pub(crate) async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status();

    if status.as_u16() == 401 {
        warn!("Access token rejected by Spotify");
        return ClientError::AuthExpired;
    }

    if status.as_u16() == 429 {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        warn!(retry_after_secs, "Rate limited by Spotify");
        return ClientError::RateLimited { retry_after_secs };
    }

    let error_text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<crate::types::ApiErrorBody>(&error_text)
        .map(|body| body.error.message)
        .unwrap_or(error_text);

    ClientError::ServerError {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_expired_maps_to_remote_auth_expired() {
        let remote: RemoteError = ClientError::AuthExpired.into();
        assert_eq!(remote, RemoteError::AuthExpired);
    }

    #[test]
    fn rate_limit_is_not_auth_expiry() {
        let remote: RemoteError = ClientError::RateLimited {
            retry_after_secs: 5,
        }
        .into();
        assert!(!remote.is_auth_expired());
        assert!(matches!(remote, RemoteError::Status { status: 429, .. }));
    }

    #[test]
    fn parse_error_maps_to_decode() {
        let remote: RemoteError = ClientError::ParseError("bad json".into()).into();
        assert_eq!(remote, RemoteError::decode("bad json"));
    }

    #[test]
    fn unreachable_maps_to_network() {
        let remote: RemoteError = ClientError::ServerUnreachable("refused".into()).into();
        assert!(matches!(remote, RemoteError::Network(_)));
    }
}
