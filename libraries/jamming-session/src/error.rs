use jamming_core::{PlaylistId, RemoteError};
use thiserror::Error;

/// Why a commit was refused before any remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitRejection {
    EmptyName,
    EmptySelection,
}

impl std::fmt::Display for CommitRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => f.write_str("playlist name is empty"),
            Self::EmptySelection => f.write_str("no tracks selected"),
        }
    }
}

/// Errors surfaced by session operations.
///
/// None of these are fatal to the session. `AuthExpired` and
/// `AuthorizationRequired` mean the authorization redirect has already been
/// started; the rest leave session state exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No access token, authorization started")]
    AuthorizationRequired,

    #[error("Access token expired, authorization started")]
    AuthExpired,

    #[error("Search failed: {0}")]
    SearchFailed(RemoteError),

    #[error("Could not resolve the current user: {0}")]
    IdentityResolutionFailed(RemoteError),

    #[error("Could not create playlist: {0}")]
    CollectionCreationFailed(RemoteError),

    #[error("Could not add tracks to playlist {playlist}: {source}")]
    AppendFailed {
        playlist: PlaylistId,
        source: RemoteError,
    },

    #[error("Commit rejected: {0}")]
    CommitRejected(CommitRejection),

    #[error("Result discarded, the session has moved on")]
    Stale,
}

impl SessionError {
    /// Whether this error means the authorization redirect was triggered
    pub fn started_authorization(&self) -> bool {
        matches!(self, Self::AuthExpired | Self::AuthorizationRequired)
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
