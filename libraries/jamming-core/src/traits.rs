/// Collaborator traits consumed by the playlist session
use crate::error::Result;
use crate::types::{Credential, Item, PlaylistId, UserId};
use async_trait::async_trait;

/// Remote music catalog.
///
/// Implementations own the wire format. Every method must report a rejected
/// credential as `RemoteError::AuthExpired` and anything else as one of the
/// other variants; callers rely on that split to decide between
/// re-authorizing and simply reporting the failure.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Search the catalog for tracks matching `term`.
    ///
    /// An empty result set is a success, not an error.
    async fn search_tracks(&self, term: &str, credential: &Credential) -> Result<Vec<Item>>;

    /// Resolve the account the credential belongs to
    async fn current_user_id(&self, credential: &Credential) -> Result<UserId>;

    /// Create an empty collection named `name` under `user`
    async fn create_playlist(
        &self,
        user: &UserId,
        name: &str,
        credential: &Credential,
    ) -> Result<PlaylistId>;

    /// Append playable references to a collection, preserving their order
    async fn add_tracks(
        &self,
        playlist: &PlaylistId,
        uris: &[String],
        credential: &Credential,
    ) -> Result<()>;
}

/// Starts the external, redirect-based authorization flow.
///
/// Once called, the current session is considered torn down: nothing the
/// caller had in flight will be resumed, and a fresh session begins when the
/// flow hands back a new token.
pub trait Authorizer: Send + Sync {
    fn begin_authorization(&self);
}
