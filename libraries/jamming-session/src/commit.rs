//! Commit orchestrator
//!
//! Persists a named selection as a remote playlist in three strictly
//! ordered steps:
//! 1. Resolve the account the credential belongs to
//! 2. Create an empty playlist under that account
//! 3. Append the selected tracks, in selection order
//!
//! A failure at any step abandons the whole attempt. Nothing is retried and
//! nothing is rolled forward; the caller decides what happens next.

use crate::error::{CommitRejection, Result, SessionError};
use crate::gate::AuthGeneration;
use jamming_core::{Catalog, CollectionName, Credential, Item, PlaylistId, RemoteError, UserId};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Step of a commit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitPhase {
    ResolvingIdentity,
    CreatingCollection,
    AppendingItems,
}

/// Snapshot of what is being committed, taken when the commit starts.
#[derive(Debug, Clone)]
pub struct CommitTicket {
    pub(crate) name: CollectionName,
    pub(crate) items: Vec<Item>,
    pub(crate) credential: Credential,
    pub(crate) generation: AuthGeneration,
}

impl CommitTicket {
    pub fn name(&self) -> &CollectionName {
        &self.name
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

/// Summary of a completed commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    pub user: UserId,
    pub playlist: PlaylistId,
    pub name: String,
    pub track_count: usize,
}

/// Refuse to commit an unnamed or empty playlist.
pub fn check_preconditions(name: &CollectionName, items: &[Item]) -> Result<()> {
    if name.is_empty() {
        debug!("Playlist name is missing");
        return Err(SessionError::CommitRejected(CommitRejection::EmptyName));
    }
    if items.is_empty() {
        debug!("Playlist tracks are missing");
        return Err(SessionError::CommitRejected(CommitRejection::EmptySelection));
    }
    Ok(())
}

pub struct CommitOrchestrator<'a> {
    catalog: &'a dyn Catalog,
}

impl<'a> CommitOrchestrator<'a> {
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self { catalog }
    }

    /// Run the three commit steps for `ticket`.
    pub async fn run(&self, ticket: &CommitTicket) -> Result<CommitReceipt> {
        self.commit(&ticket.name, &ticket.items, &ticket.credential).await
    }

    /// Persist `items` as a playlist called `name`.
    ///
    /// Preconditions are checked before any remote call is made.
    pub async fn commit(
        &self,
        name: &CollectionName,
        items: &[Item],
        credential: &Credential,
    ) -> Result<CommitReceipt> {
        check_preconditions(name, items)?;

        let uris: Vec<String> = items.iter().map(|item| item.uri().to_string()).collect();

        // Step 1: Resolve identity
        debug!(phase = ?CommitPhase::ResolvingIdentity, "Commit step");
        let user = self
            .catalog
            .current_user_id(credential)
            .await
            .map_err(|e| {
                fail(
                    CommitPhase::ResolvingIdentity,
                    e,
                    SessionError::IdentityResolutionFailed,
                )
            })?;

        // Step 2: Create collection
        debug!(phase = ?CommitPhase::CreatingCollection, user = %user, "Commit step");
        let playlist = self
            .catalog
            .create_playlist(&user, name.as_str(), credential)
            .await
            .map_err(|e| {
                fail(
                    CommitPhase::CreatingCollection,
                    e,
                    SessionError::CollectionCreationFailed,
                )
            })?;

        // Step 3: Append items
        debug!(
            phase = ?CommitPhase::AppendingItems,
            playlist = %playlist,
            count = uris.len(),
            "Commit step"
        );
        self.catalog
            .add_tracks(&playlist, &uris, credential)
            .await
            .map_err(|e| {
                let playlist = playlist.clone();
                fail(CommitPhase::AppendingItems, e, move |source| {
                    SessionError::AppendFailed { playlist, source }
                })
            })?;

        info!(
            playlist = %playlist,
            name = %name,
            tracks = uris.len(),
            "Playlist saved to Spotify"
        );

        Ok(CommitReceipt {
            user,
            playlist,
            name: name.as_str().to_string(),
            track_count: uris.len(),
        })
    }
}

/// A rejected credential is `AuthExpired` at every step; anything else is
/// reported as the step's own failure.
fn fail(
    phase: CommitPhase,
    err: RemoteError,
    wrap: impl FnOnce(RemoteError) -> SessionError,
) -> SessionError {
    if err.is_auth_expired() {
        return SessionError::AuthExpired;
    }
    error!(phase = ?phase, error = %err, "Error saving playlist");
    wrap(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item::new(id, id, format!("spotify:track:{}", id))
    }

    #[test]
    fn empty_name_is_rejected_first() {
        let err = check_preconditions(&CollectionName::new(""), &[]).unwrap_err();
        assert_eq!(err, SessionError::CommitRejected(CommitRejection::EmptyName));
    }

    #[test]
    fn empty_selection_is_rejected() {
        let err = check_preconditions(&CollectionName::default(), &[]).unwrap_err();
        assert_eq!(
            err,
            SessionError::CommitRejected(CommitRejection::EmptySelection)
        );
    }

    #[test]
    fn named_non_empty_selection_passes() {
        assert!(check_preconditions(&CollectionName::new("My Mix"), &[item("1")]).is_ok());
    }
}
