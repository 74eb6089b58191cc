//! Account and playlist operations for the Spotify Web API.

use crate::error::{error_from_response, map_send_error, ClientError, Result};
use crate::types::{
    AddTracksRequest, CreatePlaylistRequest, PlaylistObject, SnapshotResponse, UserProfile,
};
use jamming_core::{PlaylistId, UserId};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Most URIs the Web API accepts in one add-tracks request
pub const MAX_URIS_PER_REQUEST: usize = 100;

/// Playlist client for the Spotify Web API.
pub struct PlaylistClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, access_token: &'a str) -> Self {
        Self {
            http,
            base_url,
            access_token,
        }
    }

    /// Get the ID of the user the access token belongs to.
    pub async fn current_user_id(&self) -> Result<UserId> {
        let url = format!("{}/me", self.base_url);
        debug!(url = %url, "Resolving current user");

        let response = self
            .http
            .get(&url)
            .bearer_auth(self.access_token)
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let profile: UserProfile = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse user profile: {}", e))
        })?;

        debug!(
            user_id = %profile.id,
            display_name = ?profile.display_name,
            "Resolved current user"
        );
        Ok(UserId::new(profile.id))
    }

    /// Create an empty playlist owned by `user`.
    pub async fn create_playlist(&self, user: &UserId, name: &str) -> Result<PlaylistId> {
        let url = self.endpoint(&["users", user.as_str(), "playlists"])?;
        debug!(url = %url, name = %name, "Creating playlist");

        let response = self
            .http
            .post(url)
            .bearer_auth(self.access_token)
            .json(&CreatePlaylistRequest { name })
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let playlist: PlaylistObject = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse playlist response: {}", e))
        })?;

        info!(playlist_id = %playlist.id, name = %name, "Playlist created");
        Ok(PlaylistId::new(playlist.id))
    }

    /// Append track URIs to a playlist, in the given order.
    ///
    /// Sent in batches of [`MAX_URIS_PER_REQUEST`]. The first failing batch
    /// stops the append; earlier batches stay on the playlist.
    pub async fn add_tracks(&self, playlist: &PlaylistId, uris: &[String]) -> Result<()> {
        let url = self.endpoint(&["playlists", playlist.as_str(), "tracks"])?;
        debug!(url = %url, count = uris.len(), "Adding tracks to playlist");

        for (batch, chunk) in uris.chunks(MAX_URIS_PER_REQUEST).enumerate() {
            let response = self
                .http
                .post(url.clone())
                .bearer_auth(self.access_token)
                .json(&AddTracksRequest { uris: chunk })
                .send()
                .await
                .map_err(map_send_error)?;

            if !response.status().is_success() {
                return Err(error_from_response(response).await);
            }

            let snapshot: SnapshotResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse snapshot response: {}", e))
            })?;

            debug!(
                batch,
                count = chunk.len(),
                snapshot_id = %snapshot.snapshot_id,
                "Tracks added"
            );
        }

        Ok(())
    }

    /// Build `{base}/{segments..}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(self.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
