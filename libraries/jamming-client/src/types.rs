//! Types for Spotify Web API requests and responses.

use jamming_core::{Album, Artist, Item};
use serde::{Deserialize, Serialize};

/// Default Web API root
pub const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Default accounts service root (authorization)
pub const DEFAULT_ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";

/// Scope needed to create and fill public playlists
pub const DEFAULT_SCOPE: &str = "playlist-modify-public";

/// Configuration for talking to Spotify.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    /// Web API root (e.g., "https://api.spotify.com/v1")
    pub api_base_url: String,
    /// Accounts service root used for the authorize redirect
    pub accounts_base_url: String,
    /// Registered application client ID
    pub client_id: String,
    /// Where the accounts service sends the user back to
    pub redirect_uri: String,
    /// Space-separated OAuth scopes
    pub scope: String,
    /// Maximum number of search results to request
    pub search_limit: Option<u32>,
}

impl SpotifyConfig {
    /// Create a config pointing at the public Spotify endpoints.
    pub fn new(client_id: impl Into<String>, redirect_uri: impl Into<String>) -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            accounts_base_url: DEFAULT_ACCOUNTS_BASE_URL.to_string(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            scope: DEFAULT_SCOPE.to_string(),
            search_limit: None,
        }
    }

    /// Point the Web API calls somewhere else (tests, proxies).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_accounts_base_url(mut self, url: impl Into<String>) -> Self {
        self.accounts_base_url = url.into();
        self
    }

    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = Some(limit);
        self
    }
}

// =============================================================================
// Search Types
// =============================================================================

/// Response from `GET /search?type=track`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Absent when the service has nothing to say about tracks
    #[serde(default)]
    pub tracks: Option<Paging<TrackObject>>,
}

/// A page of results.
#[derive(Debug, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// A track as returned by the Web API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<ArtistObject>,
    #[serde(default)]
    pub album: Option<AlbumObject>,
}

/// Simplified artist.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistObject {
    pub name: String,
}

/// Simplified album.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumObject {
    pub name: String,
    #[serde(default)]
    pub images: Vec<ImageObject>,
}

/// Album artwork.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageObject {
    pub url: String,
}

impl From<TrackObject> for Item {
    fn from(track: TrackObject) -> Self {
        let album = track
            .album
            .map(|a| Album {
                name: a.name,
                images: a
                    .images
                    .into_iter()
                    .map(|img| jamming_core::AlbumImage { url: img.url })
                    .collect(),
            })
            .unwrap_or_default();

        let artists = track
            .artists
            .into_iter()
            .map(|a| Artist::new(a.name))
            .collect();

        Item::new(track.id, track.name, track.uri)
            .with_artists(artists)
            .with_album(album)
    }
}

// =============================================================================
// Playlist Types
// =============================================================================

/// Current user profile (only the fields we use).
#[derive(Debug, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Request body for playlist creation.
#[derive(Debug, Serialize)]
pub struct CreatePlaylistRequest<'a> {
    pub name: &'a str,
}

/// Created playlist (only the fields we use).
#[derive(Debug, Deserialize)]
pub struct PlaylistObject {
    pub id: String,
}

/// Request body for appending tracks.
#[derive(Debug, Serialize)]
pub struct AddTracksRequest<'a> {
    pub uris: &'a [String],
}

/// Response after modifying a playlist's items.
#[derive(Debug, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Error envelope the Web API uses for non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
}
