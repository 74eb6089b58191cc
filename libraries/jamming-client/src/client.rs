//! Main Spotify client.

use crate::auth;
use crate::error::{ClientError, Result};
use crate::playlists::PlaylistClient;
use crate::search::SearchClient;
use crate::types::SpotifyConfig;
use async_trait::async_trait;
use jamming_core::{Catalog, Credential, Item, PlaylistId, RemoteError, UserId};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for the Spotify Web API.
///
/// The client holds no credential of its own; every call takes the bearer
/// token from the caller, so invalidating a token never requires touching the
/// client.
///
/// # Example
///
/// ```ignore
/// use jamming_client::{SpotifyClient, SpotifyConfig};
///
/// let config = SpotifyConfig::new("client-id", "http://localhost:3000/callback");
/// let client = SpotifyClient::new(config)?;
///
/// let items = client.search(&credential).search_tracks("Daft Punk").await?;
/// let user = client.playlists(&credential).current_user_id().await?;
/// ```
pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SpotifyConfig) -> Result<Self> {
        let api_base_url = normalize_base_url(&config.api_base_url)?;
        let accounts_base_url = normalize_base_url(&config.accounts_base_url)?;

        let normalized_config = SpotifyConfig {
            api_base_url,
            accounts_base_url,
            ..config
        };

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Jamming/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        debug!(api = %normalized_config.api_base_url, "Spotify client ready");

        Ok(Self {
            http,
            config: normalized_config,
        })
    }

    /// Get the Web API base URL.
    pub fn api_base_url(&self) -> &str {
        &self.config.api_base_url
    }

    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    /// Get a search client bound to `credential`.
    pub fn search<'a>(&'a self, credential: &'a Credential) -> SearchClient<'a> {
        SearchClient::new(
            &self.http,
            &self.config.api_base_url,
            credential.secret(),
            self.config.search_limit,
        )
    }

    /// Get a playlist client bound to `credential`.
    pub fn playlists<'a>(&'a self, credential: &'a Credential) -> PlaylistClient<'a> {
        PlaylistClient::new(&self.http, &self.config.api_base_url, credential.secret())
    }

    /// The URL that starts the implicit-grant authorization flow.
    pub fn authorize_url(&self) -> Result<Url> {
        auth::authorize_url(&self.config)
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
    }

    let url = raw.trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }

    Ok(url)
}

#[async_trait]
impl Catalog for SpotifyClient {
    async fn search_tracks(
        &self,
        term: &str,
        credential: &Credential,
    ) -> jamming_core::Result<Vec<Item>> {
        self.search(credential)
            .search_tracks(term)
            .await
            .map_err(RemoteError::from)
    }

    async fn current_user_id(&self, credential: &Credential) -> jamming_core::Result<UserId> {
        self.playlists(credential)
            .current_user_id()
            .await
            .map_err(RemoteError::from)
    }

    async fn create_playlist(
        &self,
        user: &UserId,
        name: &str,
        credential: &Credential,
    ) -> jamming_core::Result<PlaylistId> {
        self.playlists(credential)
            .create_playlist(user, name)
            .await
            .map_err(RemoteError::from)
    }

    async fn add_tracks(
        &self,
        playlist: &PlaylistId,
        uris: &[String],
        credential: &Credential,
    ) -> jamming_core::Result<()> {
        self.playlists(credential)
            .add_tracks(playlist, uris)
            .await
            .map_err(RemoteError::from)
    }
}
