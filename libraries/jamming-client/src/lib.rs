//! Jamming Spotify Client
//!
//! HTTP client for the handful of Spotify Web API calls the playlist session
//! depends on.
//!
//! # Features
//!
//! - **Search**: Track search mapped into catalog `Item`s
//! - **Playlists**: Resolve the current user, create a playlist, append tracks
//! - **Authorization**: Implicit-grant authorize URL and redirect parsing
//!
//! `SpotifyClient` implements [`jamming_core::Catalog`], so a session can be
//! driven against it directly.
//!
//! # Example
//!
//! ```ignore
//! use jamming_client::{SpotifyClient, SpotifyConfig};
//! use jamming_core::{Catalog, Credential};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SpotifyConfig::new("my-client-id", "http://localhost:3000/callback");
//!     let client = SpotifyClient::new(config)?;
//!
//!     let credential = Credential::new("BQD...");
//!     let items = client.search_tracks("Daft Punk", &credential).await?;
//!     println!("Found {} tracks", items.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod playlists;
mod search;
mod types;

pub use client::SpotifyClient;
pub use error::{ClientError, Result};
pub use types::{SpotifyConfig, DEFAULT_ACCOUNTS_BASE_URL, DEFAULT_API_BASE_URL, DEFAULT_SCOPE};

pub use auth::{authorize_url, parse_redirect_fragment, RedirectAuthorizer};
pub use playlists::{PlaylistClient, MAX_URIS_PER_REQUEST};
pub use search::SearchClient;
