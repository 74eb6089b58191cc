//! Jamming Core
//!
//! Domain types, collaborator traits and the shared remote-failure type used by
//! the playlist session and the catalog client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Item`, `Artist`, `Album`, `Credential`, `CollectionName`
//! - **Collaborator Traits**: `Catalog` (remote search and playlist calls) and
//!   `Authorizer` (the external authorization redirect)
//! - **Error Handling**: `RemoteError`, which keeps "credential expired" apart
//!   from every other remote failure
//!
//! # Example
//!
//! ```rust
//! use jamming_core::types::{Album, Artist, CollectionName, Item};
//!
//! let item = Item::new(
//!     "4uLU6hMCjMI75M1A2tKUQC",
//!     "Around the World",
//!     "spotify:track:4uLU6hMCjMI75M1A2tKUQC",
//! )
//!     .with_artists(vec![Artist::new("Daft Punk")])
//!     .with_album(Album::new("Homework"));
//!
//! assert_eq!(item.artist_line(), "Daft Punk");
//! assert_eq!(CollectionName::default().as_str(), "New Playlist");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{RemoteError, Result};
pub use traits::{Authorizer, Catalog};
pub use types::{
    Album, AlbumImage, Artist, CollectionName, Credential, Item, ItemId, PlaylistId, TokenGrant,
    UserId, DEFAULT_COLLECTION_NAME,
};
