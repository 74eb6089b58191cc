//! Catalog item types

use super::ids::ItemId;
use serde::{Deserialize, Serialize};

/// A contributing artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

impl Artist {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Cover art reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumImage {
    pub url: String,
}

/// The album an item belongs to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    /// Largest image first, as the catalog returns them
    pub images: Vec<AlbumImage>,
}

impl Album {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(AlbumImage { url: url.into() });
        self
    }
}

/// A selectable catalog entry (a track).
///
/// Built once from a search result and never mutated afterwards. The
/// playable reference (`uri`) is only consumed when a collection is committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    title: String,
    name: String,
    artists: Vec<Artist>,
    album: Album,
    uri: String,
}

impl Item {
    /// Create an item with no artists and an unnamed album.
    ///
    /// The display name starts out equal to the title.
    pub fn new(id: impl Into<String>, title: impl Into<String>, uri: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            id: ItemId::new(id),
            name: title.clone(),
            title,
            artists: Vec::new(),
            album: Album::default(),
            uri: uri.into(),
        }
    }

    pub fn with_artists(mut self, artists: Vec<Artist>) -> Self {
        self.artists = artists;
        self
    }

    pub fn with_album(mut self, album: Album) -> Self {
        self.album = album;
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn album(&self) -> &Album {
        &self.album
    }

    /// Playable reference token used when appending to a remote collection
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Artist names joined for display ("A, B")
    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// First album image, if the catalog supplied any
    pub fn cover_url(&self) -> Option<&str> {
        self.album.images.first().map(|img| img.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_defaults_to_title() {
        let item = Item::new("1", "One More Time", "spotify:track:1");
        assert_eq!(item.display_name(), "One More Time");
        assert_eq!(item.title(), "One More Time");
    }

    #[test]
    fn artist_line_joins_in_order() {
        let item = Item::new("2", "Get Lucky", "spotify:track:2").with_artists(vec![
            Artist::new("Daft Punk"),
            Artist::new("Pharrell Williams"),
            Artist::new("Nile Rodgers"),
        ]);
        assert_eq!(item.artist_line(), "Daft Punk, Pharrell Williams, Nile Rodgers");
    }

    #[test]
    fn cover_url_uses_first_image() {
        let item = Item::new("3", "Digital Love", "spotify:track:3").with_album(
            Album::new("Discovery")
                .with_image("https://img/640")
                .with_image("https://img/300"),
        );
        assert_eq!(item.cover_url(), Some("https://img/640"));

        let bare = Item::new("4", "Aerodynamic", "spotify:track:4");
        assert_eq!(bare.cover_url(), None);
        assert_eq!(bare.artist_line(), "");
    }

    #[test]
    fn serializes_id_transparently() {
        let item = Item::new("abc", "Voyager", "spotify:track:abc");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["uri"], "spotify:track:abc");
    }
}
