//! Shared test doubles for session tests.

#![allow(dead_code)]

use async_trait::async_trait;
use jamming_core::{
    Album, Artist, Authorizer, Catalog, Credential, Item, PlaylistId, RemoteError, UserId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn track(id: &str, title: &str) -> Item {
    Item::new(id, title, format!("spotify:track:{}", id))
        .with_artists(vec![Artist::new("Daft Punk")])
        .with_album(Album::new("Discovery").with_image(format!("https://img/{}", id)))
}

/// Every call the mock catalog received, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Search(String),
    CurrentUser,
    CreatePlaylist { user: String, name: String },
    AddTracks { playlist: String, uris: Vec<String> },
}

/// Mock catalog with scripted responses
#[derive(Clone, Default)]
pub struct MockCatalog {
    searches: Arc<Mutex<HashMap<String, Result<Vec<Item>, RemoteError>>>>,
    user: Arc<Mutex<Option<Result<UserId, RemoteError>>>>,
    create: Arc<Mutex<Option<Result<PlaylistId, RemoteError>>>>,
    append: Arc<Mutex<Option<Result<(), RemoteError>>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl MockCatalog {
    /// A catalog where every commit step succeeds
    pub fn new() -> Self {
        let catalog = Self::default();
        catalog.set_user(Ok(UserId::new("wizzler")));
        catalog.set_create(Ok(PlaylistId::new("pl-1")));
        catalog.set_append(Ok(()));
        catalog
    }

    pub fn on_search(&self, term: &str, result: Result<Vec<Item>, RemoteError>) {
        self.searches
            .lock()
            .unwrap()
            .insert(term.to_string(), result);
    }

    pub fn set_user(&self, result: Result<UserId, RemoteError>) {
        *self.user.lock().unwrap() = Some(result);
    }

    pub fn set_create(&self, result: Result<PlaylistId, RemoteError>) {
        *self.create.lock().unwrap() = Some(result);
    }

    pub fn set_append(&self, result: Result<(), RemoteError>) {
        *self.append.lock().unwrap() = Some(result);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn remote_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn search_tracks(
        &self,
        term: &str,
        _credential: &Credential,
    ) -> jamming_core::Result<Vec<Item>> {
        self.record(Call::Search(term.to_string()));
        self.searches
            .lock()
            .unwrap()
            .get(term)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn current_user_id(&self, _credential: &Credential) -> jamming_core::Result<UserId> {
        self.record(Call::CurrentUser);
        self.user
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(RemoteError::status(500, "no user scripted")))
    }

    async fn create_playlist(
        &self,
        user: &UserId,
        name: &str,
        _credential: &Credential,
    ) -> jamming_core::Result<PlaylistId> {
        self.record(Call::CreatePlaylist {
            user: user.to_string(),
            name: name.to_string(),
        });
        self.create
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(RemoteError::status(500, "no playlist scripted")))
    }

    async fn add_tracks(
        &self,
        playlist: &PlaylistId,
        uris: &[String],
        _credential: &Credential,
    ) -> jamming_core::Result<()> {
        self.record(Call::AddTracks {
            playlist: playlist.to_string(),
            uris: uris.to_vec(),
        });
        self.append
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(RemoteError::status(500, "no append scripted")))
    }
}

/// Authorizer that only counts redirects
#[derive(Default)]
pub struct CountingAuthorizer {
    redirects: AtomicUsize,
}

impl CountingAuthorizer {
    pub fn count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Authorizer for CountingAuthorizer {
    fn begin_authorization(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}
