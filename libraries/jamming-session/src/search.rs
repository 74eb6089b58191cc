//! Catalog search adapter
//!
//! Runs a search against the catalog and classifies failures: a rejected
//! credential becomes `SessionError::AuthExpired`, everything else
//! `SessionError::SearchFailed`.

use crate::error::{Result, SessionError};
use crate::gate::AuthGeneration;
use jamming_core::{Catalog, Credential, Item, RemoteError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How to treat overlapping searches.
///
/// `LatestResponse` applies whichever search resolves last, even if it was
/// issued first. `LatestRequest` drops any response whose request is older
/// than one already applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOrdering {
    #[default]
    LatestResponse,
    LatestRequest,
}

/// A search that has been issued but not yet applied to the session.
#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub(crate) term: String,
    pub(crate) sequence: u64,
    pub(crate) generation: AuthGeneration,
    pub(crate) credential: Credential,
}

impl SearchTicket {
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Run the remote call. Touches no session state.
    pub async fn execute(&self, catalog: &dyn Catalog) -> Result<Vec<Item>> {
        SearchAdapter::new(catalog)
            .search(&self.term, &self.credential)
            .await
    }
}

/// What a successfully applied search produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub sequence: u64,
    pub result_count: usize,
}

/// Issues searches and classifies their failures.
pub struct SearchAdapter<'a> {
    catalog: &'a dyn Catalog,
}

impl<'a> SearchAdapter<'a> {
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self { catalog }
    }

    /// Search the catalog; an empty result is `Ok(vec![])`.
    pub async fn search(&self, term: &str, credential: &Credential) -> Result<Vec<Item>> {
        debug!(term = %term, "Searching catalog");
        self.catalog
            .search_tracks(term, credential)
            .await
            .map_err(classify)
    }
}

/// Split remote failures into "re-authorize" and "report".
pub(crate) fn classify(err: RemoteError) -> SessionError {
    if err.is_auth_expired() {
        SessionError::AuthExpired
    } else {
        warn!(error = %err, "Search failed");
        SessionError::SearchFailed(err)
    }
}
