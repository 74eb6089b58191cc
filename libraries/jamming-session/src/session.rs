//! Playlist session
//!
//! Ties the authorization gate, search, selection ledger and commit
//! orchestrator together. State only changes once an async step has
//! resolved, and only along its success path.
//!
//! Every remote operation is split into three parts so overlapping calls and
//! redirects can be reasoned about:
//! - `begin_*` snapshots what the call needs into a ticket
//! - the ticket runs against the catalog without touching the session
//! - `apply_search` / `finish_commit` decide whether the result still matters
//!
//! `search` and `commit` run all three back to back.

use crate::commit::{check_preconditions, CommitOrchestrator, CommitReceipt, CommitTicket};
use crate::error::{Result, SessionError};
use crate::gate::AuthorizationGate;
use crate::ledger::{Membership, SelectionLedger};
use crate::search::{SearchOrdering, SearchOutcome, SearchTicket};
use jamming_core::{Authorizer, Catalog, CollectionName, Credential, Item, ItemId, TokenGrant};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use uuid::Uuid;

/// How long the "playlist saved" notice stays up
pub const SAVE_NOTICE_DURATION: Duration = Duration::from_secs(3);

/// Session tuning
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub search_ordering: SearchOrdering,
    pub save_notice_duration: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_ordering: SearchOrdering::default(),
            save_notice_duration: SAVE_NOTICE_DURATION,
        }
    }
}

pub struct Session {
    id: Uuid,
    config: SessionConfig,
    catalog: Arc<dyn Catalog>,
    gate: AuthorizationGate,
    ledger: SelectionLedger,

    /// Current search results
    candidates: Vec<Item>,
    has_searched: bool,

    /// Sequence number handed to the next search
    next_search: u64,
    /// Newest sequence whose results (or reset) are on screen
    applied_search: Option<u64>,

    saved_at: Option<Instant>,
}

impl Session {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        authorizer: Arc<dyn Authorizer>,
        config: SessionConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            catalog,
            gate: AuthorizationGate::new(authorizer),
            ledger: SelectionLedger::new(),
            candidates: Vec::new(),
            has_searched: false,
            next_search: 0,
            applied_search: None,
            saved_at: None,
        }
    }

    /// Session start. Adopts a token if the authorization flow left one;
    /// never redirects by itself.
    pub fn start(&mut self, grant: Option<TokenGrant>) {
        info!(session = %self.id, has_token = grant.is_some(), "Session started");
        self.gate.check_for_access_token(grant);
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    // ===== Search =====

    /// Search and apply the results.
    pub async fn search(&mut self, term: &str) -> Result<SearchOutcome> {
        let ticket = self.begin_search(term)?;
        let catalog = Arc::clone(&self.catalog);
        let result = ticket.execute(catalog.as_ref()).await;
        self.apply_search(&ticket, result)
    }

    /// Issue a search. Starts authorization if there is no token.
    pub fn begin_search(&mut self, term: &str) -> Result<SearchTicket> {
        let credential = self.gate.ensure_credential()?;
        let sequence = self.next_search;
        self.next_search += 1;

        debug!(session = %self.id, term = %term, sequence, "Search issued");
        Ok(SearchTicket {
            term: term.to_string(),
            sequence,
            generation: self.gate.generation(),
            credential,
        })
    }

    /// Apply a resolved search.
    ///
    /// Results from before a redirect are always dropped. An expired token
    /// starts authorization even when the search itself is out of order.
    /// Under `SearchOrdering::LatestRequest`, other results older than what
    /// is already applied are dropped. A failed search leaves the current
    /// results alone.
    pub fn apply_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<Item>>,
    ) -> Result<SearchOutcome> {
        if !self.gate.is_current(ticket.generation) {
            debug!(
                session = %self.id,
                sequence = ticket.sequence,
                "Dropping search from a previous authorization"
            );
            return Err(SessionError::Stale);
        }

        if let Err(SessionError::AuthExpired) = result {
            self.gate.invalidate();
            return Err(SessionError::AuthExpired);
        }

        if self.config.search_ordering == SearchOrdering::LatestRequest
            && self.applied_search.is_some_and(|applied| applied > ticket.sequence)
        {
            debug!(session = %self.id, sequence = ticket.sequence, "Dropping out-of-order search");
            return Err(SessionError::Stale);
        }

        let items = match result {
            Ok(items) => items,
            Err(e) => {
                error!(
                    session = %self.id,
                    term = %ticket.term,
                    error = %e,
                    "An unexpected error occurred"
                );
                return Err(e);
            }
        };

        let outcome = SearchOutcome {
            sequence: ticket.sequence,
            result_count: items.len(),
        };
        self.candidates = items;
        self.has_searched = true;
        self.applied_search = Some(ticket.sequence);

        debug!(session = %self.id, results = outcome.result_count, "Search applied");
        Ok(outcome)
    }

    /// Back to the pre-search state. The playlist is untouched.
    pub fn reset_search(&mut self) {
        self.candidates.clear();
        self.has_searched = false;
        if self.next_search > 0 {
            // Under LatestRequest, anything issued before the reset is now stale
            self.applied_search = Some(self.next_search - 1);
        }
    }

    pub fn search_results(&self) -> &[Item] {
        &self.candidates
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    /// Selected/not-selected for each current search result.
    ///
    /// Derived from the candidates, so after a commit clears the playlist
    /// every current result is still listed, as not selected.
    pub fn membership(&self) -> Membership {
        self.ledger.recompute_membership_after_search(&self.candidates)
    }

    // ===== Selection =====

    pub fn add(&mut self, item: Item) -> bool {
        self.ledger.add(item)
    }

    pub fn remove(&mut self, item: &Item) -> bool {
        self.ledger.remove(item)
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.ledger.rename(name);
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.ledger.contains(id)
    }

    pub fn playlist(&self) -> &[Item] {
        self.ledger.items()
    }

    pub fn playlist_name(&self) -> &CollectionName {
        self.ledger.name()
    }

    pub fn ledger(&self) -> &SelectionLedger {
        &self.ledger
    }

    // ===== Commit =====

    /// Save the playlist to the remote account.
    pub async fn commit(&mut self) -> Result<CommitReceipt> {
        let ticket = self.begin_commit()?;
        let catalog = Arc::clone(&self.catalog);
        let result = CommitOrchestrator::new(catalog.as_ref()).run(&ticket).await;
        self.finish_commit(&ticket, result, Instant::now())
    }

    /// Snapshot the playlist for committing.
    ///
    /// An empty name or selection is rejected before anything else, so it
    /// never triggers authorization or a remote call.
    pub fn begin_commit(&mut self) -> Result<CommitTicket> {
        check_preconditions(self.ledger.name(), self.ledger.items())?;
        let credential = self.gate.ensure_credential()?;

        debug!(session = %self.id, tracks = self.ledger.len(), "Commit issued");
        Ok(CommitTicket {
            name: self.ledger.name().clone(),
            items: self.ledger.items().to_vec(),
            credential,
            generation: self.gate.generation(),
        })
    }

    /// Apply a finished commit attempt.
    ///
    /// Success clears the playlist and raises the save notice; any failure
    /// leaves the playlist exactly as it was.
    pub fn finish_commit(
        &mut self,
        ticket: &CommitTicket,
        result: Result<CommitReceipt>,
        now: Instant,
    ) -> Result<CommitReceipt> {
        if !self.gate.is_current(ticket.generation) {
            debug!(session = %self.id, "Dropping commit from a previous authorization");
            return Err(SessionError::Stale);
        }

        match result {
            Ok(receipt) => {
                self.ledger.clear();
                self.saved_at = Some(now);
                info!(
                    session = %self.id,
                    playlist = %receipt.playlist,
                    "Playlist saved, selection cleared"
                );
                Ok(receipt)
            }
            Err(SessionError::AuthExpired) => {
                self.gate.invalidate();
                Err(SessionError::AuthExpired)
            }
            Err(e) => Err(e),
        }
    }

    // ===== Save notice =====

    /// Whether the "playlist saved" notice should be showing at `now`
    pub fn save_notice_visible(&self, now: Instant) -> bool {
        self.saved_at.is_some_and(|saved| {
            now.saturating_duration_since(saved) < self.config.save_notice_duration
        })
    }

    pub fn dismiss_save_notice(&mut self) {
        self.saved_at = None;
    }

    // ===== Authorization =====

    pub fn access_token(&self) -> Option<&Credential> {
        self.gate.access_token()
    }

    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }
}
