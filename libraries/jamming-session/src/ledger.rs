//! Selection ledger
//!
//! Tracks the in-progress playlist:
//! - Ordered selection: tracks in the order they were first added
//! - Collection name: editable until commit
//!
//! Membership ("is this search result already in the playlist?") is never
//! stored. It is derived from the ordered selection whenever it is asked
//! for, so it cannot drift out of sync with it.

use jamming_core::{CollectionName, Item, ItemId};
use std::collections::HashMap;
use tracing::debug;

/// Selected / not-selected state for a set of search candidates.
///
/// Holds an entry for every candidate and nothing else; an identifier that
/// is not among the candidates has no entry, even if it is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Membership {
    entries: HashMap<ItemId, bool>,
}

impl Membership {
    /// `Some(selected)` for candidates, `None` for anything else
    pub fn get(&self, id: &ItemId) -> Option<bool> {
        self.entries.get(id).copied()
    }

    /// True only for candidates that are currently selected
    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.get(id).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, bool)> {
        self.entries.iter().map(|(id, selected)| (id, *selected))
    }
}

/// The playlist being assembled.
///
/// Invariant: no two entries share an `ItemId`. Items are matched by
/// identifier, never by value, so two search results with the same ID are
/// the same item even if their other fields differ.
#[derive(Debug, Clone, Default)]
pub struct SelectionLedger {
    items: Vec<Item>,
    name: CollectionName,
}

impl SelectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` unless an item with the same ID is already selected.
    ///
    /// Returns whether the ledger changed.
    pub fn add(&mut self, item: Item) -> bool {
        if self.contains(item.id()) {
            debug!(id = %item.id(), "Track already in playlist");
            return false;
        }

        debug!(id = %item.id(), position = self.items.len(), "Track added to playlist");
        self.items.push(item);
        true
    }

    /// Remove the item with `item`'s ID.
    ///
    /// Returns whether the ledger changed.
    pub fn remove(&mut self, item: &Item) -> bool {
        self.remove_by_id(item.id())
    }

    pub fn remove_by_id(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|existing| existing.id() != id);
        let removed = self.items.len() != before;
        if removed {
            debug!(id = %id, "Track removed from playlist");
        }
        removed
    }

    /// Membership for a fresh set of search candidates.
    ///
    /// Every candidate maps to "is it in the ordered selection right now";
    /// identifiers outside `candidates` get no entry.
    pub fn recompute_membership_after_search(&self, candidates: &[Item]) -> Membership {
        let entries = candidates
            .iter()
            .map(|candidate| (candidate.id().clone(), self.contains(candidate.id())))
            .collect();
        Membership { entries }
    }

    /// Replace the collection name. Any string is accepted here.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = CollectionName::new(name);
    }

    /// Empty the selection and restore the default name
    pub fn clear(&mut self) {
        self.items.clear();
        self.name = CollectionName::default();
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn name(&self) -> &CollectionName {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Playable references in selection order
    pub fn uris(&self) -> Vec<String> {
        self.items.iter().map(|item| item.uri().to_string()).collect()
    }
}
