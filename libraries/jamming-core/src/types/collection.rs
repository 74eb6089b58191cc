//! Collection name

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name a fresh collection starts with, and returns to after a commit
pub const DEFAULT_COLLECTION_NAME: &str = "New Playlist";

/// User-editable collection name.
///
/// Any string is accepted, including the empty one; the commit step is
/// what refuses to persist an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_COLLECTION_NAME
    }
}

impl Default for CollectionName {
    fn default() -> Self {
        Self(DEFAULT_COLLECTION_NAME.to_string())
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sentinel() {
        let name = CollectionName::default();
        assert!(name.is_default());
        assert_eq!(name.to_string(), "New Playlist");
    }

    #[test]
    fn accepts_empty() {
        let name = CollectionName::new("");
        assert!(name.is_empty());
        assert!(!name.is_default());
    }
}
