//! Catalog search against the Spotify Web API.

use crate::error::{error_from_response, map_send_error, ClientError, Result};
use crate::types::SearchResponse;
use jamming_core::Item;
use reqwest::Client;
use tracing::debug;

/// Search client for the Spotify catalog.
pub struct SearchClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    access_token: &'a str,
    limit: Option<u32>,
}

impl<'a> SearchClient<'a> {
    pub(crate) fn new(
        http: &'a Client,
        base_url: &'a str,
        access_token: &'a str,
        limit: Option<u32>,
    ) -> Self {
        Self {
            http,
            base_url,
            access_token,
            limit,
        }
    }

    /// Search tracks matching `term`.
    ///
    /// A response without any tracks is an empty, successful result.
    pub async fn search_tracks(&self, term: &str) -> Result<Vec<Item>> {
        let url = format!("{}/search", self.base_url);
        debug!(url = %url, term = %term, "Searching tracks");

        let mut query: Vec<(&str, String)> =
            vec![("type", "track".to_string()), ("q", term.to_string())];
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .query(&query)
            .bearer_auth(self.access_token)
            .send()
            .await
            .map_err(map_send_error)?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse search response: {}", e))
        })?;

        let items: Vec<Item> = body
            .tracks
            .map(|page| page.items.into_iter().map(Item::from).collect())
            .unwrap_or_default();

        debug!(results = items.len(), "Search complete");
        Ok(items)
    }
}
