/// Front-end configuration
use anyhow::{bail, Context, Result};
use jamming_client::{SpotifyConfig, DEFAULT_ACCOUNTS_BASE_URL, DEFAULT_API_BASE_URL};
use jamming_session::{SearchOrdering, SessionConfig};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_CONFIG_FILE: &str = "jamming.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_spotify")]
    pub spotify: SpotifySettings,

    #[serde(default)]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifySettings {
    #[serde(default)]
    pub client_id: String,

    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_accounts_base_url")]
    pub accounts_base_url: String,

    /// Token obtained out of band, used instead of the redirect
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub search_limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionSettings {
    #[serde(default)]
    pub search_ordering: SearchOrdering,
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// `path` overrides the default `jamming.toml`, and must exist when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. JAMMING_SPOTIFY__CLIENT_ID
        settings = settings.add_source(
            config::Environment::with_prefix("JAMMING")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        settings
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.spotify.client_id.is_empty() {
            bail!("Spotify client ID is required (set JAMMING_SPOTIFY__CLIENT_ID)");
        }
        Ok(())
    }

    pub fn spotify_config(&self) -> SpotifyConfig {
        let mut config = SpotifyConfig::new(&self.spotify.client_id, &self.spotify.redirect_uri)
            .with_api_base_url(&self.spotify.api_base_url)
            .with_accounts_base_url(&self.spotify.accounts_base_url);
        if let Some(limit) = self.spotify.search_limit {
            config = config.with_search_limit(limit);
        }
        config
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            search_ordering: self.session.search_ordering,
            ..SessionConfig::default()
        }
    }
}

// Default values
fn default_spotify() -> SpotifySettings {
    SpotifySettings {
        client_id: String::new(),
        redirect_uri: default_redirect_uri(),
        api_base_url: default_api_base_url(),
        accounts_base_url: default_accounts_base_url(),
        access_token: None,
        search_limit: None,
    }
}

fn default_redirect_uri() -> String {
    "http://localhost:3000/callback".to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_accounts_base_url() -> String {
    DEFAULT_ACCOUNTS_BASE_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_file_and_fills_defaults() {
        let file = write_config(
            r#"
            [spotify]
            client_id = "abc123"

            [session]
            search_ordering = "latest_request"
            "#,
        );

        let config = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.spotify.client_id, "abc123");
        assert_eq!(config.spotify.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.spotify.redirect_uri, "http://localhost:3000/callback");
        assert!(config.spotify.access_token.is_none());
        assert_eq!(config.session.search_ordering, SearchOrdering::LatestRequest);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_client_id_fails_validation() {
        let file = write_config("[spotify]\nredirect_uri = \"http://localhost/cb\"\n");
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/jamming.toml"))).is_err());
    }

    #[test]
    fn spotify_config_carries_search_limit() {
        let file = write_config("[spotify]\nclient_id = \"x\"\nsearch_limit = 10\n");
        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.spotify_config().search_limit, Some(10));
        assert_eq!(config.spotify_config().client_id, "x");
    }
}
