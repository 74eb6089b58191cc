//! Implicit-grant authorization helpers.

use crate::error::{ClientError, Result};
use crate::types::SpotifyConfig;
use jamming_core::{Authorizer, TokenGrant};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};
use url::Url;

/// Build the accounts-service URL that starts the authorization flow.
pub fn authorize_url(config: &SpotifyConfig) -> Result<Url> {
    let base = config.accounts_base_url.trim_end_matches('/');
    let mut url = Url::parse(&format!("{}/authorize", base))
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base, e)))?;

    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("response_type", "token")
        .append_pair("scope", &config.scope)
        .append_pair("redirect_uri", &config.redirect_uri);

    Ok(url)
}

/// Extract the token grant from the URL the accounts service redirected to.
///
/// Accepts the full redirect URL, or just its fragment with or without the
/// leading `#`.
pub fn parse_redirect_fragment(input: &str) -> Result<TokenGrant> {
    let fragment = match input.split_once('#') {
        Some((_, fragment)) => fragment,
        None if input.contains("://") => {
            return Err(ClientError::InvalidRedirect(
                "redirect URL has no fragment".into(),
            ))
        }
        None => input,
    };

    let mut access_token = None;
    let mut expires_in = None;

    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "access_token" => access_token = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse::<u64>().ok(),
            "error" => {
                warn!(error = %value, "Authorization was not granted");
                return Err(ClientError::InvalidRedirect(format!(
                    "authorization failed: {}",
                    value
                )));
            }
            _ => {}
        }
    }

    match access_token {
        Some(token) if !token.is_empty() => {
            debug!(expires_in = ?expires_in, "Parsed token grant from redirect");
            let mut grant = TokenGrant::new(token);
            grant.expires_in = expires_in;
            Ok(grant)
        }
        _ => Err(ClientError::InvalidRedirect(
            "missing access_token".into(),
        )),
    }
}

/// Hands the authorize URL to whatever performs the redirect.
///
/// In a browser that is a navigation; in a terminal front-end it is printing
/// the URL and ending the session.
pub struct RedirectAuthorizer {
    url: Url,
    on_redirect: Box<dyn Fn(&Url) + Send + Sync>,
    redirects: AtomicUsize,
}

impl RedirectAuthorizer {
    pub fn new(url: Url, on_redirect: impl Fn(&Url) + Send + Sync + 'static) -> Self {
        Self {
            url,
            on_redirect: Box::new(on_redirect),
            redirects: AtomicUsize::new(0),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// How many times the flow has been started.
    pub fn redirect_count(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Authorizer for RedirectAuthorizer {
    fn begin_authorization(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
        info!(url = %self.url, "Redirecting to Spotify authorization");
        (self.on_redirect)(&self.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn config() -> SpotifyConfig {
        SpotifyConfig::new("abc123", "http://localhost:3000/callback")
    }

    #[test]
    fn authorize_url_carries_implicit_grant_params() {
        let url = authorize_url(&config()).unwrap();
        assert_eq!(url.host_str(), Some("accounts.spotify.com"));
        assert_eq!(url.path(), "/authorize");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("client_id".into(), "abc123".into())));
        assert!(pairs.contains(&("response_type".into(), "token".into())));
        assert!(pairs.contains(&("scope".into(), "playlist-modify-public".into())));
        assert!(pairs.contains(&(
            "redirect_uri".into(),
            "http://localhost:3000/callback".into()
        )));
    }

    #[test]
    fn parses_full_redirect_url() {
        let grant = parse_redirect_fragment(
            "http://localhost:3000/callback#access_token=BQD123&token_type=Bearer&expires_in=3600",
        )
        .unwrap();
        assert_eq!(grant.access_token.secret(), "BQD123");
        assert_eq!(grant.expires_in, Some(3600));
    }

    #[test]
    fn parses_bare_fragment() {
        let grant = parse_redirect_fragment("#access_token=tok&token_type=Bearer").unwrap();
        assert_eq!(grant.access_token.secret(), "tok");
        assert_eq!(grant.expires_in, None);

        let grant = parse_redirect_fragment("access_token=tok2").unwrap();
        assert_eq!(grant.access_token.secret(), "tok2");
    }

    #[test]
    fn rejects_denied_or_missing_token() {
        assert!(matches!(
            parse_redirect_fragment("http://localhost/cb#error=access_denied"),
            Err(ClientError::InvalidRedirect(_))
        ));
        assert!(matches!(
            parse_redirect_fragment("http://localhost/cb?code=x"),
            Err(ClientError::InvalidRedirect(_))
        ));
        assert!(matches!(
            parse_redirect_fragment("token_type=Bearer"),
            Err(ClientError::InvalidRedirect(_))
        ));
    }

    #[test]
    fn redirect_authorizer_invokes_handler_and_counts() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let authorizer = RedirectAuthorizer::new(authorize_url(&config()).unwrap(), move |url| {
            sink.lock().unwrap().push(url.to_string());
        });

        authorizer.begin_authorization();

        assert_eq!(authorizer.redirect_count(), 1);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("https://accounts.spotify.com/authorize?"));
    }
}
