//! Authorization gate
//!
//! Owns the session's bearer credential and the auth generation counter.
//! The generation moves forward every time the credential is invalidated,
//! which is how completions that belong to a torn-down session are told
//! apart from live ones.

use crate::error::{Result, SessionError};
use jamming_core::{Authorizer, Credential, TokenGrant};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Identifies the credential lifetime an operation was started under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AuthGeneration(u64);

impl AuthGeneration {
    pub fn value(self) -> u64 {
        self.0
    }
}

pub struct AuthorizationGate {
    credential: Option<Credential>,
    generation: AuthGeneration,
    authorizer: Arc<dyn Authorizer>,
    redirects: usize,
}

impl AuthorizationGate {
    pub fn new(authorizer: Arc<dyn Authorizer>) -> Self {
        Self {
            credential: None,
            generation: AuthGeneration(0),
            authorizer,
            redirects: 0,
        }
    }

    /// Session start: adopt whatever token the authorization flow left us.
    ///
    /// Never redirects. A missing token is only acted on once the user tries
    /// to search or commit.
    pub fn check_for_access_token(&mut self, grant: Option<TokenGrant>) {
        match grant {
            Some(grant) => {
                debug!(expires_in = ?grant.expires_in, "Access token present at session start");
                self.credential = Some(grant.access_token);
            }
            None => debug!("No access token at session start"),
        }
    }

    pub fn access_token(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Return the current credential, or start authorization if there is none.
    pub fn ensure_credential(&mut self) -> Result<Credential> {
        match &self.credential {
            Some(credential) => Ok(credential.clone()),
            None => {
                info!("Access token is not available, redirecting to login");
                self.redirect();
                Err(SessionError::AuthorizationRequired)
            }
        }
    }

    /// The credential was rejected by the remote service.
    ///
    /// Drops it, retires the current generation and starts authorization.
    pub fn invalidate(&mut self) {
        warn!(
            generation = self.generation.0,
            "Access token might be expired, redirecting to login"
        );
        self.credential = None;
        self.generation = AuthGeneration(self.generation.0 + 1);
        self.redirect();
    }

    pub fn generation(&self) -> AuthGeneration {
        self.generation
    }

    pub fn is_current(&self, generation: AuthGeneration) -> bool {
        self.generation == generation
    }

    /// Number of times this gate has started the authorization flow
    pub fn redirect_count(&self) -> usize {
        self.redirects
    }

    fn redirect(&mut self) {
        self.redirects += 1;
        self.authorizer.begin_authorization();
    }
}
