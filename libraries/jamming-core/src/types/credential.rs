//! Bearer credentials

use std::fmt;

/// Opaque bearer token.
///
/// Expiry is never predicted locally; a credential is only known to be dead
/// once a remote call rejects it. `Debug` output is redacted so tokens do not
/// end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Result of the external authorization exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: Credential,
    /// Lifetime the authorization server announced, in seconds.
    ///
    /// Informational only.
    pub expires_in: Option<u64>,
}

impl TokenGrant {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: Credential::new(access_token),
            expires_in: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_never_prints_token() {
        let cred = Credential::new("BQD-super-secret");
        let printed = format!("{:?}", cred);
        assert!(!printed.contains("super-secret"));
        assert_eq!(cred.secret(), "BQD-super-secret");
    }
}
