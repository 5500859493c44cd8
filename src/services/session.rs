//! Client-session state container.
//!
//! ARCHITECTURE
//! ============
//! One `SessionStore` holds the authenticated flag and decoded claims for a
//! single signed-in user scope (one browser tab or embedded client). It is
//! constructed explicitly with its credential source and handed to whatever
//! needs it; observers subscribe through a watch channel instead of reaching
//! for ambient globals. Mutations go through exactly three operations and are
//! atomic from an observer's perspective.
//!
//! TRADE-OFFS
//! ==========
//! `set_authenticated(true)` with no locatable credential leaves
//! `{authenticated: true, claims: None}`. The upstream flow relies on this
//! window (the credential cookie may not be committed yet), so the state is
//! kept legal and logged rather than rejected.

use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;
use tokio::sync::watch;

use crate::services::token::{self, Claims};

/// Where a store looks for the raw session credential.
///
/// Injected at construction so the lookup can be cookie-backed in the
/// gateway and fixed in tests or non-browser embeddings.
pub trait CredentialSource: Send + Sync {
    /// Return the raw credential, if one is currently present.
    fn credential(&self) -> Option<String>;
}

/// Cookie-backed credential source applying the standard fallback chain.
pub struct CookieCredentials {
    jar: CookieJar,
}

impl CookieCredentials {
    #[must_use]
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }
}

impl CredentialSource for CookieCredentials {
    fn credential(&self) -> Option<String> {
        token::find_credential(&self.jar)
    }
}

/// Fixed credential source for tests and embeddings without cookie storage.
pub struct StaticCredentials(pub Option<String>);

impl CredentialSource for StaticCredentials {
    fn credential(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Observable session state: the authenticated flag plus decoded claims.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub authenticated: bool,
    pub claims: Option<Claims>,
}

/// Session state container for one user scope.
pub struct SessionStore {
    source: Arc<dyn CredentialSource>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Create a store in the initial `{authenticated: false, claims: None}`
    /// state, reading credentials from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn CredentialSource>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { source, state }
    }

    /// Set the authenticated flag.
    ///
    /// When set true, locates and decodes the credential to populate claims;
    /// a missing or undecodable credential leaves claims `None` without
    /// failing. When set false, claims are cleared in the same update.
    pub fn set_authenticated(&self, value: bool) {
        let claims = if value {
            let claims = self.source.credential().as_deref().and_then(token::claims_from_credential);
            if claims.is_none() {
                tracing::warn!("authenticated without locatable claims; role-gated rendering degraded");
            }
            claims
        } else {
            None
        };

        self.state.send_modify(|state| {
            state.authenticated = value;
            state.claims = claims;
        });
    }

    /// Directly assign claims obtained by other means, e.g. an API response.
    pub fn set_user_info(&self, claims: Option<Claims>) {
        self.state.send_modify(|state| state.claims = claims);
    }

    /// Reset to `{authenticated: false, claims: None}` in one update.
    pub fn logout(&self) {
        self.state.send_modify(|state| {
            state.authenticated = false;
            state.claims = None;
        });
    }

    /// Current state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
