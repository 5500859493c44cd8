//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the parsed configuration and one shared outbound HTTP client; there
//! is no per-request mutable state, so the guard and handlers stay reentrant
//! across concurrent requests.

use std::sync::Arc;

use crate::config::Config;
use crate::services::exchange::EXCHANGE_TIMEOUT;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — inner fields are Arc-wrapped or cheap clones.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Outbound client for the token exchange, bounded by `EXCHANGE_TIMEOUT`.
    pub http: reqwest::Client,
}

impl AppState {
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized; startup-only.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(EXCHANGE_TIMEOUT)
            .build()
            .expect("outbound http client init failed");
        Self { config: Arc::new(config), http }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
