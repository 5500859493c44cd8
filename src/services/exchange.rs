//! OAuth code-exchange flow.
//!
//! ARCHITECTURE
//! ============
//! One-shot flow behind the identity provider's redirect: take the
//! authorization code off the callback URL, trade it at the external token
//! endpoint, and end in a navigation either way. The session cookie is minted
//! by the token backend in its 204 response; the exchange request itself
//! attaches no credentials of its own. `run` consumes the flow value, so a
//! single instance cannot be triggered twice, and the store update sits after
//! the only await point, so dropping a cancelled flow discards its result
//! without touching the store.

use std::time::Duration;

use axum::http::StatusCode;
use reqwest::header::SET_COOKIE;

use crate::services::session::SessionStore;

/// Navigation target for every failed branch of the flow.
pub const FAILURE_TARGET: &str = "/login?error=google_failed";

/// Navigation target after a committed session.
pub const SUCCESS_TARGET: &str = "/dashboard";

/// Upper bound on the exchange call. An elapsed timeout is a transport
/// failure; the flow never leaves the user on a loading state.
pub const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Grace period for the just-minted session cookie to commit before the
/// store tries to read it back.
const COOKIE_SETTLE_DELAY: Duration = Duration::from_millis(150);

/// Token-exchange endpoint settings.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    /// External token-exchange endpoint.
    pub token_url: String,
    /// Pre-registered redirect URL sent back with the code.
    pub redirect_url: String,
}

impl ExchangeConfig {
    /// Load from `AUTH_EXCHANGE_URL` and `AUTH_REDIRECT_URL`.
    /// Returns `None` if either is missing (login will be disabled).
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let token_url = std::env::var("AUTH_EXCHANGE_URL").ok()?;
        let redirect_url = std::env::var("AUTH_REDIRECT_URL").ok()?;
        Some(Self { token_url, redirect_url })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    #[error("callback carried no authorization code")]
    MissingCode,
    #[error("token endpoint rejected the code: {0}")]
    Rejected(StatusCode),
    #[error("token exchange transport failure: {0}")]
    Transport(String),
}

/// Where the flow ended and what it carries there.
#[derive(Debug)]
pub struct FlowOutcome {
    /// Navigation target; every branch of the flow terminates in one.
    pub target: &'static str,
    /// Raw `Set-Cookie` header values from the backend's 204 response,
    /// forwarded verbatim on the outgoing redirect. Empty on failure.
    pub session_cookies: Vec<String>,
}

impl FlowOutcome {
    fn failed() -> Self {
        Self { target: FAILURE_TARGET, session_cookies: Vec::new() }
    }
}

/// One code-exchange attempt.
pub struct CodeExchange {
    http: reqwest::Client,
    config: ExchangeConfig,
}

impl CodeExchange {
    #[must_use]
    pub fn new(http: reqwest::Client, config: ExchangeConfig) -> Self {
        Self { http, config }
    }

    /// Drive the flow to a terminal navigation.
    ///
    /// On 204 the store is marked authenticated (claims populated when the
    /// credential is already readable) and the target is the dashboard; any
    /// other status, a missing code, or a transport failure all end at the
    /// error-annotated login target. No retries.
    pub async fn run(self, store: &SessionStore, code: Option<&str>) -> FlowOutcome {
        match self.exchange(code).await {
            Ok(session_cookies) => {
                tokio::time::sleep(COOKIE_SETTLE_DELAY).await;
                store.set_authenticated(true);
                FlowOutcome { target: SUCCESS_TARGET, session_cookies }
            }
            Err(e @ ExchangeError::MissingCode) => {
                tracing::warn!(error = %e, "oauth callback without code");
                FlowOutcome::failed()
            }
            Err(e) => {
                tracing::error!(error = %e, "oauth code exchange failed");
                FlowOutcome::failed()
            }
        }
    }

    /// Exchange the code for a backend-set session cookie.
    async fn exchange(&self, code: Option<&str>) -> Result<Vec<String>, ExchangeError> {
        let code = code.filter(|c| !c.is_empty()).ok_or(ExchangeError::MissingCode)?;

        let resp = self
            .http
            .get(&self.config.token_url)
            .query(&[("code", code), ("redirect_url", self.config.redirect_url.as_str())])
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(e.to_string()))?;

        if resp.status() != StatusCode::NO_CONTENT {
            return Err(ExchangeError::Rejected(resp.status()));
        }

        Ok(resp
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok().map(str::to_owned))
            .collect())
    }
}

#[cfg(test)]
#[path = "exchange_test.rs"]
mod tests;
