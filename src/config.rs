//! Environment-driven gateway configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! All runtime knobs come from the process environment at startup. The dev
//! auth bypass deliberately lives here rather than in anything a browser can
//! set: it disables route protection globally and must never be reachable via
//! user-controllable input.

use crate::services::exchange::ExchangeConfig;

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// Gateway configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token-exchange settings. `None` if the identity backend is not
    /// configured (login is disabled, protected routes still redirect).
    pub exchange: Option<ExchangeConfig>,
    /// Disables all route protection when true. Dev/test environments only.
    pub dev_auth_bypass: bool,
    /// Whether cookies cleared by the gateway carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl Config {
    /// Load from `AUTH_EXCHANGE_URL`, `AUTH_REDIRECT_URL`, `DEV_AUTH_BYPASS`
    /// and `COOKIE_SECURE`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            exchange: ExchangeConfig::from_env(),
            dev_auth_bypass: env_bool("DEV_AUTH_BYPASS").unwrap_or(false),
            cookie_secure: cookie_secure(),
        }
    }
}

/// `COOKIE_SECURE` wins when set; otherwise infer from the redirect URL
/// scheme so local http setups keep working.
pub(crate) fn cookie_secure() -> bool {
    if let Some(value) = env_bool("COOKIE_SECURE") {
        return value;
    }

    std::env::var("AUTH_REDIRECT_URL")
        .map(|uri| uri.starts_with("https://"))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
