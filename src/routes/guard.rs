//! Edge route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once per incoming request, before any page content, and either lets
//! the request through or redirects to the login page. The decision is a pure
//! function of the request path and cookie presence: the credential is never
//! decoded or validated here. This check is advisory defense-in-depth — the
//! backing API must independently reject requests lacking a valid credential.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::services::token;
use crate::state::AppState;

/// Path prefixes requiring a session credential. Matched with case-sensitive
/// starts-with semantics, so sub-paths like `/dashboard/calendar` are covered.
/// Fixed at deploy time.
pub const PROTECTED_PREFIXES: [&str; 3] = ["/dashboard", "/appointment", "/medical-record"];

/// Redirect target for unauthenticated requests to protected paths.
pub const LOGIN_PATH: &str = "/login";

/// Effect of the guard on one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Request proceeds unmodified.
    Pass,
    /// Browser is sent to the target instead.
    Redirect(&'static str),
}

/// Whether the path falls under a protected prefix.
#[must_use]
pub fn is_protected(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Decide the guard effect for one request.
///
/// The dev bypass is checked first and short-circuits everything, for all
/// paths. A missing credential on a protected path is a normal redirect
/// trigger, not an error.
#[must_use]
pub fn decide(dev_bypass: bool, path: &str, has_credential: bool) -> RouteDecision {
    if dev_bypass {
        return RouteDecision::Pass;
    }
    if !is_protected(path) {
        return RouteDecision::Pass;
    }
    if has_credential {
        RouteDecision::Pass
    } else {
        RouteDecision::Redirect(LOGIN_PATH)
    }
}

/// Axum middleware applying [`decide`] to each request.
///
/// Layered onto the page router only; static assets and unrelated services
/// are mounted outside it and never pass through here.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let has_credential = token::find_credential(&jar).is_some();
    match decide(state.config.dev_auth_bypass, req.uri().path(), has_credential) {
        RouteDecision::Pass => next.run(req).await,
        RouteDecision::Redirect(target) => Redirect::temporary(target).into_response(),
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
