//! Auth routes — OAuth callback, current-user lookup, logout.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use crate::services::exchange::CodeExchange;
use crate::services::session::{CookieCredentials, SessionStore};
use crate::services::token::{self, CREDENTIAL_COOKIES, Claims};
use crate::state::AppState;

// =============================================================================
// CURRENT USER EXTRACTOR
// =============================================================================

/// Claims decoded from the presented session credential.
///
/// Display-only identity: signatures are never verified client-side of the
/// identity backend, so this must gate rendering and nothing else. Requests
/// acting on patient data are authorized by the backing API independently.
pub struct CurrentUser(pub Claims);

impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let credential = token::find_credential(&jar).ok_or(StatusCode::UNAUTHORIZED)?;
        let claims = token::claims_from_credential(&credential).ok_or(StatusCode::UNAUTHORIZED)?;
        Ok(Self(claims))
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
}

/// `GET /login/callback/success` — one-shot code exchange behind the identity
/// provider's redirect. Every branch terminates in a navigation; on success
/// the backend's session cookies are forwarded on the redirect.
pub async fn oauth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let Some(exchange_config) = state.config.exchange.clone() else {
        return (StatusCode::SERVICE_UNAVAILABLE, "identity backend not configured").into_response();
    };

    // Session scope for this login interaction. The store reads credentials
    // back from the request jar; right after the exchange the new cookie is
    // usually not committed yet, which the store tolerates.
    let store = SessionStore::new(Arc::new(CookieCredentials::new(jar)));
    let flow = CodeExchange::new(state.http.clone(), exchange_config);
    let outcome = flow.run(&store, params.code.as_deref()).await;

    let mut response = Redirect::temporary(outcome.target).into_response();
    for cookie in outcome.session_cookies {
        if let Ok(value) = header::HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

/// `GET /api/auth/me` — decoded claims for the presented credential.
/// UX data for role-gated menus, not an authorization source.
pub async fn me(user: CurrentUser) -> Json<Claims> {
    Json(user.0)
}

/// `POST /api/auth/logout` — clear every credential cookie name, 204.
///
/// The authoritative session lives with the identity backend; the gateway's
/// part of logout is dropping the credential cookies in one response.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let secure = state.config.cookie_secure;
    let mut jar = CookieJar::new();
    for name in CREDENTIAL_COOKIES {
        let cookie = Cookie::build((name, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(secure)
            .max_age(Duration::ZERO);
        jar = jar.add(cookie);
    }
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
