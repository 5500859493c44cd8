//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway fronts the clinic portal UI: page routes carry the edge route
//! guard, the auth API and health probe sit next to them, and static assets
//! are served by the CDN in front of this process, outside the guarded
//! router entirely.

pub mod auth;
pub mod guard;

use axum::Router;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::Html;
use axum::routing::{get, post};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full gateway router: guarded pages, auth API, health probe.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let pages = Router::new()
        .route("/login", get(login_page))
        .route("/login/callback/success", get(auth::oauth_callback))
        .route("/dashboard", get(page_shell))
        .route("/dashboard/{*rest}", get(page_shell))
        .route("/appointment", get(page_shell))
        .route("/appointment/{*rest}", get(page_shell))
        .route("/medical-record", get(page_shell))
        .route("/medical-record/{*rest}", get(page_shell))
        .layer(middleware::from_fn_with_state(state.clone(), guard::require_session));

    Router::new()
        .merge(pages)
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Minimal shell for the portal pages; actual rendering belongs to the UI
/// bundle, not the gateway.
async fn page_shell() -> Html<&'static str> {
    Html("<!doctype html><html><head><title>Clinic Portal</title></head><body><div id=\"app\"></div></body></html>")
}

#[derive(Deserialize)]
struct LoginQuery {
    error: Option<String>,
}

/// Login page shell. A failed sign-in lands here with a generic error flag;
/// the specific failure is never surfaced to the user.
async fn login_page(Query(query): Query<LoginQuery>) -> Html<String> {
    let notice = if query.error.is_some() {
        r#"<p class="login-error">Sign-in failed. Please try again.</p>"#
    } else {
        ""
    };
    Html(format!(
        "<!doctype html><html><head><title>Clinic Portal Login</title></head><body>{notice}<div id=\"app\"></div></body></html>"
    ))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
