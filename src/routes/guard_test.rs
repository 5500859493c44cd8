use super::*;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use crate::routes;
use crate::state::test_helpers::{test_app_state, test_app_state_with_bypass};

// =============================================================================
// decide — pure request → effect decision
// =============================================================================

#[test]
fn unprotected_paths_pass_regardless_of_cookie_state() {
    for path in ["/", "/login", "/about", "/api/auth/me", "/healthz"] {
        assert_eq!(decide(false, path, false), RouteDecision::Pass, "{path} without credential");
        assert_eq!(decide(false, path, true), RouteDecision::Pass, "{path} with credential");
    }
}

#[test]
fn protected_paths_without_credential_redirect_to_login() {
    for path in ["/dashboard", "/appointment", "/medical-record"] {
        assert_eq!(decide(false, path, false), RouteDecision::Redirect(LOGIN_PATH), "{path}");
    }
}

#[test]
fn protected_sub_paths_are_covered() {
    for path in ["/dashboard/calendar", "/appointment/42/reschedule", "/medical-record/intake/step-2"] {
        assert_eq!(decide(false, path, false), RouteDecision::Redirect(LOGIN_PATH), "{path}");
    }
}

#[test]
fn credential_presence_passes_without_validity_check() {
    // The guard never decodes the credential; presence is the whole check.
    assert_eq!(decide(false, "/dashboard", true), RouteDecision::Pass);
    assert_eq!(decide(false, "/medical-record/7", true), RouteDecision::Pass);
}

#[test]
fn dev_bypass_short_circuits_all_protection() {
    for path in ["/dashboard", "/appointment/1", "/medical-record", "/login"] {
        assert_eq!(decide(true, path, false), RouteDecision::Pass, "{path}");
    }
}

#[test]
fn prefix_matching_is_case_sensitive() {
    assert_eq!(decide(false, "/Dashboard", false), RouteDecision::Pass);
    assert_eq!(decide(false, "/MEDICAL-RECORD", false), RouteDecision::Pass);
}

#[test]
fn is_protected_classifies_prefixes() {
    assert!(is_protected("/dashboard"));
    assert!(is_protected("/dashboard/calendar"));
    assert!(is_protected("/appointment"));
    assert!(is_protected("/medical-record/9/edit"));
    assert!(!is_protected("/login"));
    assert!(!is_protected("/"));
    assert!(!is_protected("/api/auth/me"));
}

// =============================================================================
// middleware — guard wired into the real router
// =============================================================================

fn get_request(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn protected_page_without_cookie_redirects_to_login() {
    let app = routes::app(test_app_state());
    let resp = app.oneshot(get_request("/dashboard", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn protected_sub_path_without_cookie_redirects_to_login() {
    let app = routes::app(test_app_state());
    let resp = app.oneshot(get_request("/dashboard/calendar", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(resp.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn protected_page_with_unverifiable_credential_passes() {
    // Any cookie value passes the edge; validity is the backing API's job.
    let app = routes::app(test_app_state());
    let resp = app
        .oneshot(get_request("/dashboard", Some("jwt=not-even-a-token")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn fallback_cookie_name_passes_guard() {
    let app = routes::app(test_app_state());
    let resp = app
        .oneshot(get_request("/appointment", Some("authToken=abc")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn dev_bypass_passes_protected_page_without_cookie() {
    let app = routes::app(test_app_state_with_bypass());
    let resp = app.oneshot(get_request("/medical-record", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_page_is_public() {
    let app = routes::app(test_app_state());
    let resp = app.oneshot(get_request("/login", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn healthz_is_outside_the_guard() {
    let app = routes::app(test_app_state());
    let resp = app.oneshot(get_request("/healthz", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
