//! Session-credential lookup and claims decoding.
//!
//! ARCHITECTURE
//! ============
//! The session credential is an opaque JWT-shaped bearer token minted by the
//! external identity backend and carried in a cookie. Nothing here verifies a
//! signature: decoded claims feed role-gated rendering and `/api/auth/me`
//! only. Authorization is enforced by the backing API, never by this module.

use axum_extra::extract::cookie::CookieJar;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Deserializer, Serialize};

/// Cookie names that may carry the session credential, in lookup order.
///
/// The credential name is not standardized across integration points; this
/// fallback chain is a deliberate compatibility shim, first match wins.
pub const CREDENTIAL_COOKIES: [&str; 3] = ["jwt", "token", "authToken"];

/// Return the raw session credential from the first matching cookie, if any.
#[must_use]
pub fn find_credential(jar: &CookieJar) -> Option<String> {
    CREDENTIAL_COOKIES
        .iter()
        .find_map(|name| jar.get(name).map(|cookie| cookie.value().to_owned()))
}

/// Decoded claims of the session credential. Display/UX input only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, an email-like user identifier.
    pub sub: String,
    /// Role labels. Tokens carry either a single label or a list.
    #[serde(default, deserialize_with = "role_labels")]
    pub role: Vec<String>,
    /// Issued-at, unix seconds.
    #[serde(default)]
    pub iat: Option<i64>,
    /// Expiry, unix seconds.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issuer.
    #[serde(default)]
    pub iss: Option<String>,
}

impl Claims {
    /// Whether the claims carry the given role label.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.role.iter().any(|r| r == role)
    }
}

fn role_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RoleField {
        One(String),
        Many(Vec<String>),
    }

    Ok(match RoleField::deserialize(deserializer)? {
        RoleField::One(role) => vec![role],
        RoleField::Many(roles) => roles,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum TokenDecodeError {
    #[error("credential is not a three-part token")]
    NotThreePart,
    #[error("claims segment is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("claims segment is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("claims segment is not a valid claims record: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the claims segment of a three-part dot-separated credential.
///
/// The middle segment is base64url; decoding goes through raw bytes and
/// `String::from_utf8` so multi-byte claim values survive intact. Both padded
/// and unpadded segments are accepted.
///
/// # Errors
///
/// Returns the stage that failed: token shape, base64, UTF-8, or the claims
/// record itself.
pub fn decode_claims(credential: &str) -> Result<Claims, TokenDecodeError> {
    let mut parts = credential.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenDecodeError::NotThreePart);
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

/// Decode a credential into claims, flattening failures to `None`.
///
/// A malformed credential is a logged, non-fatal condition: callers get
/// `None` claims and carry on.
#[must_use]
pub fn claims_from_credential(credential: &str) -> Option<Claims> {
    match decode_claims(credential) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::warn!(error = %e, "session credential present but undecodable");
            None
        }
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
