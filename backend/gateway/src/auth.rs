//! OAuth callback gate.
//!
//! Invoked once per completed third-party OAuth handshake. This gate
//! performs no authorization of its own: the provider-supplied default
//! identity is accepted unconditionally.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Identity produced by the OAuth exchange. Opaque to the core: it is
/// passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub provider: String,
    #[serde(default)]
    pub metadata: Value,
}

/// Decide whether the externally authenticated user may enter.
///
/// Always passes the default identity through; no allow-list, no role
/// mapping.
pub fn oauth_callback(
    provider_id: &str,
    _token: &str,
    raw_user_data: &Value,
    default_user: AuthenticatedUser,
) -> Option<AuthenticatedUser> {
    debug!(provider = provider_id, user_data = %raw_user_data, "OAuth callback");
    Some(default_user)
}

/// Payload the OAuth provider integration posts after the handshake.
#[derive(Debug, Deserialize)]
pub struct OauthCallbackPayload {
    pub provider_id: String,
    pub token: String,
    #[serde(default)]
    pub raw_user_data: Value,
    pub default_user: AuthenticatedUser,
}

/// Handler for `POST /auth/callback`.
pub async fn oauth_callback_handler(
    Json(payload): Json<OauthCallbackPayload>,
) -> Result<Json<AuthenticatedUser>, StatusCode> {
    match oauth_callback(
        &payload.provider_id,
        &payload.token,
        &payload.raw_user_data,
        payload.default_user,
    ) {
        Some(user) => Ok(Json(user)),
        None => Err(StatusCode::UNAUTHORIZED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_user_passes_through_unchanged() {
        let user = AuthenticatedUser {
            id: "octocat".into(),
            provider: "github".into(),
            metadata: json!({"login": "octocat"}),
        };
        let out = oauth_callback("github", "gho_token", &json!({"any": "thing"}), user.clone());
        assert_eq!(out, Some(user));
    }

    #[test]
    fn test_passthrough_ignores_provider_and_raw_data() {
        let user = AuthenticatedUser {
            id: "u1".into(),
            provider: "whatever".into(),
            metadata: Value::Null,
        };
        for provider in ["github", "gitlab", ""] {
            let out = oauth_callback(provider, "", &Value::Null, user.clone());
            assert_eq!(out.as_ref(), Some(&user));
        }
    }
}
