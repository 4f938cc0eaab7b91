//! Session cookie management and the session introspection endpoint.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::error;

use super::state::{AuthConfig, AuthState};
use super::storage::find_user_by_id;
use super::types::SessionResponse;

const SESSION_COOKIE_NAME: &str = "bileto_session";

#[utoipa::path(
    get,
    path = "/auth/session",
    responses(
        (status = 200, description = "Session is active", body = SessionResponse),
        (status = 204, description = "No active session")
    ),
    tag = "auth"
)]
pub async fn session(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
) -> impl IntoResponse {
    // Missing or unverifiable cookies read as "no session" to avoid
    // leaking auth state.
    let Some(token) = extract_session_token(&headers) else {
        return StatusCode::NO_CONTENT.into_response();
    };
    let Ok(user_id) = auth_state.signer().verify(&token) else {
        return StatusCode::NO_CONTENT.into_response();
    };
    match find_user_by_id(&pool, user_id).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(SessionResponse {
                user_id: user.id.to_string(),
                email: user.email,
                name: user.name,
            }),
        )
            .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!("Failed to resolve session user: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Build a scoped `HttpOnly` cookie for the session token.
pub(super) fn session_cookie(
    config: &AuthConfig,
    token: &str,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let ttl_seconds = config.session_ttl_seconds();
    // Only mark cookies secure when the frontend is served over HTTPS.
    let secure = config.session_cookie_secure();
    let mut cookie = format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={ttl_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(super) fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = config.session_cookie_secure();
    let mut cookie = format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

pub(super) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_sets_scope_and_ttl() -> Result<(), InvalidHeaderValue> {
        let config = AuthConfig::new("http://localhost:3000".to_string());
        let cookie = session_cookie(&config, "token-value")?;
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("bileto_session=token-value"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=43200"));
        assert!(!cookie.contains("Secure"));
        Ok(())
    }

    #[test]
    fn session_cookie_secure_for_https_frontend() -> Result<(), InvalidHeaderValue> {
        let config = AuthConfig::new("https://desk.bileto.dev".to_string());
        let cookie = session_cookie(&config, "token-value")?;
        assert!(cookie.to_str().unwrap().ends_with("; Secure"));
        Ok(())
    }

    #[test]
    fn clear_session_cookie_expires_immediately() -> Result<(), InvalidHeaderValue> {
        let config = AuthConfig::new("http://localhost:3000".to_string());
        let cookie = clear_session_cookie(&config)?;
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("bileto_session=;"));
        assert!(cookie.contains("Max-Age=0"));
        Ok(())
    }

    #[test]
    fn extract_session_token_finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; bileto_session=abc123; lang=eo"),
        );
        assert_eq!(extract_session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn extract_session_token_none_when_missing() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(extract_session_token(&headers), None);
    }
}
