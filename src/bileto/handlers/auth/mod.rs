//! Register, login, and logout operations.
//!
//! Each branch emits exactly one structured event and answers with the
//! uniform `{success, message}` envelope; no failure escapes the
//! boundary as a raw fault.

pub(crate) mod password;
pub(crate) mod service;
pub mod session;
pub mod state;
pub(crate) mod storage;
pub mod token;
pub mod types;


use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, info, warn};

use self::service::{try_login, try_register, AuthError};
use self::session::{clear_session_cookie, session_cookie};
use self::state::AuthState;
use self::types::{LoginRequest, RegisterRequest, ResponseResult};
use super::normalize_email;

#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registration successful", body = ResponseResult),
        (status = 400, description = "Missing or invalid fields", body = ResponseResult),
        (status = 409, description = "User with the specified email already exists", body = ResponseResult),
    ),
    tag = "auth"
)]
pub async fn register(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<RegisterRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        warn!(category = "auth", "Missing required fields");
        return (
            StatusCode::BAD_REQUEST,
            Json(ResponseResult::failed("All fields are required")),
        )
            .into_response();
    };

    let email = normalize_email(&request.email);

    match try_register(
        &*pool,
        auth_state.signer(),
        &email,
        &request.password,
        &request.name,
    )
    .await
    {
        Ok((user, token)) => {
            info!(
                category = "auth",
                email = %user.email,
                name = %user.name,
                "User registered successfully"
            );
            respond_with_cookie(
                StatusCode::CREATED,
                &auth_state,
                &token,
                "User registered successfully",
                "Failed to register user",
            )
        }
        Err(err) => failure_response(
            &err,
            &email,
            "Error registering user",
            "Failed to register user",
        ),
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ResponseResult),
        (status = 400, description = "Missing fields", body = ResponseResult),
        (status = 401, description = "Unknown user or wrong password", body = ResponseResult),
    ),
    tag = "auth"
)]
pub async fn login(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        warn!(category = "auth", "Missing required fields");
        return (
            StatusCode::BAD_REQUEST,
            Json(ResponseResult::failed("All fields are required")),
        )
            .into_response();
    };

    let email = normalize_email(&request.email);

    match try_login(&*pool, auth_state.signer(), &email, &request.password).await {
        Ok((user, token)) => {
            info!(
                category = "auth",
                email = %user.email,
                name = %user.name,
                "User logged in successfully"
            );
            respond_with_cookie(
                StatusCode::OK,
                &auth_state,
                &token,
                "User logged in successfully",
                "Failed to login user",
            )
        }
        Err(err) => failure_response(
            &err,
            &email,
            "Error logging in user",
            "Failed to login user",
        ),
    }
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Session cleared", body = ResponseResult),
    ),
    tag = "auth"
)]
pub async fn logout(auth_state: Extension<Arc<AuthState>>) -> Response {
    // Tokens are stateless; clearing the cookie is the whole logout.
    match clear_session_cookie(auth_state.config()) {
        Ok(cookie) => {
            let mut headers = HeaderMap::new();
            headers.insert(SET_COOKIE, cookie);
            info!(category = "auth", "User logged out successfully");
            (
                StatusCode::OK,
                headers,
                Json(ResponseResult::ok("User logged out successfully")),
            )
                .into_response()
        }
        Err(err) => {
            error!(category = "auth", error = %err, "Error logging out user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResponseResult::failed("Failed to logout user")),
            )
                .into_response()
        }
    }
}

/// Attach the session cookie to a success envelope.
fn respond_with_cookie(
    status: StatusCode,
    auth_state: &AuthState,
    token: &str,
    message: &str,
    failure_message: &str,
) -> Response {
    match session_cookie(auth_state.config(), token) {
        Ok(cookie) => {
            let mut headers = HeaderMap::new();
            headers.insert(SET_COOKIE, cookie);
            (status, headers, Json(ResponseResult::ok(message))).into_response()
        }
        Err(err) => {
            error!(category = "auth", error = %err, "Failed to set session cookie");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResponseResult::failed(failure_message)),
            )
                .into_response()
        }
    }
}

/// Convert an auth failure into its envelope, logging one event with a
/// severity matching the branch. `log_message`/`failure_message` are the
/// operation's catch-all strings for unexpected errors.
fn failure_response(
    err: &AuthError,
    email: &str,
    log_message: &str,
    failure_message: &str,
) -> Response {
    let (status, event): (StatusCode, &str) = match err {
        AuthError::MissingFields => (StatusCode::BAD_REQUEST, "Missing required fields"),
        AuthError::InvalidEmail => (StatusCode::BAD_REQUEST, "Invalid email"),
        AuthError::DuplicateUser => (StatusCode::CONFLICT, "User already exists"),
        AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, "User not found"),
        AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid password"),
        AuthError::Unexpected(cause) => {
            error!(category = "auth", email, error = ?cause, "{log_message}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResponseResult::failed(failure_message)),
            )
                .into_response();
        }
    };

    warn!(category = "auth", email, "{event}");
    (status, Json(ResponseResult::failed(&err.to_string()))).into_response()
}
