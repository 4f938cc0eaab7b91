//! Credential verification and session issuance.
//!
//! These orchestrations return a discriminated error kind; the handler
//! boundary in `auth::mod` is the single place failures become the
//! `{success, message}` envelope.

use thiserror::Error;

use super::password::{hash_password, verify_password};
use super::storage::{CredentialStore, InsertOutcome, UserRecord};
use super::token::TokenSigner;
use crate::bileto::handlers::valid_email;

/// Failure taxonomy for register/login/logout.
#[derive(Debug, Error)]
pub(crate) enum AuthError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email")]
    InvalidEmail,
    #[error("User already exists")]
    DuplicateUser,
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid password")]
    InvalidCredentials,
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Create a user and issue a session token for it.
///
/// The email must already be normalized.
pub(crate) async fn try_register<S: CredentialStore>(
    store: &S,
    signer: &TokenSigner,
    email: &str,
    password: &str,
    name: &str,
) -> Result<(UserRecord, String), AuthError> {
    if email.is_empty() || password.is_empty() || name.is_empty() {
        return Err(AuthError::MissingFields);
    }

    if !valid_email(email) {
        return Err(AuthError::InvalidEmail);
    }

    // Fast-path duplicate check; the unique constraint behind
    // `insert_user` stays authoritative.
    if store.find_by_email(email).await?.is_some() {
        return Err(AuthError::DuplicateUser);
    }

    let password_hash = hash_password(password)?;

    match store.insert_user(email, &password_hash, name).await? {
        InsertOutcome::Created(user) => {
            let token = signer.sign(user.id)?;
            Ok((user, token))
        }
        InsertOutcome::Conflict => Err(AuthError::DuplicateUser),
    }
}

/// Verify credentials and issue a session token.
pub(crate) async fn try_login<S: CredentialStore>(
    store: &S,
    signer: &TokenSigner,
    email: &str,
    password: &str,
) -> Result<(UserRecord, String), AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }

    let Some(user) = store.find_by_email(email).await? else {
        return Err(AuthError::UserNotFound);
    };

    if !verify_password(password, &user.password_hash)? {
        return Err(AuthError::InvalidCredentials);
    }

    let token = signer.sign(user.id)?;

    Ok((user, token))
}
