//! One-way salted password hashing for the credential store.
//!
//! Argon2id with a fresh salt per hash; stored as PHC strings so the
//! parameters travel with the hash.

use anyhow::{anyhow, Result};
use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;

/// Hash a password for storage.
pub(crate) fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow!("failed to hash password: {err}"))?
        .to_string();
    Ok(hash)
}

/// Verify a password against a stored PHC hash.
///
/// Returns `Ok(false)` on a mismatch; an error only means the stored
/// hash itself is unusable.
pub(crate) fn verify_password(password: &str, stored: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|err| anyhow!("malformed password hash: {err}"))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(err) => Err(anyhow!("failed to verify password: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() -> Result<()> {
        let hash = hash_password("pw123456")?;
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("pw123456", &hash)?);
        Ok(())
    }

    #[test]
    fn verify_rejects_wrong_password() -> Result<()> {
        let hash = hash_password("pw123456")?;
        assert!(!verify_password("wrong-password", &hash)?);
        Ok(())
    }

    #[test]
    fn hashes_are_salted() -> Result<()> {
        let first = hash_password("pw123456")?;
        let second = hash_password("pw123456")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(verify_password("pw123456", "not-a-phc-string").is_err());
    }
}
