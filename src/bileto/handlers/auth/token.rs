//! Signed session tokens.
//!
//! PASETO `v4.local`: authenticated encryption under a single symmetric
//! key, so tokens are tamper-evident and carry their own expiry without
//! any server-side session state.

use anyhow::{anyhow, Context, Result};
use base64ct::{Base64, Encoding};
use pasetors::claims::{Claims, ClaimsValidationRules};
use pasetors::keys::SymmetricKey;
use pasetors::token::UntrustedToken;
use pasetors::{local, version4::V4, Local};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use uuid::Uuid;

const SESSION_KEY_BYTES: usize = 32;

pub struct TokenSigner {
    key: SymmetricKey<V4>,
    ttl: Duration,
}

impl TokenSigner {
    /// Build a signer from a base64-encoded 32-byte key.
    ///
    /// # Errors
    /// Returns an error if the key is not valid base64, is not exactly
    /// 32 bytes, or the TTL is negative.
    pub fn new(key: &SecretString, ttl_seconds: i64) -> Result<Self> {
        let bytes = Base64::decode_vec(key.expose_secret())
            .map_err(|_| anyhow!("session key is not valid base64"))?;
        if bytes.len() != SESSION_KEY_BYTES {
            return Err(anyhow!(
                "session key must be {SESSION_KEY_BYTES} bytes, got {}",
                bytes.len()
            ));
        }
        let key =
            SymmetricKey::<V4>::from(&bytes).map_err(|err| anyhow!("invalid session key: {err}"))?;
        let ttl = Duration::from_secs(
            u64::try_from(ttl_seconds).context("session ttl must not be negative")?,
        );
        Ok(Self { key, ttl })
    }

    /// Issue a token whose subject is the user id.
    pub(crate) fn sign(&self, user_id: Uuid) -> Result<String> {
        let mut claims = Claims::new_expires_in(&self.ttl)
            .map_err(|err| anyhow!("failed to build token claims: {err}"))?;
        claims
            .subject(&user_id.to_string())
            .map_err(|err| anyhow!("failed to set token subject: {err}"))?;
        local::encrypt(&self.key, &claims, None, None)
            .map_err(|err| anyhow!("failed to seal session token: {err}"))
    }

    /// Verify a token and return the embedded user id.
    ///
    /// Tampered, expired, and malformed tokens are all rejected with an
    /// error; verification never panics.
    pub(crate) fn verify(&self, token: &str) -> Result<Uuid> {
        let rules = ClaimsValidationRules::new();
        let untrusted = UntrustedToken::<Local, V4>::try_from(token)
            .map_err(|err| anyhow!("malformed session token: {err}"))?;
        let trusted = local::decrypt(&self.key, &untrusted, &rules, None, None)
            .map_err(|err| anyhow!("invalid session token: {err}"))?;
        let claims = trusted
            .payload_claims()
            .ok_or_else(|| anyhow!("session token has no claims"))?;
        let subject = claims
            .get_claim("sub")
            .and_then(|value| value.as_str())
            .ok_or_else(|| anyhow!("session token has no subject"))?;
        Uuid::parse_str(subject).context("session token subject is not a user id")
    }
}
