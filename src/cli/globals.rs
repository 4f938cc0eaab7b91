use secrecy::SecretString;

/// Session TTL used when `--session-ttl` is not given (12 hours).
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 12 * 60 * 60;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub frontend_url: String,
    pub session_key: SecretString,
    pub session_ttl_seconds: i64,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(frontend_url: String, session_key: SecretString, session_ttl_seconds: i64) -> Self {
        Self {
            frontend_url,
            session_key,
            session_ttl_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            "http://localhost:3000".to_string(),
            SecretString::from("secret".to_string()),
            DEFAULT_SESSION_TTL_SECONDS,
        );
        assert_eq!(args.frontend_url, "http://localhost:3000");
        assert_eq!(args.session_key.expose_secret(), "secret");
        assert_eq!(args.session_ttl_seconds, 43200);
    }
}
