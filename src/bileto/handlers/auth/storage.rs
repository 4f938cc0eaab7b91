//! Database access for user identity records.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

/// Identity record owned by the credential store.
#[derive(Debug, Clone)]
pub(crate) struct UserRecord {
    pub(crate) id: Uuid,
    pub(crate) email: String,
    pub(crate) name: String,
    pub(crate) password_hash: String,
}

/// Outcome when attempting to create a new user.
#[derive(Debug)]
pub(crate) enum InsertOutcome {
    Created(UserRecord),
    Conflict,
}

/// Persistence seam for user records; tests substitute an in-memory
/// store.
pub(crate) trait CredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
    async fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<InsertOutcome>;
}

impl CredentialStore for PgPool {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let query = "SELECT id, email, name, password_hash FROM users WHERE email = $1";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(self)
            .instrument(span)
            .await
            .context("failed to lookup user by email")?;

        Ok(row.map(|row| UserRecord {
            id: row.get("id"),
            email: row.get("email"),
            name: row.get("name"),
            password_hash: row.get("password_hash"),
        }))
    }

    async fn insert_user(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
    ) -> Result<InsertOutcome> {
        // The unique constraint on email is the authoritative duplicate
        // guard; the caller's existence check only short-circuits the
        // common case.
        let query = r"
        INSERT INTO users (email, password_hash, name)
        VALUES ($1, $2, $3)
        RETURNING id
    ";
        let span = tracing::info_span!(
            "db.query",
            db.system = "postgresql",
            db.operation = "INSERT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(email)
            .bind(password_hash)
            .bind(name)
            .fetch_one(self)
            .instrument(span)
            .await;

        match row {
            Ok(row) => Ok(InsertOutcome::Created(UserRecord {
                id: row.get("id"),
                email: email.to_string(),
                name: name.to_string(),
                password_hash: password_hash.to_string(),
            })),
            Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Conflict),
            Err(err) => Err(err).context("failed to insert user"),
        }
    }
}

/// Fetch a user by id; used to resolve session cookies.
pub(crate) async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
    let query = "SELECT id, email, name, password_hash FROM users WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup user by id")?;

    Ok(row.map(|row| UserRecord {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
        password_hash: row.get("password_hash"),
    }))
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;
    use std::time::Duration;

    #[derive(Debug)]
    struct TestDbError {
        code: Option<&'static str>,
    }

    impl fmt::Display for TestDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "test database error")
        }
    }

    impl StdError for TestDbError {}

    impl DatabaseError for TestDbError {
        fn message(&self) -> &'static str {
            "test database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            self.code.map(Cow::Borrowed)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn is_unique_violation_matches_sqlstate() {
        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("23505"),
        }));
        assert!(is_unique_violation(&err));

        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("99999"),
        }));
        assert!(!is_unique_violation(&err));

        let err = sqlx::Error::RowNotFound;
        assert!(!is_unique_violation(&err));
    }

    fn unreachable_pool() -> PgPool {
        let options = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("invalid")
            .database("invalid")
            .ssl_mode(PgSslMode::Disable);
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy_with(options)
    }

    #[tokio::test]
    async fn find_by_email_errors_without_db() {
        let pool = unreachable_pool();
        assert!(pool.find_by_email("a@x.com").await.is_err());
    }

    #[tokio::test]
    async fn insert_user_errors_without_db() {
        let pool = unreachable_pool();
        assert!(pool.insert_user("a@x.com", "hash", "Ann").await.is_err());
    }

    #[tokio::test]
    async fn find_user_by_id_errors_without_db() {
        let pool = unreachable_pool();
        assert!(find_user_by_id(&pool, Uuid::new_v4()).await.is_err());
    }
}
