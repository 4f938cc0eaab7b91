use crate::bileto;
use crate::cli::{actions::Action, globals::GlobalArgs};
use anyhow::{anyhow, Result};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    match action {
        Action::Server { port, dsn } => {
            let parsed = Url::parse(&dsn)?;

            if !matches!(parsed.scheme(), "postgres" | "postgresql") {
                return Err(anyhow!("unsupported DSN scheme: {}", parsed.scheme()));
            }

            bileto::new(port, dsn, globals).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn globals() -> GlobalArgs {
        GlobalArgs::new(
            "http://localhost:3000".to_string(),
            SecretString::from("a2V5".to_string()),
            60,
        )
    }

    #[tokio::test]
    async fn handle_rejects_invalid_dsn() {
        let action = Action::Server {
            port: 0,
            dsn: "not a dsn".to_string(),
        };
        assert!(handle(action, &globals()).await.is_err());
    }

    #[tokio::test]
    async fn handle_rejects_non_postgres_scheme() {
        let action = Action::Server {
            port: 0,
            dsn: "mysql://user@localhost:3306/bileto".to_string(),
        };
        let err = handle(action, &globals()).await.unwrap_err();
        assert!(err.to_string().contains("unsupported DSN scheme"));
    }
}
