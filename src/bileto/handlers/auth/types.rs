//! Request and response shapes for the auth boundary.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The only externally observable response shape for auth and ticket
/// operations.
#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ResponseResult {
    pub success: bool,
    pub message: String,
}

impl ResponseResult {
    pub(crate) fn ok(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }

    pub(crate) fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
        }
    }
}

// Fields default to empty so absent keys land in the same validation
// branch as empty strings, like the original form submissions.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Identity behind a valid session cookie.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_result_serializes_envelope() -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(ResponseResult::ok("User registered successfully"))?;
        assert_eq!(
            value,
            serde_json::json!({ "success": true, "message": "User registered successfully" })
        );

        let value = serde_json::to_value(ResponseResult::failed("User already exists"))?;
        assert_eq!(
            value,
            serde_json::json!({ "success": false, "message": "User already exists" })
        );
        Ok(())
    }

    #[test]
    fn register_request_defaults_missing_fields() -> Result<(), serde_json::Error> {
        let request: RegisterRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#)?;
        assert_eq!(request.email, "a@x.com");
        assert!(request.password.is_empty());
        assert!(request.name.is_empty());
        Ok(())
    }

    #[test]
    fn login_request_defaults_missing_fields() -> Result<(), serde_json::Error> {
        let request: LoginRequest = serde_json::from_str("{}")?;
        assert!(request.email.is_empty());
        assert!(request.password.is_empty());
        Ok(())
    }
}
