use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn require(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<(), ApiError> {
    require(email, "email")?;
    if !is_valid_email(email) {
        return Err(ApiError::Validation("email must be a valid address".into()));
    }
    Ok(())
}

/// Request body for POST /auth/signup.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

impl SignUpRequest {
    /// Field checks, run before the workflow touches the store.
    pub fn validate(&self) -> Result<(), ApiError> {
        require_email(&self.email)?;
        require(&self.password, "password")?;
        require(&self.username, "username")
    }
}

/// Request body for POST /auth/signin.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_email(&self.email)?;
        require(&self.password, "password")
    }
}

/// 201 body for sign-up. No token is issued here; the client signs in after.
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub message: &'static str,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

/// 200 body for sign-in.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_emails() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email("no-tld@host"));
    }

    #[test]
    fn signup_validation_flags_each_missing_field() {
        let dto = SignUpRequest {
            email: "".into(),
            password: "p1".into(),
            username: "alice".into(),
        };
        assert!(dto.validate().is_err());

        let dto = SignUpRequest {
            email: "a@x.com".into(),
            password: "  ".into(),
            username: "alice".into(),
        };
        assert!(dto.validate().is_err());

        let dto = SignUpRequest {
            email: "a@x.com".into(),
            password: "p1".into(),
            username: "".into(),
        };
        assert!(dto.validate().is_err());

        let dto = SignUpRequest {
            email: "a@x.com".into(),
            password: "p1".into(),
            username: "alice".into(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn signin_validation_requires_valid_email() {
        let dto = SignInRequest {
            email: "not-an-email".into(),
            password: "p1".into(),
        };
        assert!(dto.validate().is_err());

        let dto = SignInRequest {
            email: "a@x.com".into(),
            password: "p1".into(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn signup_response_uses_camel_case_user_id() {
        let response = SignUpResponse {
            message: "User registered successfully!",
            user_id: Uuid::new_v4(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"userId\""));
        assert!(json.contains("User registered successfully!"));
    }
}
