use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{wire, RecordId, ValidationError};

/// Login request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

/// Successful login response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

/// Registration request body
///
/// Only constructible through [`Registration::new`], which checks the
/// password confirmation before anything is sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    email: String,
    password: String,
}

impl Registration {
    pub fn new(
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, ValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::Required("email"));
        }
        if password.is_empty() {
            return Err(ValidationError::Required("password"));
        }
        if password != confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// A registered account awaiting admin approval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingUser {
    #[serde(with = "wire::count")]
    pub id: RecordId,
    pub email: String,
    #[serde(with = "wire::timestamp")]
    pub date_requested: DateTime<Utc>,
}

/// `GET /admin/users/pending` response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingUsersResponse {
    #[serde(default)]
    pub users: Vec<PendingUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_wire_name() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"token": "abc", "isAdmin": true}"#).unwrap();
        assert!(response.is_admin);

        let response: LoginResponse = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert!(!response.is_admin);
    }

    #[test]
    fn test_registration_checks_confirmation() {
        assert_eq!(
            Registration::new("a@b.c", "secret", "Secret"),
            Err(ValidationError::PasswordMismatch)
        );

        let registration = Registration::new(" a@b.c ", "secret", "secret").unwrap();
        let body = serde_json::to_value(&registration).unwrap();
        assert_eq!(body, serde_json::json!({"email": "a@b.c", "password": "secret"}));
    }

    #[test]
    fn test_pending_users_response() {
        let json = r#"{"users": [{"id": 4, "email": "new@x.io", "date_requested": "2024-06-01T09:30:00Z"}]}"#;
        let response: PendingUsersResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.users.len(), 1);
        assert_eq!(response.users[0].email, "new@x.io");
    }
}
