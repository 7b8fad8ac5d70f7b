//! Account registration input and its validation rules.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Registration form as submitted by a client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Registration {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    #[validate(length(
        min = MIN_PASSWORD_LENGTH,
        message = "Password must be at least 8 characters long"
    ))]
    pub password: String,
}

impl Registration {
    /// Trim the name, normalize the email, then validate.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let normalized = Self {
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
        };
        normalized
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        Ok(normalized)
    }
}

/// Emails are stored and looked up trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
