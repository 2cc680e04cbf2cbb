//! User records and sign-up input

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::validation::require_text;
use super::ValidationError;

/// Maximum length for name, email and password (VARCHAR(255) columns)
const MAX_USER_FIELD_LEN: usize = 255;

/// One `@`, no whitespace, and a dot somewhere in the domain part.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("invalid email regex"));

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Validated input for creating a user
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "NewUserFields")]
pub struct NewUser {
    name: String,
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct NewUserFields {
    name: String,
    email: String,
    password: String,
}

impl TryFrom<NewUserFields> for NewUser {
    type Error = ValidationError;

    fn try_from(f: NewUserFields) -> Result<Self, Self::Error> {
        Self::new(f.name, f.email, f.password)
    }
}

impl NewUser {
    /// Create sign-up input, validating every field.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::models::NewUser;
    ///
    /// assert!(NewUser::new("Ada", "ada@example.com", "secret").is_ok());
    /// assert!(NewUser::new("Ada", "not-an-email", "secret").is_err());
    /// ```
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let email = email.into();
        let password = password.into();

        require_text("name", &name, MAX_USER_FIELD_LEN)?;
        require_text("email", &email, MAX_USER_FIELD_LEN)?;
        if !EMAIL_RE.is_match(&email) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@domain.tld",
            });
        }
        if password.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }
        if password.chars().count() > MAX_USER_FIELD_LEN {
            return Err(ValidationError::TooLong {
                field: "password",
                max: MAX_USER_FIELD_LEN,
            });
        }

        Ok(Self {
            name,
            email,
            password,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}
