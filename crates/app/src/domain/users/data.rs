//! User Data

use garde::Validate;

use crate::domain::users::records::{Gender, Role};

/// New User Data
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewUser {
    #[garde(email, length(chars, max = 55))]
    pub email: String,

    #[garde(length(chars, min = 8, max = 30))]
    pub password: String,

    #[garde(length(chars, min = 1, max = 30))]
    pub first_name: String,

    #[garde(length(chars, min = 1, max = 30))]
    pub last_name: String,

    #[garde(skip)]
    pub role: Role,

    #[garde(skip)]
    pub gender: Option<Gender>,

    #[garde(length(chars, max = 55))]
    pub location: Option<String>,
}

impl NewUser {
    /// Trim free-text fields and lower-case the email.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            location: self.location.map(|location| location.trim().to_string()),
            ..self
        }
    }
}

/// Login Credentials
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct Credentials {
    #[garde(email, length(chars, max = 55))]
    pub email: String,

    #[garde(length(min = 1))]
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            ..self
        }
    }
}

/// Profile Update Data
///
/// Email and role are fixed once registered.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProfileUpdate {
    #[garde(length(chars, min = 8, max = 30))]
    pub password: Option<String>,

    #[garde(length(chars, min = 1, max = 30))]
    pub first_name: String,

    #[garde(length(chars, min = 1, max = 30))]
    pub last_name: String,

    #[garde(skip)]
    pub gender: Option<Gender>,

    #[garde(length(chars, max = 55))]
    pub location: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            location: self.location.map(|location| location.trim().to_string()),
            ..self
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
