//! Client-side form validation for login and signup.
//!
//! Validation runs before any request is sent. Each rule yields a
//! [`FieldError`] naming the offending field so pages can show the message
//! next to the input.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::api::{Credentials, IdentifierKind, Registration};
use crate::error::ErrorKind;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Identifier,
    Username,
    Email,
    Password,
    ConfirmPassword,
    FullName,
}

impl Field {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Username => "username",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::FullName => "fullName",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {message}", field.name())]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// All field errors found in one submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} invalid field(s)", errors.len())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    /// First message reported for `field`.
    #[must_use]
    pub fn message_for(&self, field: Field) -> Option<&'static str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

fn collect(errors: Vec<FieldError>) -> Result<(), ValidationError> {
    if errors.is_empty() { Ok(()) } else { Err(ValidationError { errors }) }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Loose `local@domain.tld` shape check; the API is the authority.
#[must_use]
pub fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub kind: IdentifierKind,
    pub identifier: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns every failing rule: identifier required, password of at least
    /// [`MIN_PASSWORD_LEN`] characters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        if self.identifier.trim().is_empty() {
            errors.push(FieldError { field: Field::Identifier, message: "Please enter a username or email." });
        }
        if char_len(&self.password) < MIN_PASSWORD_LEN {
            errors.push(FieldError { field: Field::Password, message: "Password must be at least 6 characters." });
        }
        collect(errors)
    }

    /// Validated credentials with the identifier trimmed.
    ///
    /// # Errors
    ///
    /// See [`LoginForm::validate`].
    pub fn into_credentials(self) -> Result<Credentials, ValidationError> {
        self.validate()?;
        Ok(Credentials { kind: self.kind, identifier: self.identifier.trim().to_owned(), password: self.password })
    }
}

// =============================================================================
// SIGNUP
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
}

impl SignupForm {
    /// # Errors
    ///
    /// Returns every failing rule, in field order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        if char_len(self.username.trim()) < MIN_NAME_LEN {
            errors.push(FieldError { field: Field::Username, message: "Username must be at least 2 characters." });
        }
        if !looks_like_email(self.email.trim()) {
            errors.push(FieldError { field: Field::Email, message: "Please enter a valid email address." });
        }
        if char_len(&self.password) < MIN_PASSWORD_LEN {
            errors.push(FieldError { field: Field::Password, message: "Password must be at least 6 characters." });
        }
        if char_len(&self.confirm_password) < MIN_PASSWORD_LEN {
            errors.push(FieldError { field: Field::ConfirmPassword, message: "Please confirm your password." });
        } else if self.password != self.confirm_password {
            errors.push(FieldError { field: Field::ConfirmPassword, message: "Passwords do not match." });
        }
        if char_len(self.full_name.trim()) < MIN_NAME_LEN {
            errors.push(FieldError { field: Field::FullName, message: "Full name must be at least 2 characters." });
        }
        collect(errors)
    }

    /// # Errors
    ///
    /// See [`SignupForm::validate`].
    pub fn into_registration(self) -> Result<Registration, ValidationError> {
        self.validate()?;
        Ok(Registration {
            username: self.username.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password,
            full_name: self.full_name.trim().to_owned(),
        })
    }
}
