//! Client-side validation run before anything is sent to the backend.

pub mod login;
pub mod password_reset;
pub mod registration;

pub use login::LoginForm;
pub use password_reset::{ForgotPasswordForm, ResetPasswordForm};
pub use registration::{RegistrationForm, DEPARTMENTS};

use std::borrow::Cow;
use validator::ValidationError;

use crate::utils::identity::clean_for_handle;

fn message_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Rejects whitespace-only input that `length(min = 1)` lets through.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(message_error("required", "This field is required"));
    }
    Ok(())
}

/// A name must keep at least one handle character after cleaning.
pub(crate) fn validate_handle_characters(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if clean_for_handle(value).is_empty() {
        return Err(message_error(
            "no_handle_characters",
            "Must contain at least one letter or number",
        ));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn has_error(errors: &validator::ValidationErrors, field: &str, code: &str) -> bool {
    errors
        .field_errors()
        .get(field)
        .is_some_and(|list| list.iter().any(|e| e.code == code))
}
