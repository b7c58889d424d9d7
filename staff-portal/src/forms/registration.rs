use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use super::{validate_handle_characters, validate_not_blank};
use crate::models::{RegisterRequest, EMPLOYEE_USER_TYPE};
use crate::utils::identity::{derive_identity, DerivedIdentity};

/// Departments offered on the sign-up screen.
pub const DEPARTMENTS: [&str; 6] = [
    "ENGINEERING",
    "MARKETING",
    "SALES",
    "HR",
    "FINANCE",
    "OPERATIONS",
];

fn validate_department(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if !DEPARTMENTS.contains(&value) {
        return Err(ValidationError::new("unknown_department")
            .with_message(Cow::Borrowed("Please choose one of the listed departments")));
    }
    Ok(())
}

/// Self-service sign-up. Username and email are never typed; they are
/// derived from the names.
#[derive(Debug, Clone, Default, Validate)]
pub struct RegistrationForm {
    #[validate(custom(function = "validate_handle_characters"))]
    pub first_name: String,
    #[validate(custom(function = "validate_handle_characters"))]
    pub last_name: String,
    #[validate(
        custom(function = "validate_not_blank"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
    #[validate(
        length(min = 1, message = "Please confirm your password"),
        must_match(other = "password", message = "Passwords do not match")
    )]
    pub confirm_password: String,
    #[validate(custom(function = "validate_department"))]
    pub department: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub position: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub phone_number: String,
}

impl RegistrationForm {
    /// Live preview shown while the names are being typed.
    pub fn preview_identity(&self) -> Option<DerivedIdentity> {
        derive_identity(&self.first_name, &self.last_name)
    }

    /// Validates the form and builds the backend request around the
    /// derived identity.
    pub fn into_request(self) -> Result<(RegisterRequest, DerivedIdentity), ValidationErrors> {
        self.validate()?;

        let identity = self.preview_identity().ok_or_else(|| {
            let error = ValidationError::new("identity_unavailable").with_message(Cow::Borrowed(
                "Names must contain letters or numbers for email generation",
            ));
            let mut errors = ValidationErrors::new();
            errors.add("first_name", error.clone());
            errors.add("last_name", error);
            errors
        })?;

        let request = RegisterRequest {
            first_name: self.first_name,
            last_name: self.last_name,
            email: identity.email.clone(),
            username: identity.username.clone(),
            password: self.password,
            phone_number: self.phone_number,
            department: self.department,
            user_type: EMPLOYEE_USER_TYPE.to_string(),
        };

        Ok((request, identity))
    }
}
