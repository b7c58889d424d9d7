use validator::Validate;

use super::validate_not_blank;
use crate::models::{ForgotPasswordRequest, ResetPasswordRequest};

#[derive(Debug, Clone, Default, Validate)]
pub struct ForgotPasswordForm {
    #[validate(
        custom(function = "validate_not_blank"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn to_request(&self) -> ForgotPasswordRequest {
        ForgotPasswordRequest {
            email: self.email.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ResetPasswordForm {
    #[validate(length(min = 1, message = "Invalid or missing reset token"))]
    pub token: String,
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
}

impl ResetPasswordForm {
    pub fn to_request(&self) -> ResetPasswordRequest {
        ResetPasswordRequest {
            token: self.token.trim().to_string(),
            new_password: self.password.clone(),
        }
    }
}
