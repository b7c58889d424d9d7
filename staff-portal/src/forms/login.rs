use validator::Validate;

use super::validate_not_blank;
use crate::models::LoginRequest;

#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(
        custom(function = "validate_not_blank"),
        email(message = "Please enter a valid email address")
    )]
    pub email: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// The backend authenticates by username; the email doubles as one.
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::has_error;

    #[test]
    fn test_valid_login() {
        let form = LoginForm::new("j.smith@ourcompany.com", "secret1");
        assert!(form.validate().is_ok());

        let request = form.to_request();
        assert_eq!(request.username, "j.smith@ourcompany.com");
        assert_eq!(request.password, "secret1");
    }

    #[test]
    fn test_blank_fields() {
        let errors = LoginForm::new("", " ").validate().unwrap_err();
        assert!(has_error(&errors, "email", "required"));
        assert!(has_error(&errors, "password", "required"));
    }

    #[test]
    fn test_malformed_email() {
        let errors = LoginForm::new("j.smith", "secret1").validate().unwrap_err();
        assert!(has_error(&errors, "email", "email"));
        assert!(!errors.field_errors().contains_key("password"));
    }
}
