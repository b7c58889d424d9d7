use std::sync::Arc;

use service_core::error::AppError;
use validator::Validate;

use super::auth_client::AuthClient;
use super::session::SessionManager;
use crate::forms::{ForgotPasswordForm, LoginForm, RegistrationForm, ResetPasswordForm};
use crate::models::{PasswordResetResponse, UserProfile};
use crate::utils::identity::DerivedIdentity;

/// Result of a successful sign-up.
#[derive(Debug, Clone)]
pub struct Registration {
    pub identity: DerivedIdentity,
    pub message: String,
}

/// Login, registration and token lifecycle on top of the session.
///
/// The session is only written after a complete, successful backend
/// exchange. A failed or abandoned call leaves it exactly as it was.
pub struct AuthService {
    client: AuthClient,
    session: Arc<SessionManager>,
}

impl AuthService {
    pub fn new(client: AuthClient, session: Arc<SessionManager>) -> Self {
        Self { client, session }
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub async fn login(&self, form: &LoginForm) -> Result<UserProfile, AppError> {
        form.validate()?;

        let response = self.client.login(&form.to_request()).await?;
        if response.token.is_empty() {
            return Err(AppError::BadGateway(
                "login response did not include a token".to_string(),
            ));
        }

        let user = UserProfile::from_login(&response);
        self.session
            .establish(&response.token, &user)
            .map_err(|e| AppError::StorageError(e.into()))?;

        tracing::info!(username = %user.username, roles = ?user.roles, "User logged in");
        Ok(user)
    }

    /// Registers a new employee account. The current session is untouched.
    pub async fn register(&self, form: RegistrationForm) -> Result<Registration, AppError> {
        let (request, identity) = form.into_request()?;

        let response = self.client.register(&request).await?;

        tracing::info!(username = %identity.username, "Registration accepted");
        Ok(Registration {
            identity,
            message: response.message,
        })
    }

    /// Replaces the stored token with a fresh one, keeping the profile.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let current = self.session.token();
        let response = self.client.refresh(current.as_deref()).await?;

        if response.token.is_empty() {
            return Err(AppError::BadGateway(
                "refresh response did not include a token".to_string(),
            ));
        }

        self.session
            .set_token(&response.token)
            .map_err(|e| AppError::StorageError(e.into()))?;

        tracing::info!("Session token refreshed");
        Ok(())
    }

    pub async fn request_password_reset(
        &self,
        form: &ForgotPasswordForm,
    ) -> Result<PasswordResetResponse, AppError> {
        form.validate()?;
        self.client.forgot_password(&form.to_request()).await
    }

    pub async fn reset_password(&self, form: &ResetPasswordForm) -> Result<String, AppError> {
        form.validate()?;
        let response = self.client.reset_password(&form.to_request()).await?;
        Ok(response.message)
    }

    /// Local only: the backend keeps no server-side session to revoke.
    pub fn logout(&self) -> Result<(), AppError> {
        self.session
            .logout()
            .map_err(|e| AppError::StorageError(e.into()))
    }
}
