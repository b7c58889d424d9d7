use crate::config::BackendSettings;
use crate::models::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, PasswordResetResponse,
    RefreshResponse, RegisterRequest, ResetPasswordRequest,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use service_core::error::AppError;
use service_core::observability::{TracedClientExt, TracedRequest};
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

/// Typed client for the backend's `/auth` endpoints.
///
/// Each call carries trace context and a fresh `x-request-id`. Non-2xx
/// answers become [`AppError`]s built from the backend's `{message}` body.
pub struct AuthClient {
    client: Client,
    settings: BackendSettings,
}

impl AuthClient {
    pub fn new(settings: BackendSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { client, settings })
    }

    pub fn base_url(&self) -> &str {
        self.settings.url.trim_end_matches('/')
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        let url = self.url("/auth/login");
        self.send("/auth/login", self.client.traced_post(&url).json(request))
            .await
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, AppError> {
        let url = self.url("/auth/register");
        self.send("/auth/register", self.client.traced_post(&url).json(request))
            .await
    }

    #[instrument(skip(self, request))]
    pub async fn forgot_password(
        &self,
        request: &ForgotPasswordRequest,
    ) -> Result<PasswordResetResponse, AppError> {
        let url = self.url("/auth/forgot-password");
        self.send(
            "/auth/forgot-password",
            self.client.traced_post(&url).json(request),
        )
        .await
    }

    #[instrument(skip(self, request))]
    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<MessageResponse, AppError> {
        let url = self.url("/auth/reset-password");
        self.send(
            "/auth/reset-password",
            self.client.traced_post(&url).json(request),
        )
        .await
    }

    /// Exchanges the current token for a new one.
    #[instrument(skip(self, token))]
    pub async fn refresh(&self, token: Option<&str>) -> Result<RefreshResponse, AppError> {
        let url = self.url("/auth/refresh");
        let mut request = self.client.traced_post(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        self.send("/auth/refresh", request).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        path: &str,
        request: TracedRequest,
    ) -> Result<R, AppError> {
        let request_id = Uuid::new_v4().to_string();

        let response = request
            .send_with_request_id(&request_id)
            .await
            .map_err(|e| {
                tracing::error!(%request_id, path, error = %e, "Failed to reach backend");
                if e.is_connect() || e.is_timeout() {
                    AppError::ServiceUnavailable
                } else {
                    AppError::HttpError(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<MessageResponse>(&body)
                .map(|m| m.message)
                .unwrap_or(body);
            tracing::warn!(%request_id, path, status = status.as_u16(), %message, "Backend rejected request");
            return Err(AppError::from_status(status, message));
        }

        response.json::<R>().await.map_err(|e| {
            tracing::error!(%request_id, path, error = %e, "Unexpected response body");
            AppError::BadGateway(format!("Unexpected response from {}: {}", path, e))
        })
    }
}
