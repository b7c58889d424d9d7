pub mod auth;
pub mod user;

pub use auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, PasswordResetResponse,
    RefreshResponse, RegisterRequest, ResetPasswordRequest, EMPLOYEE_USER_TYPE,
};
pub use user::{Session, UserProfile, WILDCARD_PERMISSION};
