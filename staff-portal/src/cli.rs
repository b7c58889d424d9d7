//! Command-line front end standing in for the portal's sign-in screens.

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use service_core::error::AppError;
use std::io::Write;
use std::path::PathBuf;

use crate::forms::{ForgotPasswordForm, LoginForm, RegistrationForm, ResetPasswordForm};
use crate::guard::{AccessDecision, AccessRequirement};
use crate::utils::identity::derive_identity;
use crate::AppState;

#[derive(Parser, Debug)]
#[command(name = "staff-portal")]
#[command(version, about = "Employee portal sign-in and access checks", long_about = None)]
pub struct Cli {
    /// Directory holding base.yaml (defaults to ./config or ./staff-portal/config)
    #[arg(long, global = true, value_name = "DIR")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an employee account; username and email are derived from the names
    Register(RegisterArgs),
    /// Show the username and email the given names would produce
    Identity {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    /// Forget the stored session
    Logout,
    /// Show whether a session is active and whose it is
    Status,
    /// Exchange the stored token for a fresh one
    Refresh,
    /// Ask for a password reset token
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with a reset token
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long, env = "PORTAL_NEW_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Check access for a role and/or permission; exits non-zero unless granted
    Check {
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        permission: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long, env = "PORTAL_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    #[arg(long)]
    pub department: String,
    #[arg(long)]
    pub position: String,
    #[arg(long)]
    pub phone_number: String,
}

impl From<RegisterArgs> for RegistrationForm {
    fn from(args: RegisterArgs) -> Self {
        RegistrationForm {
            first_name: args.first_name,
            last_name: args.last_name,
            password: args.password,
            confirm_password: args.confirm_password,
            department: args.department,
            position: args.position,
            phone_number: args.phone_number,
        }
    }
}

/// Runs one command, writing user-facing output to `out`.
///
/// Returns `Ok(false)` when the command ran but the answer is negative
/// (access denied), which callers turn into a non-zero exit.
pub async fn execute(
    command: Command,
    state: &AppState,
    out: &mut impl Write,
) -> Result<bool, AppError> {
    match command {
        Command::Login { email, password } => {
            let user = state
                .auth_service
                .login(&LoginForm::new(email, password))
                .await?;
            writeln!(out, "Signed in as {} ({})", user.display_name(), user.username)?;
        }
        Command::Register(args) => {
            let registration = state.auth_service.register(args.into()).await?;
            writeln!(out, "{}", registration.message)?;
            writeln!(out, "Your login credentials:")?;
            writeln!(out, "  Username: {}", registration.identity.username)?;
            writeln!(out, "  Email:    {}", registration.identity.email)?;
        }
        Command::Identity {
            first_name,
            last_name,
        } => match derive_identity(&first_name, &last_name) {
            Some(identity) => {
                writeln!(out, "Username: {}", identity.username)?;
                writeln!(out, "Email:    {}", identity.email)?;
            }
            None => {
                return Err(AppError::BadRequest(
                    "Cannot generate a valid login identity from these names. \
                     Please use names with letters or numbers."
                        .to_string(),
                ));
            }
        },
        Command::Logout => {
            state.auth_service.logout()?;
            writeln!(out, "Signed out")?;
        }
        Command::Status => {
            if !state.session.is_authenticated() {
                writeln!(out, "Not signed in")?;
                return Ok(false);
            }
            match state.session.current_user() {
                Some(user) => {
                    writeln!(out, "Signed in as {} ({})", user.display_name(), user.username)?;
                    writeln!(out, "  Email:       {}", user.email)?;
                    writeln!(out, "  Roles:       {}", join(&user.roles))?;
                    writeln!(out, "  Permissions: {}", join(&user.permissions))?;
                }
                None => writeln!(out, "Signed in (no profile stored)")?,
            }
            if let Some(Ok(claims)) = state.session.claims() {
                if let Some(expiry) = DateTime::<Utc>::from_timestamp(claims.exp, 0) {
                    writeln!(out, "  Expires:     {}", expiry.to_rfc3339())?;
                }
            }
        }
        Command::Refresh => {
            state.auth_service.refresh().await?;
            writeln!(out, "Session refreshed")?;
        }
        Command::ForgotPassword { email } => {
            let response = state
                .auth_service
                .request_password_reset(&ForgotPasswordForm::new(email))
                .await?;
            if let Some(message) = response.message {
                writeln!(out, "{}", message)?;
            }
            writeln!(out, "Reset token: {}", response.reset_token)?;
        }
        Command::ResetPassword {
            token,
            password,
            confirm_password,
        } => {
            let form = ResetPasswordForm {
                token,
                password,
                confirm_password,
            };
            let message = state.auth_service.reset_password(&form).await?;
            writeln!(out, "{}", message)?;
        }
        Command::Check { role, permission } => {
            let requirement = AccessRequirement { role, permission };
            let decision = requirement.evaluate(&state.session);
            match decision {
                AccessDecision::Granted => writeln!(out, "granted")?,
                AccessDecision::RedirectToLogin | AccessDecision::Unauthorized => writeln!(
                    out,
                    "denied -> {}",
                    decision.redirect_target().unwrap_or_default()
                )?,
            }
            return Ok(decision.is_granted());
        }
    }

    Ok(true)
}

/// Human-readable error text, listing field problems one per line.
pub fn render_error(error: &AppError) -> String {
    match error {
        AppError::ValidationError(errors) => {
            let mut lines: Vec<String> = errors
                .field_errors()
                .iter()
                .flat_map(|(field, list)| {
                    list.iter().map(move |e| {
                        let message = e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string());
                        format!("  {}: {}", field, message)
                    })
                })
                .collect();
            lines.sort();
            format!("Please correct the following:\n{}", lines.join("\n"))
        }
        other => other.to_string(),
    }
}

fn join(values: &std::collections::BTreeSet<String>) -> String {
    values.iter().cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{AuthClient, AuthService, MemoryStore, SessionManager};
    use crate::config::BackendSettings;
    use clap::CommandFactory;
    use std::sync::Arc;

    fn offline_state() -> AppState {
        let session = Arc::new(SessionManager::new(Arc::new(MemoryStore::new())));
        let client = AuthClient::new(BackendSettings {
            url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        AppState::new(Arc::new(AuthService::new(client, session.clone())), session)
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_flags() {
        let cli = Cli::try_parse_from(["staff-portal", "check", "--role", "ADMIN"]).unwrap();
        match cli.command {
            Command::Check { role, permission } => {
                assert_eq!(role.as_deref(), Some("ADMIN"));
                assert_eq!(permission, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_identity_preview() {
        let state = offline_state();
        let mut out = Vec::new();
        let command = Command::Identity {
            first_name: "BJ John".to_string(),
            last_name: "De La Cruz".to_string(),
        };

        assert!(execute(command, &state, &mut out).await.unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("b.delacruz@ourcompany.com"));
    }

    #[tokio::test]
    async fn test_identity_preview_rejects_symbols() {
        let state = offline_state();
        let command = Command::Identity {
            first_name: "!@#".to_string(),
            last_name: "$%^".to_string(),
        };

        let err = execute(command, &state, &mut Vec::new()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_check_without_session_is_denied() {
        let state = offline_state();
        let mut out = Vec::new();
        let command = Command::Check {
            role: None,
            permission: None,
        };

        assert!(!execute(command, &state, &mut out).await.unwrap());
        assert_eq!(String::from_utf8(out).unwrap().trim(), "denied -> /login");
    }

    #[tokio::test]
    async fn test_invalid_registration_never_reaches_backend() {
        let state = offline_state();
        let command = Command::Register(RegisterArgs {
            first_name: "李".to_string(),
            last_name: "Smith".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            department: "SALES".to_string(),
            position: "Rep".to_string(),
            phone_number: "555-0100".to_string(),
        });

        let err = execute(command, &state, &mut Vec::new()).await.unwrap_err();
        let rendered = render_error(&err);
        assert!(rendered.contains("first_name: Must contain at least one letter or number"));
    }
}
