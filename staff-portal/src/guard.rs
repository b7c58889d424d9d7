//! Route and action gating on top of the session.

use crate::services::session::SessionManager;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// What a protected route or action demands of the current user.
///
/// Role and permission are independent conditions; both must hold when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessRequirement {
    pub role: Option<String>,
    pub permission: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    RedirectToLogin,
    Unauthorized,
}

impl AccessDecision {
    pub fn is_granted(self) -> bool {
        self == AccessDecision::Granted
    }

    /// Where the UI should send the user instead, if anywhere.
    pub fn redirect_target(self) -> Option<&'static str> {
        match self {
            AccessDecision::Granted => None,
            AccessDecision::RedirectToLogin => Some(LOGIN_PATH),
            AccessDecision::Unauthorized => Some(UNAUTHORIZED_PATH),
        }
    }
}

impl AccessRequirement {
    /// Any logged-in user.
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn evaluate(&self, session: &SessionManager) -> AccessDecision {
        if !session.is_authenticated() {
            return AccessDecision::RedirectToLogin;
        }
        self.evaluate_roles(session)
    }

    /// Same as [`evaluate`](Self::evaluate) with an explicit clock.
    pub fn evaluate_at(&self, session: &SessionManager, now: i64) -> AccessDecision {
        if !session.is_authenticated_at(now) {
            return AccessDecision::RedirectToLogin;
        }
        self.evaluate_roles(session)
    }

    fn evaluate_roles(&self, session: &SessionManager) -> AccessDecision {
        if let Some(role) = self.role.as_deref() {
            if !session.has_role(role) {
                tracing::debug!(role, "Access denied: missing role");
                return AccessDecision::Unauthorized;
            }
        }

        if let Some(permission) = self.permission.as_deref() {
            if !session.has_permission(permission) {
                tracing::debug!(permission, "Access denied: missing permission");
                return AccessDecision::Unauthorized;
            }
        }

        AccessDecision::Granted
    }
}
