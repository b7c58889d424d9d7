use std::sync::Arc;

use super::session_store::{SessionStore, StoreError};
use crate::models::{Session, UserProfile};
use crate::utils::jwt::{decode_claims, DecodeError, TokenClaims};

/// Storage key of the raw session token.
pub const TOKEN_KEY: &str = "authToken";

/// Storage key of the JSON-serialized [`UserProfile`].
pub const USER_KEY: &str = "user";

/// Owns the persisted session and answers authentication and role queries.
///
/// Reads fail closed: a storage error, a malformed profile or an undecodable
/// token all look exactly like "no session". Writes report storage errors
/// and never leave only half a session behind.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Stores a fresh token and profile together.
    ///
    /// On a failed write both keys are put back to what they held before,
    /// so a previous session survives a failed re-login.
    pub fn establish(&self, token: &str, user: &UserProfile) -> Result<(), StoreError> {
        let user_json = serde_json::to_string(user)?;
        let previous = [
            (TOKEN_KEY, self.store.get(TOKEN_KEY)?),
            (USER_KEY, self.store.get(USER_KEY)?),
        ];

        if let Err(e) = self
            .store
            .set_all(&[(TOKEN_KEY, token), (USER_KEY, user_json.as_str())])
        {
            tracing::error!(error = %e, "Failed to persist session, rolling back");
            self.restore(&previous);
            return Err(e);
        }

        tracing::info!(username = %user.username, "Session established");
        Ok(())
    }

    /// Replaces the token only; the stored profile is untouched.
    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(TOKEN_KEY, token)
    }

    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        let raw = self.read(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "Stored user profile is malformed");
                None
            }
        }
    }

    /// Both halves of the session, or nothing.
    pub fn session(&self) -> Option<Session> {
        let token = self.token()?;
        let user = self.current_user()?;
        Some(Session { token, user })
    }

    /// Claims of the stored token, if one is stored.
    pub fn claims(&self) -> Option<Result<TokenClaims, DecodeError>> {
        self.token().map(|token| decode_claims(&token))
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(chrono::Utc::now().timestamp())
    }

    /// Whether the stored token is decodable and unexpired at `now` (epoch
    /// seconds). A stored token that fails either check ends the session.
    pub fn is_authenticated_at(&self, now: i64) -> bool {
        let Some(token) = self.token() else {
            return false;
        };

        match decode_claims(&token) {
            Ok(claims) if claims.is_live_at(now) => true,
            Ok(claims) => {
                tracing::info!(exp = claims.exp, now, "Session token expired");
                self.invalidate();
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored session token is unreadable");
                self.invalidate();
                false
            }
        }
    }

    /// Exact-match role check against the stored profile.
    pub fn has_role(&self, role: &str) -> bool {
        self.current_user()
            .is_some_and(|user| user.roles.contains(role))
    }

    /// Exact-match permission check against the stored profile.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.current_user()
            .is_some_and(|user| user.permissions.contains(permission))
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.clear_all(&[TOKEN_KEY, USER_KEY])?;
        tracing::info!("Session cleared");
        Ok(())
    }

    fn restore(&self, previous: &[(&str, Option<String>)]) {
        for (key, value) in previous {
            let result = match value {
                Some(value) => self.store.set(key, value),
                None => self.store.clear(key),
            };
            if let Err(e) = result {
                tracing::error!(key, error = %e, "Session rollback failed");
            }
        }
    }

    fn invalidate(&self) {
        if let Err(e) = self.store.clear_all(&[TOKEN_KEY, USER_KEY]) {
            tracing::warn!(error = %e, "Failed to clear stale session");
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Session storage read failed");
                None
            }
        }
    }
}
