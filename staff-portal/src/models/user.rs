use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::auth::LoginResponse;

/// Permission granted to every logged-in user.
///
/// The backend does not send permissions yet, so each session carries only
/// this entry and `has_permission` matches it exactly like any other string.
pub const WILDCARD_PERMISSION: &str = "ALL";

/// Profile persisted next to the token, serialized as camelCase JSON.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: BTreeSet<String>,
    pub permissions: BTreeSet<String>,
}

impl UserProfile {
    pub fn from_login(response: &LoginResponse) -> Self {
        Self {
            username: response.username.clone(),
            email: response.email.clone(),
            first_name: response.first_name.clone(),
            last_name: response.last_name.clone(),
            roles: BTreeSet::from([response.role.clone()]),
            permissions: BTreeSet::from([WILDCARD_PERMISSION.to_string()]),
        }
    }

    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// A token together with the profile it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}
