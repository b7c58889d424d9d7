pub mod cli;
pub mod config;
pub mod forms;
pub mod guard;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use services::{AuthService, SessionManager};
use std::sync::Arc;

/// The one session manager and the auth service built around it, shared by
/// every route guard and action handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub session: Arc<SessionManager>,
}

impl AppState {
    pub fn new(auth_service: Arc<AuthService>, session: Arc<SessionManager>) -> Self {
        Self {
            auth_service,
            session,
        }
    }
}
