use service_core::error::AppError;
use std::sync::Arc;

use crate::config::{Settings, StorageBackend};
use crate::services::{
    AuthClient, AuthService, FileStore, MemoryStore, SessionManager, SessionStore,
};
use crate::AppState;

/// Wires the store, session manager and backend client from settings.
pub fn build_state(settings: &Settings) -> Result<AppState, AppError> {
    let store: Arc<dyn SessionStore> = match settings.storage.backend {
        StorageBackend::File => {
            tracing::debug!(path = %settings.storage.path.display(), "Using file session store");
            Arc::new(FileStore::new(&settings.storage.path))
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };

    let session = Arc::new(SessionManager::new(store));
    let client = AuthClient::new(settings.backend.clone())?;
    let auth_service = Arc::new(AuthService::new(client, session.clone()));

    Ok(AppState::new(auth_service, session))
}
