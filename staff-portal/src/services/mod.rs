pub mod auth;
pub mod auth_client;
pub mod session;
pub mod session_store;

pub use auth::{AuthService, Registration};
pub use auth_client::AuthClient;
pub use session::{SessionManager, TOKEN_KEY, USER_KEY};
pub use session_store::{FileStore, MemoryStore, SessionStore, StoreError};
