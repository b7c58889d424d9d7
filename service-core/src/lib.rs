//! service-core: shared infrastructure for the staff portal crates.
pub mod config;
pub mod error;
pub mod observability;

pub use reqwest;
pub use serde;
pub use serde_json;
pub use tracing;
pub use validator;
