use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Prefix for environment overrides, e.g. `APP_BACKEND__URL`.
pub const ENV_PREFIX: &str = "APP";

/// Loads settings from `<dir>/base.yaml`, an optional `<dir>/local.yaml`,
/// then `APP_`-prefixed environment variables (`__` separates nesting).
pub fn load_layered<T: DeserializeOwned>(configuration_directory: &Path) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let settings = Cfg::builder()
        .add_source(File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(File::from(configuration_directory.join("local.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
