use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Environment variable prefix shared by every service.
pub const ENV_PREFIX: &str = "APP";

/// Load layered settings: `<dir>/base.yaml`, then an optional
/// `<dir>/local.yaml`, then `APP_`-prefixed environment variables with `__`
/// as the nesting separator (e.g. `APP_SERVER__PORT=9000`).
pub fn load_settings<T: DeserializeOwned>(configuration_directory: &Path) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let config = Cfg::builder()
        .add_source(File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(File::from(configuration_directory.join("local.yaml")).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}
