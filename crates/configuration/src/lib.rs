use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_logging;
pub use settings::{
    CliOverrides, DatabaseSettings, IngestSettings, LoggingSettings, Settings, SummarySettings,
};

/// Prefix of the environment variables that override file values,
/// e.g. `INVENTORY__DATABASE__URL`.
pub const ENV_PREFIX: &str = "INVENTORY";

/// Loads the application configuration.
///
/// Values are layered, lowest precedence first: built-in defaults, the TOML
/// file at `path` (optional; a missing file is not an error), then
/// `INVENTORY__*` environment variables.
///
/// The result is not validated: callers apply their CLI overrides first and
/// then call [`Settings::validate`].
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;

    Ok(settings)
}
