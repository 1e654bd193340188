use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod hyperparameters;
pub mod logging;
pub mod settings;
#[cfg(feature = "clap")]
pub mod cli;

// Re-export the core types to provide a clean public API.
#[cfg(feature = "clap")]
pub use cli::ConfigArgs;
pub use hyperparameters::{HyperParameter, HyperParameters, ParamKind};
pub use logging::init_logging;
pub use settings::{AstroMaParams, BaZiParams, Config, GeomancyParams, IChingParams, LoggingConfig, Strategies};

/// Prefix of environment variables that override file values,
/// e.g. `GEOMANCER__STRATEGIES__GEOMANCY__RISK=3`.
pub const ENV_PREFIX: &str = "GEOMANCER";

/// Loads `config.toml` from the working directory, overlaid by `GEOMANCER__…` variables.
///
/// A missing file is not an error; every section falls back to its defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    load(Path::new("config.toml"), false)
}

/// Loads the configuration from an explicit path, which must exist.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    load(path.as_ref(), true)
}

fn load(path: &Path, required: bool) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(required))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}
