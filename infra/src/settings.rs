//! Layered configuration loading
//!
//! Sources, lowest precedence first:
//!
//! 1. Built-in defaults for the detected environment
//! 2. A TOML file: the one given, or else `config/config.<environment>.toml`
//!    when it exists
//! 3. `APPOINTMENTS__<SECTION>__<KEY>` environment variables, e.g.
//!    `APPOINTMENTS__SCHEDULE__TIMEZONE=America/New_York`
//!
//! A `.env` file in the working directory is loaded first, if present.

use ::config::{Config, Environment as EnvSource, File, FileFormat};
use std::path::Path;
use tracing::info;

use ag_shared::config::{AppConfig, Environment};

use crate::InfrastructureError;

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "APPOINTMENTS";

/// Directory searched for per-environment config files
pub const CONFIG_DIR: &str = "config";

/// Load and validate the application configuration
///
/// # Arguments
///
/// * `file` - Optional TOML file; a missing file is an error only when given
pub fn load_config(file: Option<&Path>) -> Result<AppConfig, InfrastructureError> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env();
    let defaults = AppConfig::for_environment(environment);

    let file_source = match file {
        Some(path) => File::from(path).format(FileFormat::Toml).required(true),
        None => {
            let fallback = Path::new(CONFIG_DIR).join(environment.config_file());
            File::from(fallback.as_path()).format(FileFormat::Toml).required(false)
        }
    };

    let builder = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(file_source)
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate().map_err(InfrastructureError::Config)?;

    info!(
        environment = %config.environment,
        storage = %config.storage.path.display(),
        timezone = %config.schedule.timezone,
        event = "config_loaded",
        "Configuration loaded"
    );
    Ok(config)
}
