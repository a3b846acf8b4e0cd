//! Configuration loading for the API binary.
//!
//! Sources are layered from lowest to highest priority:
//! 1. `AppConfig::from_env()` (built-in defaults plus the flat variables
//!    such as `DATABASE_URL` and `JWT_SECRET`)
//! 2. an optional `config/<environment>.toml` file
//! 3. `APP__SECTION__KEY` variables, e.g. `APP__SERVER__PORT=9000`

use config::{Config, ConfigError, Environment, File};

use am_shared::AppConfig;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let base = AppConfig::from_env();
    let file = base.environment.config_file();

    let settings = Config::builder()
        .add_source(Config::try_from(&base)?)
        .add_source(File::with_name(file).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins"),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    tracing::debug!(environment = %config.environment, file, "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_layering() {
        let config = load_config().unwrap();
        assert!(config.server.port > 0);
        assert_eq!(config.otp.code_length, AppConfig::default().otp.code_length);
    }
}
