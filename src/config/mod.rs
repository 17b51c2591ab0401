use self::settings::Settings;
use crate::error::ConfigError;
use std::fs;

pub mod creator;
pub mod settings;

pub fn load_config(path: &str) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: Settings = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
