pub mod extract;
pub mod fields;
pub mod info;

use std::path::Path;

use evtjson_config::{ConfigError, PluginConfig};

/// Load the config file if one was given, then apply env overrides.
pub fn load_config(path: Option<&Path>) -> Result<PluginConfig, ConfigError> {
    let config = match path {
        Some(path) => PluginConfig::load_from(path)?,
        None => PluginConfig::default(),
    };
    Ok(config.with_env_overrides())
}
