//! Per-session plugin state behind the opaque host handle.

use evtjson_config::{ConfigError, PluginConfig};
use evtjson_core::Extractor;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// One host session: configuration plus the extraction context.
#[derive(Debug)]
pub struct PluginState {
    config: PluginConfig,
    extractor: Extractor,
}

impl PluginState {
    pub fn new(config: PluginConfig) -> Self {
        let extractor = Extractor::new().with_max_payload(config.max_payload_bytes);
        Self { config, extractor }
    }

    /// Build a session from the host's init string, with env overrides applied.
    pub fn from_init_string(raw: &str) -> Result<Self, ConfigError> {
        let config = PluginConfig::from_init_string(raw)?.with_env_overrides();
        init_logging(&config);
        info!("[{}] plugin_init", crate::info::NAME);
        debug!(config = raw, "config string");
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn extract_str(&mut self, evtnum: u64, field: &str, arg: Option<&str>, data: &[u8]) -> Option<String> {
        self.extractor.extract_str(evtnum, field, arg, data).into_option()
    }

    pub fn extract_u64(&mut self, evtnum: u64, field: &str, arg: Option<&str>, data: &[u8]) -> Option<u64> {
        self.extractor.extract_u64(evtnum, field, arg, data)
    }

    pub fn last_error(&self) -> String {
        self.extractor.last_error()
    }
}

/// Install a stderr subscriber when the config asks for output.
///
/// Uses `try_init`, so a second plugin load in the same process keeps the
/// first subscriber.
pub fn init_logging(config: &PluginConfig) {
    if !config.verbose {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
