//! Static plugin metadata reported to the host.

/// Plugin API version this plugin was written against.
pub const REQUIRED_API_VERSION: &str = "1.0.0";

/// Host plugin type code for source plugins.
pub const TYPE_SOURCE_PLUGIN: u32 = 1;
/// Host plugin type code for field-extractor plugins.
pub const TYPE_EXTRACTOR_PLUGIN: u32 = 2;

pub const NAME: &str = "json";
pub const DESCRIPTION: &str = "implements extracting arbitrary fields from inputs formatted as JSON";
pub const CONTACT: &str = "github.com/evtjson/evtjson";
pub const VERSION: &str = "0.0.1";

/// Return codes used across the host boundary.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;

/// Everything the host asks about the plugin besides its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub contact: &'static str,
    pub required_api_version: &'static str,
    pub plugin_type: u32,
}

/// Metadata for this plugin.
pub const fn info() -> PluginInfo {
    PluginInfo {
        name: NAME,
        version: VERSION,
        description: DESCRIPTION,
        contact: CONTACT,
        required_api_version: REQUIRED_API_VERSION,
        plugin_type: TYPE_EXTRACTOR_PLUGIN,
    }
}
