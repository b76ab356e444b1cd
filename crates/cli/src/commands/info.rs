//! `evtjson info`: Show plugin metadata and the effective configuration.

use evtjson_config::PluginConfig;

pub fn run(config: &PluginConfig) -> Result<(), Box<dyn std::error::Error>> {
    let info = evtjson_plugin::info();

    println!("evtjson plugin");
    println!("==============");
    println!("  Name:         {}", info.name);
    println!("  Version:      {}", info.version);
    println!("  API version:  {}", info.required_api_version);
    println!("  Description:  {}", info.description);
    println!("  Contact:      {}", info.contact);
    println!();
    println!("  Fields:");
    for field in evtjson_core::descriptors() {
        let arg = if field.arg_required { "[arg]" } else { "" };
        println!("    {:<12}{:<6} {}", field.name, arg, field.desc);
    }
    println!();
    println!("  Configuration:");
    for line in toml::to_string_pretty(config)?.lines() {
        println!("    {line}");
    }

    Ok(())
}
