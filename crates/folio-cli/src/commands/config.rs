//! Configuration commands.

use anyhow::{Context, Result};
use folio_config::FolioConfig;

use crate::ConfigFormat;

/// Show the merged configuration.
pub fn show(config: &FolioConfig, format: ConfigFormat) -> Result<()> {
    let rendered = match format {
        ConfigFormat::Toml => config
            .to_toml_string()
            .context("Failed to render configuration as TOML")?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .context("Failed to render configuration as JSON")?,
    };

    println!("{}", rendered.trim_end());
    Ok(())
}
