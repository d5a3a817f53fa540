//! Settings output rendering

use anyhow::Result;
use clap::ValueEnum;

use discovery_settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

pub fn render(settings: &Settings, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(settings)?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(settings)?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}
