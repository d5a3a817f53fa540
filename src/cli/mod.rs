//! Command-line interface for discovery-settings
//!
//! One subcommand per discovery entity type; each assembles and prints settings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use discovery_settings::{CliValues, SettingsAssembler};

mod render;

use render::OutputFormat;

/// Assemble and validate MQTT device-discovery settings
#[derive(Parser)]
#[command(name = "discovery-settings")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (YAML; `.toml` files are read as TOML)
    #[arg(short, long, value_name = "FILE", global = true)]
    settings_file: Option<PathBuf>,

    /// Output format for the assembled settings
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml, global = true)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Settings for a generic MQTT entity
    Mqtt(CliValues),

    /// Settings for removing a sensor (empty values keep the file's value)
    SensorDelete(CliValues),

    /// Settings for a binary sensor
    BinarySensor(CliValues),

    /// Settings for a device (requires --unique-id)
    Device(CliValues),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Mqtt(_) => "mqtt",
            Commands::SensorDelete(_) => "sensor-delete",
            Commands::BinarySensor(_) => "binary-sensor",
            Commands::Device(_) => "device",
        }
    }

    fn values(&self) -> &CliValues {
        match self {
            Commands::Mqtt(values)
            | Commands::SensorDelete(values)
            | Commands::BinarySensor(values)
            | Commands::Device(values) => values,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let values = cli.command.values();

    // RUST_LOG in the environment always takes precedence; --debug falls back to DEBUG.
    let filter = if values.debug {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let command = cli.command.name();
    let assembler = SettingsAssembler::new(tracing::debug_span!("settings", command));
    let path = cli.settings_file.as_deref();

    let settings = match &cli.command {
        Commands::Mqtt(values) => assembler.load_mqtt_settings(path, values),
        Commands::SensorDelete(values) => assembler.sensor_delete_settings(path, values),
        Commands::BinarySensor(values) => assembler.binary_sensor_settings(path, values),
        Commands::Device(values) => assembler.device_settings(path, values),
    }
    .with_context(|| format!("Failed to assemble {} settings", command))?;

    print!("{}", render::render(&settings, cli.format)?);
    Ok(())
}
