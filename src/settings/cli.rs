//! CLI-supplied setting values

use clap::Args;
use std::path::PathBuf;

/// Values the user supplied on the command line.
///
/// Every overlayable setting is an `Option`: `None` means the flag was not
/// given, which the assemblers treat differently from an empty value.
#[derive(Debug, Clone, Default, Args)]
pub struct CliValues {
    /// Enable debug logging and record `debug: true` in the settings
    #[arg(short, long)]
    pub debug: bool,

    /// MQTT client name
    #[arg(long, value_name = "NAME")]
    pub client_name: Option<String>,

    /// Home Assistant device class
    #[arg(long, value_name = "CLASS")]
    pub device_class: Option<String>,

    /// Device identifier (valid characters: [a-zA-Z0-9_-])
    #[arg(long, value_name = "ID")]
    pub device_id: Option<String>,

    /// Human-readable device name
    #[arg(long, value_name = "NAME")]
    pub device_name: Option<String>,

    /// MQTT broker password
    #[arg(long, value_name = "PASSWORD", env = "MQTT_PASSWORD", hide_env_values = true)]
    pub mqtt_password: Option<String>,

    /// MQTT broker port
    #[arg(long, value_name = "PORT", env = "MQTT_PORT")]
    pub mqtt_port: Option<u16>,

    /// Discovery topic prefix
    #[arg(long, value_name = "PREFIX", env = "MQTT_PREFIX")]
    pub mqtt_prefix: Option<String>,

    /// MQTT broker hostname
    #[arg(long, value_name = "HOST", env = "MQTT_SERVER")]
    pub mqtt_server: Option<String>,

    /// MQTT broker user
    #[arg(long, value_name = "USER", env = "MQTT_USER")]
    pub mqtt_user: Option<String>,

    /// Connect to the broker over TLS
    #[arg(long)]
    pub use_tls: bool,

    /// Client certificate (used with --use-tls)
    #[arg(long, value_name = "FILE")]
    pub tls_certfile: Option<PathBuf>,

    /// Client private key (used with --use-tls)
    #[arg(long, value_name = "FILE")]
    pub tls_key: Option<PathBuf>,

    /// CA certificate bundle (used with --use-tls)
    #[arg(long, value_name = "FILE")]
    pub tls_ca_cert: Option<PathBuf>,

    /// Device model
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Material Design icon, e.g. mdi:lightbulb
    #[arg(long, value_name = "ICON")]
    pub icon: Option<String>,

    /// Unique ID for the entity
    #[arg(long, value_name = "ID")]
    pub unique_id: Option<String>,

    /// Binary sensor state
    #[arg(long, value_name = "STATE")]
    pub state: Option<String>,

    /// Metric name for the binary sensor
    #[arg(long, value_name = "NAME")]
    pub metric_name: Option<String>,
}
