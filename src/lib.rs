//! discovery-settings: settings assembly for MQTT device discovery
//!
//! Merges a persisted settings file with CLI-supplied values and validates the
//! result before it is handed to the MQTT publishing code.

pub mod settings;

pub use settings::{
    binary_sensor_settings, device_settings, load_mqtt_settings, sensor_delete_settings,
    CliValues, SettingValue, Settings, SettingsAssembler, SettingsError,
};
