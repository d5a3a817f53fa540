//! Settings assemblers for each discovery entity type
//!
//! Every assembler starts from the settings file and overlays the CLI values.
//! The base loader lets the CLI win unconditionally; the sensor-delete loader
//! only lets non-empty CLI values through so file values survive.

use super::{read_settings_file, CliValues, SettingValue, Settings, SettingsError};
use std::path::Path;
use tracing::Span;

/// Checked in this order; the first absent key is reported.
const MQTT_REQUIRED: &[&str] = &[
    "client_name",
    "device_class",
    "device_id",
    "device_name",
    "mqtt_port",
    "mqtt_prefix",
    "mqtt_user",
    "mqtt_password",
];

const SENSOR_DELETE_REQUIRED: &[&str] = &[
    "client_name",
    "device_id",
    "device_name",
    "mqtt_port",
    "mqtt_prefix",
    "mqtt_user",
    "mqtt_password",
];

const TLS_KEYS: &[&str] = &["certfile", "keyfile", "ca_certs"];

/// Builds validated [`Settings`] inside the span it was created with.
#[derive(Debug, Clone)]
pub struct SettingsAssembler {
    span: Span,
}

impl Default for SettingsAssembler {
    fn default() -> Self {
        Self::new(tracing::debug_span!("settings"))
    }
}

impl SettingsAssembler {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// Base loader: file settings, then every CLI value on top.
    pub fn load_mqtt_settings(
        &self,
        path: Option<&Path>,
        cli: &CliValues,
    ) -> Result<Settings, SettingsError> {
        self.span.in_scope(|| -> Result<Settings, SettingsError> {
            let mut settings = read_settings_file(path)?;

            settings.insert("debug", cli.debug);

            settings.set_or_remove("client_name", cli.client_name.as_ref());
            settings.set_or_remove("device_class", cli.device_class.as_ref());
            settings.set_or_remove("device_id", cli.device_id.as_ref());
            settings.set_or_remove("device_name", cli.device_name.as_ref());
            settings.set_or_remove("mqtt_password", cli.mqtt_password.as_ref());
            settings.set_or_remove("mqtt_port", cli.mqtt_port);
            settings.set_or_remove("mqtt_prefix", cli.mqtt_prefix.as_ref());
            settings.set_or_remove("mqtt_server", cli.mqtt_server.as_ref());
            settings.set_or_remove("mqtt_user", cli.mqtt_user.as_ref());

            // Optional: only overlay what was given
            if let Some(model) = &cli.model {
                settings.insert("model", model);
            }
            if let Some(icon) = &cli.icon {
                settings.insert("icon", icon);
            }
            if let Some(unique_id) = &cli.unique_id {
                settings.insert("unique_id", unique_id);
            }

            settings.insert("use_tls", cli.use_tls);
            if cli.use_tls {
                apply_tls(&mut settings, cli);
            } else {
                for key in TLS_KEYS {
                    settings.remove(key);
                }
            }

            settings.require(MQTT_REQUIRED)?;
            Ok(settings)
        })
    }

    /// Loader for removing a sensor: empty CLI values keep the file's value.
    pub fn sensor_delete_settings(
        &self,
        path: Option<&Path>,
        cli: &CliValues,
    ) -> Result<Settings, SettingsError> {
        self.span.in_scope(|| -> Result<Settings, SettingsError> {
            let mut settings = read_settings_file(path)?;

            settings.set_if_truthy("debug", Some(cli.debug));

            settings.set_if_truthy("client_name", cli.client_name.as_ref());
            settings.set_if_truthy("device_id", cli.device_id.as_ref());
            settings.set_if_truthy("device_name", cli.device_name.as_ref());
            settings.set_if_truthy("mqtt_password", cli.mqtt_password.as_ref());
            settings.set_if_truthy("mqtt_port", cli.mqtt_port);
            settings.set_if_truthy("mqtt_prefix", cli.mqtt_prefix.as_ref());
            settings.set_if_truthy("mqtt_server", cli.mqtt_server.as_ref());
            settings.set_if_truthy("mqtt_user", cli.mqtt_user.as_ref());

            if cli.use_tls {
                settings.insert("use_tls", true);
                apply_tls(&mut settings, cli);
            } else if !settings.get("use_tls").is_some_and(SettingValue::is_truthy) {
                for key in TLS_KEYS {
                    settings.remove(key);
                }
            }

            settings.require(SENSOR_DELETE_REQUIRED)?;
            tracing::debug!("settings: {}", settings.redacted());
            Ok(settings)
        })
    }

    pub fn binary_sensor_settings(
        &self,
        path: Option<&Path>,
        cli: &CliValues,
    ) -> Result<Settings, SettingsError> {
        let mut settings = self.load_mqtt_settings(path, cli)?;
        settings.set_or_remove("state", cli.state.as_ref());
        settings.set_or_remove("metric_name", cli.metric_name.as_ref());
        self.span.in_scope(|| tracing::debug!("settings: {}", settings.redacted()));
        Ok(settings)
    }

    pub fn device_settings(
        &self,
        path: Option<&Path>,
        cli: &CliValues,
    ) -> Result<Settings, SettingsError> {
        let settings = self.load_mqtt_settings(path, cli)?;
        self.span.in_scope(|| tracing::debug!("settings: {}", settings.redacted()));
        settings.require(&["unique_id"])?;
        Ok(settings)
    }
}

fn apply_tls(settings: &mut Settings, cli: &CliValues) {
    settings.set_or_remove("certfile", cli.tls_certfile.as_deref());
    settings.set_or_remove("keyfile", cli.tls_key.as_deref());
    settings.set_or_remove("ca_certs", cli.tls_ca_cert.as_deref());
}

/// [`SettingsAssembler::load_mqtt_settings`] with the default span.
pub fn load_mqtt_settings(path: Option<&Path>, cli: &CliValues) -> Result<Settings, SettingsError> {
    SettingsAssembler::default().load_mqtt_settings(path, cli)
}

pub fn sensor_delete_settings(
    path: Option<&Path>,
    cli: &CliValues,
) -> Result<Settings, SettingsError> {
    SettingsAssembler::default().sensor_delete_settings(path, cli)
}

pub fn binary_sensor_settings(
    path: Option<&Path>,
    cli: &CliValues,
) -> Result<Settings, SettingsError> {
    SettingsAssembler::default().binary_sensor_settings(path, cli)
}

pub fn device_settings(path: Option<&Path>, cli: &CliValues) -> Result<Settings, SettingsError> {
    SettingsAssembler::default().device_settings(path, cli)
}
