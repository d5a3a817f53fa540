//! Settings file loading

use super::{SettingValue, Settings, SettingsError};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Read the persisted settings mapping.
///
/// No path, or a file that can't be read, yields an empty mapping. A file that
/// reads but doesn't parse is an error.
pub fn read_settings_file(path: Option<&Path>) -> Result<Settings, SettingsError> {
    let Some(settings_file) = path else {
        return Ok(Settings::default());
    };

    let content = match fs::read_to_string(settings_file) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed reading settings file {}: {}", settings_file.display(), e);
            return Ok(Settings::default());
        }
    };

    let ext =
        settings_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let settings = match ext.as_str() {
        "toml" => parse_toml_settings(&content, settings_file)?,
        _ => parse_yaml_settings(&content, settings_file)?,
    };

    tracing::debug!("Read {} settings from {}", settings.len(), settings_file.display());
    Ok(settings)
}

fn parse_yaml_settings(content: &str, settings_file: &Path) -> Result<Settings, SettingsError> {
    // Parse to generic value first so an empty document is just "no settings"
    let raw: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| parse_error(settings_file, e))?;
    if raw.is_null() {
        return Ok(Settings::default());
    }

    let entries: BTreeMap<String, Option<SettingValue>> =
        serde_yaml::from_value(raw).map_err(|e| parse_error(settings_file, e))?;

    // `key: ~` means the same as leaving the key out
    Ok(entries.into_iter().filter_map(|(key, value)| value.map(|v| (key, v))).collect())
}

fn parse_toml_settings(content: &str, settings_file: &Path) -> Result<Settings, SettingsError> {
    let entries: BTreeMap<String, SettingValue> =
        toml::from_str(content).map_err(|e| parse_error(settings_file, e))?;
    Ok(entries.into_iter().collect())
}

fn parse_error(settings_file: &Path, err: impl Display) -> SettingsError {
    SettingsError::Parse { path: settings_file.to_path_buf(), message: err.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_no_path_yields_empty_settings() {
        let settings = read_settings_file(None).expect("settings");
        assert!(settings.is_empty());
    }

    #[test]
    fn test_missing_file_yields_empty_settings() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("does-not-exist.yaml");

        let settings = read_settings_file(Some(&path)).expect("settings");
        assert!(settings.is_empty());
    }

    #[test]
    fn test_load_yaml_settings() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.yaml");
        fs::write(
            &path,
            "mqtt_server: broker.lan\nmqtt_port: 1883\nuse_tls: false\nmqtt_prefix: homeassistant\n",
        )
        .expect("write");

        let settings = read_settings_file(Some(&path)).expect("settings");
        assert_eq!(settings.len(), 4);
        assert_eq!(settings.get("mqtt_server").and_then(SettingValue::as_str), Some("broker.lan"));
        assert_eq!(settings.get("mqtt_port").and_then(SettingValue::as_i64), Some(1883));
        assert_eq!(settings.get("use_tls").and_then(SettingValue::as_bool), Some(false));
    }

    #[test]
    fn test_empty_yaml_document_yields_empty_settings() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.yml");
        fs::write(&path, "# nothing configured yet\n").expect("write");

        let settings = read_settings_file(Some(&path)).expect("settings");
        assert!(settings.is_empty());
    }

    #[test]
    fn test_null_values_are_dropped() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.yaml");
        fs::write(&path, "mqtt_user: ~\nmqtt_server: broker.lan\n").expect("write");

        let settings = read_settings_file(Some(&path)).expect("settings");
        assert!(!settings.contains_key("mqtt_user"));
        assert!(settings.contains_key("mqtt_server"));
    }

    #[test]
    fn test_invalid_yaml_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.yaml");
        fs::write(&path, "mqtt_server: [unclosed\n").expect("write");

        let err = read_settings_file(Some(&path)).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("settings.yaml"));
    }

    #[test]
    fn test_non_mapping_document_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.yaml");
        fs::write(&path, "- mqtt_server\n- mqtt_port\n").expect("write");

        assert!(read_settings_file(Some(&path)).is_err());
    }

    #[test]
    fn test_nested_value_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.yaml");
        fs::write(&path, "mqtt:\n  server: broker.lan\n").expect("write");

        assert!(read_settings_file(Some(&path)).is_err());
    }

    #[test]
    fn test_toml_selected_by_extension() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("settings.toml");
        fs::write(&path, "mqtt_server = \"broker.lan\"\nmqtt_port = 8883\n").expect("write");

        let settings = read_settings_file(Some(&path)).expect("settings");
        assert_eq!(settings.get("mqtt_server").and_then(SettingValue::as_str), Some("broker.lan"));
        assert_eq!(settings.get("mqtt_port").and_then(SettingValue::as_i64), Some(8883));
    }
}
