//! Settings assembly and validation
//!
//! Merges a persisted settings file with CLI-supplied values, applies the TLS
//! overlay and checks that every mandatory key is present (CLI > Env > File).

pub mod assemble;
pub mod cli;
pub mod file;
pub mod value;

pub use assemble::{
    binary_sensor_settings, device_settings, load_mqtt_settings, sensor_delete_settings,
    SettingsAssembler,
};
pub use cli::CliValues;
pub use file::read_settings_file;
pub use value::SettingValue;

use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::path::PathBuf;

/// Keys whose values never reach the logs.
const MASKED_KEYS: &[&str] = &["mqtt_password"];

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A mandatory key was absent after the merge.
    #[error("No {0} was specified")]
    MissingSetting(&'static str),

    #[error("Invalid settings file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

impl SettingsError {
    /// Name of the missing key, if this is a validation failure.
    pub fn missing_key(&self) -> Option<&'static str> {
        match self {
            SettingsError::MissingSetting(key) => Some(*key),
            SettingsError::Parse { .. } => None,
        }
    }
}

/// Merged key/value settings handed to the MQTT publishing code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(BTreeMap<String, SettingValue>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<SettingValue> {
        self.0.remove(key)
    }

    /// Write `value` under `key`, or drop the key when there is no value.
    pub fn set_or_remove<V: Into<SettingValue>>(&mut self, key: &str, value: Option<V>) {
        match value {
            Some(v) => self.insert(key, v),
            None => {
                self.remove(key);
            }
        }
    }

    /// Write `value` under `key` only when it is supplied and truthy.
    pub fn set_if_truthy<V: Into<SettingValue>>(&mut self, key: &str, value: Option<V>) {
        if let Some(v) = value.map(Into::into) {
            if v.is_truthy() {
                self.0.insert(key.to_string(), v);
            }
        }
    }

    /// Fail on the first key in `keys` that is absent.
    pub fn require(&self, keys: &[&'static str]) -> Result<(), SettingsError> {
        match keys.iter().copied().find(|key| !self.contains_key(key)) {
            Some(key) => Err(SettingsError::MissingSetting(key)),
            None => Ok(()),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SettingValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Loggable view with secrets masked.
    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

impl FromIterator<(String, SettingValue)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, SettingValue)>>(iter: I) -> Self {
        Settings(iter.into_iter().collect())
    }
}

pub struct Redacted<'a>(&'a Settings);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if MASKED_KEYS.contains(&key.as_str()) {
                write!(f, "{}: ********", key)?;
            } else {
                write!(f, "{}: {}", key, value)?;
            }
        }
        f.write_str("}")
    }
}
