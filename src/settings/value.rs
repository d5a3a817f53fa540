//! Scalar setting values

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A single scalar stored in a [`Settings`](super::Settings) mapping.
///
/// Serialized untagged so a settings file reads naturally: `mqtt_port: 1883`
/// becomes `Integer(1883)`, `use_tls: true` becomes `Bool(true)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl SettingValue {
    /// Empty strings, zero and `false` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            SettingValue::Bool(b) => *b,
            SettingValue::Integer(i) => *i != 0,
            SettingValue::Float(f) => *f != 0.0,
            SettingValue::String(s) => !s.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Integer(i) => write!(f, "{}", i),
            SettingValue::Float(x) => write!(f, "{}", x),
            SettingValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<u16> for SettingValue {
    fn from(value: u16) -> Self {
        SettingValue::Integer(i64::from(value))
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Float(value)
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::String(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}

impl From<&String> for SettingValue {
    fn from(value: &String) -> Self {
        SettingValue::String(value.clone())
    }
}

impl From<&Path> for SettingValue {
    fn from(value: &Path) -> Self {
        SettingValue::String(value.display().to_string())
    }
}
