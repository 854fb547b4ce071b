use crate::error::{AspectError, Result};
use crate::logging::MessageLanguage;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::env;
use std::ffi::OsString;
use std::sync::Arc;

pub const LANGUAGE_KEY: &str = "METHOD_ASPECT_LANGUAGE";
pub const ERROR_CHAIN_KEY: &str = "METHOD_ASPECT_ERROR_CHAIN";

/// Key/value configuration source
#[derive(Clone, Default)]
pub struct ConfigSource {
    values: Arc<DashMap<String, String>>,
}

impl ConfigSource {
    /// Snapshot of the process environment
    pub fn from_env() -> Self {
        Self::from_os_vars(env::vars_os())
    }

    /// Build a source from raw key/value pairs
    ///
    /// Keys that are not valid UTF-8 are skipped. Values that are not valid
    /// UTF-8 are kept lossily, so a setting read from them fails to parse
    /// instead of silently falling back to its default.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let source = Self::default();
        for (key, value) in vars {
            let Ok(key) = key.into_string() else {
                continue;
            };
            source.set(&key, &value.to_string_lossy());
        }
        source
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Settings for the default processor logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectConfig {
    /// Language of the mismatch and failure messages
    pub language: MessageLanguage,
    /// Whether error entries carry the `source()` chain of the error
    pub error_chain: bool,
}

impl Default for AspectConfig {
    fn default() -> Self {
        Self {
            language: MessageLanguage::Chinese,
            error_chain: true,
        }
    }
}

impl AspectConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from `METHOD_ASPECT_LANGUAGE` and `METHOD_ASPECT_ERROR_CHAIN`
    pub fn from_env() -> Result<Self> {
        Self::from_source(&ConfigSource::from_env())
    }

    /// Load from a configuration source, falling back to defaults for absent keys
    pub fn from_source(source: &ConfigSource) -> Result<Self> {
        let mut config = Self::default();

        if let Some(language) = source.get(LANGUAGE_KEY) {
            config.language = language.trim().parse().map_err(|_| {
                AspectError::invalid_config(format!(
                    "{} has unsupported language '{}'",
                    LANGUAGE_KEY, language
                ))
            })?;
        }

        if let Some(flag) = source.get(ERROR_CHAIN_KEY) {
            config.error_chain = parse_flag(&flag).ok_or_else(|| {
                AspectError::invalid_config(format!(
                    "{} must be a boolean, got '{}'",
                    ERROR_CHAIN_KEY, flag
                ))
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
