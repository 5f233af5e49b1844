/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::fmt;
use std::path::PathBuf;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

#[derive(Clone, Debug, EnumIter, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ConfigKey {
    AuthToken,
    Server,
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

impl std::str::FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::iter()
            .find(|key| key.to_string() == s.to_lowercase())
            .ok_or_else(|| format!("Invalid key: {}", s))
    }
}

fn get_config_file() -> Result<PathBuf, String> {
    let mut config_dir =
        dirs::config_dir().ok_or_else(|| "Could not find configuration directory".to_string())?;
    config_dir.push("compass");
    config_dir.push("config.toml");
    Ok(config_dir)
}

pub fn load_config() -> Result<HashMap<ConfigKey, Option<String>>, String> {
    let config_file = get_config_file()?;

    if !config_file.exists() {
        return Ok(ConfigKey::iter().map(|key| (key, None)).collect());
    }

    let contents = fs::read_to_string(&config_file)
        .map_err(|e| format!("Failed to read configuration file: {}", e))?;
    toml::from_str(&contents).map_err(|e| format!("Failed to parse configuration file: {}", e))
}

pub fn save_config(config: &HashMap<ConfigKey, Option<String>>) -> Result<(), String> {
    let config_file = get_config_file()?;

    if let Some(config_dir) = config_file.parent() {
        fs::create_dir_all(config_dir)
            .map_err(|e| format!("Failed to create configuration directory: {}", e))?;
    }

    let contents = toml::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize configuration: {}", e))?;
    fs::write(config_file, contents).map_err(|e| format!("Failed to write configuration file: {}", e))
}

/// Sets `key` when a value is given, otherwise returns (and unless quiet,
/// prints) the stored value.
pub fn set_get_value(
    key: ConfigKey,
    value: Option<String>,
    quiet: bool,
) -> Result<Option<String>, String> {
    let mut config = load_config()?;

    if let Some(value) = value {
        config.insert(key.clone(), Some(value.clone()));
        save_config(&config)?;

        if !quiet {
            println!("{} set to \"{}\"", key, value);
        }

        return Ok(Some(value));
    }

    let value = config.get(&key).cloned().flatten();
    if !quiet {
        println!("{}", value.as_deref().unwrap_or("[unset]"));
    }

    Ok(value)
}

pub fn set_get_value_from_string(
    key: String,
    value: Option<String>,
    quiet: bool,
) -> Result<Option<String>, String> {
    let key = key.parse::<ConfigKey>().map_err(|e| {
        let valid = ConfigKey::iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}. Valid keys are: {}", e, valid)
    })?;

    set_get_value(key, value, quiet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_key_parsing() {
        assert_eq!("server".parse::<ConfigKey>(), Ok(ConfigKey::Server));
        assert_eq!("AuthToken".parse::<ConfigKey>(), Ok(ConfigKey::AuthToken));
        assert!("organization".parse::<ConfigKey>().is_err());
        assert_eq!(ConfigKey::AuthToken.to_string(), "authtoken");
    }
}
