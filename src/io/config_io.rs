use std::fs;
use std::path::Path;

use toml_edit::{DocumentMut, Item, Table, value};

use crate::io::store::CONFIG_FILE;
use crate::model::config::ChecklistConfig;
use crate::model::item::FilterMode;

/// Error type for config editing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read checklist.toml: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse checklist.toml: {0}")]
    Parse(#[from] toml_edit::TomlError),
    #[error("unknown config key: {0} (expected one of: {keys})", keys = CONFIG_KEYS.join(", "))]
    UnknownKey(String),
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Keys accepted by `ck config`
pub const CONFIG_KEYS: [&str; 5] = [
    "name",
    "storage.key",
    "confirm_clear",
    "default_filter",
    "show_key_hints",
];

/// Read the config as a toml_edit document for round-trip-safe editing.
pub fn read_config_doc(dir: &Path) -> Result<DocumentMut, ConfigError> {
    let text = fs::read_to_string(dir.join(CONFIG_FILE))?;
    Ok(text.parse()?)
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config_doc(dir: &Path, doc: &DocumentMut) -> Result<(), ConfigError> {
    fs::write(dir.join(CONFIG_FILE), doc.to_string())?;
    Ok(())
}

/// (table, key) location of a config key
fn locate(key: &str) -> Result<(&'static str, &'static str), ConfigError> {
    match key {
        "name" => Ok(("checklist", "name")),
        "storage.key" => Ok(("storage", "key")),
        "confirm_clear" => Ok(("behavior", "confirm_clear")),
        "default_filter" => Ok(("behavior", "default_filter")),
        "show_key_hints" => Ok(("ui", "show_key_hints")),
        _ => Err(ConfigError::UnknownKey(key.to_string())),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            reason: format!("expected true or false, got '{}'", raw),
        }),
    }
}

/// Set a config value in the document. Missing tables are created.
pub fn set_value(doc: &mut DocumentMut, key: &str, raw: &str) -> Result<(), ConfigError> {
    let (table, field) = locate(key)?;
    let item = match key {
        "confirm_clear" | "show_key_hints" => value(parse_bool(key, raw)?),
        "default_filter" => {
            let mode: FilterMode = raw.parse().map_err(|reason| ConfigError::InvalidValue {
                key: key.to_string(),
                reason,
            })?;
            value(mode.as_str())
        }
        "storage.key" => {
            let valid = !raw.is_empty()
                && raw
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !valid {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    reason: "use letters, digits, '-' or '_'".into(),
                });
            }
            value(raw)
        }
        _ => value(raw),
    };

    if !doc.contains_key(table) {
        doc[table] = Item::Table(Table::new());
    }
    doc[table][field] = item;
    Ok(())
}

/// Current value of a config key, as displayed by `ck config`.
pub fn get_value(config: &ChecklistConfig, key: &str) -> Result<String, ConfigError> {
    locate(key)?;
    Ok(match key {
        "name" => config.checklist.name.clone(),
        "storage.key" => config.storage.key.clone(),
        "confirm_clear" => config.behavior.confirm_clear.to_string(),
        "default_filter" => config.behavior.default_filter.to_string(),
        _ => config.ui.show_key_hints.to_string(),
    })
}
