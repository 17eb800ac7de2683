use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::item::FilterMode;

/// Configuration from checklist.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistConfig {
    #[serde(default)]
    pub checklist: ChecklistInfo,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistInfo {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// The document is stored as `<key>.json`
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig { key: default_key() }
    }
}

impl StorageConfig {
    pub fn file_name(&self) -> String {
        format!("{}.json", self.key)
    }
}

fn default_key() -> String {
    "checklist".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    /// `ck clear` asks before emptying the list unless `--yes` is given
    #[serde(default = "default_true")]
    pub confirm_clear: bool,
    #[serde(default)]
    pub default_filter: FilterMode,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            confirm_clear: true,
            default_filter: FilterMode::All,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}
