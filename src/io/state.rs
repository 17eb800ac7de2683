use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::item::FilterMode;

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiState {
    /// Active filter tab
    #[serde(default)]
    pub filter: FilterMode,
    /// Id of the item under the cursor, so the cursor follows it across reorders
    #[serde(default)]
    pub cursor_id: Option<String>,
    /// Last search pattern
    #[serde(default)]
    pub last_search: Option<String>,
}

/// Read .state.json from the checklist directory
pub fn read_ui_state(dir: &Path) -> Option<UiState> {
    let content = fs::read_to_string(dir.join(".state.json")).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the checklist directory
pub fn write_ui_state(dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    fs::write(dir.join(".state.json"), content)
}
