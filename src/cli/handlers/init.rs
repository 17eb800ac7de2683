use std::fs;
use std::path::Path;

use toml_edit::DocumentMut;

use crate::cli::commands::InitArgs;
use crate::io::config_io;
use crate::io::store::{self, CONFIG_FILE, DIR_NAME};

const CONFIG_TEMPLATE: &str = r##"[checklist]
name = ""

[storage]
# The list is stored in checklist/<key>.json
key = "checklist"

[behavior]
# Ask before `ck clear` empties the list (skip with --yes)
confirm_clear = true
# Filter used by `ck list` and a fresh TUI: "all", "active" or "completed"
default_filter = "all"

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# show_key_hints = false
#
# [ui.colors]
# background = "#0C001B"
# text = "#A09BFE"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#5A5580"
# green = "#44FF88"
# red = "#FF4444"
"##;

/// "weekly-shop" → "Weekly Shop"
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The config template with `name` filled in (quoted by toml_edit).
fn render_config(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    let mut doc: DocumentMut = CONFIG_TEMPLATE.parse()?;
    config_io::set_value(&mut doc, "name", name)?;
    Ok(doc.to_string())
}

pub fn cmd_init(args: InitArgs, start: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let dir = start.join(DIR_NAME);

    if dir.join(CONFIG_FILE).exists() && !args.force {
        return Err("checklist already exists in ./checklist/ (use --force to reinitialize)".into());
    }

    if let Some(parent) = start.parent()
        && let Ok(parent_root) = store::discover_root(parent)
    {
        eprintln!(
            "Note: parent checklist found at {}/",
            parent_root.join(DIR_NAME).display()
        );
        eprintln!("Creating new checklist in ./checklist/");
    }

    let name = args.name.unwrap_or_else(|| {
        start
            .file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Checklist".to_string())
    });

    fs::create_dir_all(&dir)?;
    fs::write(dir.join(CONFIG_FILE), render_config(&name)?)?;

    println!("Initialized checklist: {}", name);
    Ok(())
}
