mod confirm;
mod edit;
mod navigate;
mod search;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode};

use confirm::handle_confirm;
use edit::{handle_add, handle_edit};
use navigate::handle_navigate;
use search::handle_search;

pub use edit::EditBuffer;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status = None;

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Add => handle_add(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Confirm => handle_confirm(app, key),
        Mode::Search => handle_search(app, key),
    }
}

/// Handle a bracketed paste event. Only the add/edit box accepts pastes.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    match app.mode {
        Mode::Add | Mode::Edit => edit::paste(app, text),
        Mode::Search => app
            .search_input
            .push_str(&text.replace(['\r', '\n'], " ")),
        _ => {}
    }
}
