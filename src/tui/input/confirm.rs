use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, ConfirmAction, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => run_confirmed(app),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.confirm_action = None;
            app.mode = Mode::Navigate;
            app.set_status("cancelled");
        }
        _ => {}
    }
}

/// Carry out the pending destructive action
pub(super) fn run_confirmed(app: &mut App) {
    app.mode = Mode::Navigate;
    let Some(action) = app.confirm_action.take() else {
        return;
    };
    match action {
        ConfirmAction::DeleteItem(id) => {
            if let Some(Some(removed)) = app.apply(|store| store.delete_item(&id)) {
                app.clamp_cursor();
                app.set_status(format!("deleted: {}", removed.text));
            }
        }
        ConfirmAction::ClearAll => {
            if let Some(removed) = app.apply(|store| store.clear_all()) {
                app.cursor = 0;
                app.scroll_offset = 0;
                app.set_status(format!("cleared {} items (u to undo)", removed.len()));
            }
        }
    }
}
