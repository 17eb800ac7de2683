use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::item::FilterMode;
use crate::tui::app::{App, ConfirmAction, Mode};

use super::edit::{begin_add, begin_edit};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Help overlay: any key closes it, q still quits
    if app.show_help {
        app.show_help = false;
        if key.code == KeyCode::Char('q') {
            app.should_quit = true;
        }
        return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('r') if ctrl => app.redo(),
        KeyCode::Char('?') => app.show_help = true,

        // Cursor
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.view_indices().len().saturating_sub(1);
        }
        KeyCode::PageDown => move_cursor(app, 10),
        KeyCode::PageUp => move_cursor(app, -10),

        // Filters
        KeyCode::Char('1') => app.set_filter(FilterMode::All),
        KeyCode::Char('2') => app.set_filter(FilterMode::Active),
        KeyCode::Char('3') => app.set_filter(FilterMode::Completed),
        KeyCode::Tab => app.set_filter(app.filter.next()),
        KeyCode::BackTab => app.set_filter(app.filter.next().next()),

        // Mutations
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_cursor(app),
        KeyCode::Char('a') => begin_add(app),
        KeyCode::Char('e') | KeyCode::Enter => begin_edit(app),
        KeyCode::Char('d') | KeyCode::Delete => confirm_delete(app),
        KeyCode::Char('J') => move_item(app, 1),
        KeyCode::Char('K') => move_item(app, -1),
        KeyCode::Char('C') => confirm_clear(app),
        KeyCode::Char('u') => app.undo(),

        // Search
        KeyCode::Char('/') => {
            app.search_input.clear();
            app.mode = Mode::Search;
        }
        KeyCode::Char('n') => next_match(app, true),
        KeyCode::Char('N') => next_match(app, false),
        KeyCode::Esc => app.last_search = None,
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let len = app.view_indices().len();
    if len == 0 {
        app.cursor = 0;
        return;
    }
    let target = app.cursor as isize + delta;
    app.cursor = target.clamp(0, len as isize - 1) as usize;
}

fn toggle_cursor(app: &mut App) {
    let Some(id) = app.cursor_id() else {
        return;
    };
    if app.apply(|store| store.toggle(&id)).is_some() {
        // The item may have left the view; the cursor then lands on its neighbour
        app.clamp_cursor();
    }
}

/// Shift the item under the cursor within the current view (J/K)
fn move_item(app: &mut App, delta: isize) {
    let Some(id) = app.cursor_id() else {
        return;
    };
    let filter = app.filter;
    if app.apply(|store| store.move_by(filter, &id, delta)) == Some(true) {
        app.select_id(&id);
    }
}

fn confirm_delete(app: &mut App) {
    if let Some(id) = app.cursor_id() {
        app.confirm_action = Some(ConfirmAction::DeleteItem(id));
        app.mode = Mode::Confirm;
    }
}

fn confirm_clear(app: &mut App) {
    if app.store.checklist().is_empty() {
        app.set_status("nothing to clear");
        return;
    }
    app.confirm_action = Some(ConfirmAction::ClearAll);
    if app.store.config.behavior.confirm_clear {
        app.mode = Mode::Confirm;
    } else {
        super::confirm::run_confirmed(app);
    }
}

fn next_match(app: &mut App, forward: bool) {
    if app.last_search.is_none() {
        return;
    }
    if !app.jump_to_match(forward, false) {
        app.set_status("no matches");
    }
}
