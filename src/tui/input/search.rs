use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.search_input.clear();
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Enter) => execute_search(app),
        (_, KeyCode::Backspace) => {
            if app.search_input.pop().is_none() {
                app.mode = Mode::Navigate;
            }
        }
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.search_input.clear();
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.search_input.push(c);
        }
        _ => {}
    }
}

fn execute_search(app: &mut App) {
    let query = std::mem::take(&mut app.search_input);
    app.mode = Mode::Navigate;
    if query.is_empty() {
        app.last_search = None;
        return;
    }
    app.last_search = Some(query);
    if !app.jump_to_match(true, true) {
        app.set_status("no matches");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::handle_key;
    use crate::tui::render::test_helpers::app_with_items;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn search_for(app: &mut App, query: &str) {
        press(app, KeyCode::Char('/'));
        for c in query.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn enter_jumps_to_first_match_from_cursor() {
        let (_tmp, mut app) = app_with_items("bread\nmilk\neggs\noat milk", &[]);
        search_for(&mut app, "milk");
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.cursor, 1);
        assert_eq!(app.last_search.as_deref(), Some("milk"));

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.cursor, 3);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.cursor, 1);
        press(&mut app, KeyCode::Char('N'));
        assert_eq!(app.cursor, 3);
    }

    #[test]
    fn no_match_reports_and_keeps_cursor() {
        let (_tmp, mut app) = app_with_items("bread\nmilk", &[]);
        app.cursor = 1;
        search_for(&mut app, "cheese");
        assert_eq!(app.cursor, 1);
        assert_eq!(app.status.as_ref().unwrap().text, "no matches");
    }

    #[test]
    fn empty_query_clears_last_search() {
        let (_tmp, mut app) = app_with_items("bread", &[]);
        app.last_search = Some("bread".into());
        search_for(&mut app, "");
        assert!(app.last_search.is_none());
    }

    #[test]
    fn escape_keeps_previous_search() {
        let (_tmp, mut app) = app_with_items("bread", &[]);
        app.last_search = Some("bread".into());
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.search_input.is_empty());
        assert_eq!(app.last_search.as_deref(), Some("bread"));
    }

    #[test]
    fn backspace_on_empty_input_leaves_search() {
        let (_tmp, mut app) = app_with_items("bread", &[]);
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('b'));
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.mode, Mode::Search);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.mode, Mode::Navigate);
    }
}
