use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::parse::parse_lines;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Text being typed into the add/edit box, with a byte-offset cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub text: String,
    pub cursor: usize,
}

impl EditBuffer {
    /// Buffer holding `text` with the cursor at the end
    pub fn new(text: &str) -> Self {
        EditBuffer {
            text: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn word_left(&mut self) {
        self.cursor = unicode::word_boundary_left(&self.text, self.cursor);
    }

    pub fn word_right(&mut self) {
        self.cursor = unicode::word_boundary_right(&self.text, self.cursor);
    }

    pub fn delete_word_left(&mut self) {
        let start = unicode::word_boundary_left(&self.text, self.cursor);
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    /// Start of the line the cursor is on
    pub fn home(&mut self) {
        self.cursor = self.text[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
    }

    /// End of the line the cursor is on
    pub fn end(&mut self) {
        self.cursor = self.text[self.cursor..]
            .find('\n')
            .map_or(self.text.len(), |i| self.cursor + i);
    }

    /// Delete from the start of the current line to the cursor
    pub fn kill_to_line_start(&mut self) {
        let end = self.cursor;
        self.home();
        self.text.replace_range(self.cursor..end, "");
    }

    /// (line index, display column) of the cursor
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        (
            line,
            unicode::byte_offset_to_display_col(&before[line_start..], before.len() - line_start),
        )
    }

    /// Apply a text-editing key. Returns false if the key is not an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('w') if ctrl => self.delete_word_left(),
            KeyCode::Char('u') if ctrl => self.kill_to_line_start(),
            KeyCode::Char('a') if ctrl => self.home(),
            KeyCode::Char('e') if ctrl => self.end(),
            KeyCode::Char('b') if alt => self.word_left(),
            KeyCode::Char('f') if alt => self.word_right(),
            KeyCode::Char(c) if !ctrl && !alt => self.insert_char(c),
            KeyCode::Backspace if alt || ctrl => self.delete_word_left(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left if alt || ctrl => self.word_left(),
            KeyCode::Right if alt || ctrl => self.word_right(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::Home => self.home(),
            KeyCode::End => self.end(),
            _ => return false,
        }
        true
    }
}

pub(super) fn begin_add(app: &mut App) {
    app.edit_buffer = EditBuffer::default();
    app.edit_target = None;
    app.mode = Mode::Add;
}

pub(super) fn begin_edit(app: &mut App) {
    let Some(item) = app.cursor_item() else {
        return;
    };
    let buffer = EditBuffer::new(&item.text);
    let id = item.id.clone();
    app.edit_buffer = buffer;
    app.edit_target = Some(id);
    app.mode = Mode::Edit;
}

fn leave_input(app: &mut App) {
    app.edit_buffer = EditBuffer::default();
    app.edit_target = None;
    app.mode = Mode::Navigate;
}

/// Add mode: Enter inserts a newline, Ctrl-S or Alt-Enter submits.
pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => leave_input(app),
        (m, KeyCode::Char('s')) if m.contains(KeyModifiers::CONTROL) => submit_add(app),
        (m, KeyCode::Enter) if m.contains(KeyModifiers::ALT) => submit_add(app),
        (_, KeyCode::Enter) => app.edit_buffer.insert_char('\n'),
        _ => {
            app.edit_buffer.handle_key(key);
        }
    }
}

fn submit_add(app: &mut App) {
    let raw = app.edit_buffer.text.clone();
    if parse_lines(&raw).is_empty() {
        leave_input(app);
        app.set_status("nothing to add");
        return;
    }
    let Some(ids) = app.apply(|store| store.add_items(&raw)) else {
        return;
    };
    leave_input(app);

    let visible = ids.last().is_some_and(|id| app.select_id(id));
    let noun = if ids.len() == 1 { "item" } else { "items" };
    if visible {
        app.set_status(format!("added {} {}", ids.len(), noun));
    } else {
        app.set_status(format!(
            "added {} {} (hidden by the {} filter)",
            ids.len(),
            noun,
            app.filter
        ));
    }
}

/// Edit mode: single line, Enter or Ctrl-S saves.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => leave_input(app),
        (_, KeyCode::Enter) => submit_edit(app),
        (m, KeyCode::Char('s')) if m.contains(KeyModifiers::CONTROL) => submit_edit(app),
        _ => {
            app.edit_buffer.handle_key(key);
        }
    }
}

fn submit_edit(app: &mut App) {
    let Some(id) = app.edit_target.clone() else {
        leave_input(app);
        return;
    };
    let text = app.edit_buffer.text.clone();
    // On error (empty text, item gone) stay in Edit mode with the message shown
    if app.apply(|store| store.edit_text(&id, &text)).is_some() {
        leave_input(app);
        app.select_id(&id);
    }
}

/// Pasted text: kept as-is when adding, flattened to one line when editing.
pub(super) fn paste(app: &mut App, text: &str) {
    let clean = text.replace('\r', "");
    match app.mode {
        Mode::Add => app.edit_buffer.insert_str(&clean),
        Mode::Edit => app.edit_buffer.insert_str(&clean.replace('\n', " ")),
        _ => {}
    }
}
