use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::io::lock::FileLock;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::store::{self, ChecklistStore, DIR_NAME, StoreError};
use crate::io::watcher::DocumentWatcher;
use crate::model::item::{Checklist, ChecklistItem, FilterMode, ItemId};
use crate::ops::{search, view};

use super::input;
use super::input::EditBuffer;
use super::render;
use super::theme::Theme;
use super::undo::UndoStack;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Multi-line input box for new items
    Add,
    /// Single-line edit of the item under the cursor
    Edit,
    Confirm,
    Search,
}

/// Destructive action waiting for y/n
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteItem(ItemId),
    ClearAll,
}

/// One-line message shown in the status row until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub store: ChecklistStore,
    pub filter: FilterMode,
    /// Cursor position within the current view
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_help: bool,
    pub show_key_hints: bool,
    pub edit_buffer: EditBuffer,
    /// Item being edited in Edit mode
    pub edit_target: Option<ItemId>,
    pub confirm_action: Option<ConfirmAction>,
    /// Search mode: current query being typed
    pub search_input: String,
    /// Last executed search pattern
    pub last_search: Option<String>,
    pub status: Option<StatusMessage>,
    pub undo_stack: UndoStack,
    /// The watcher saw a change that has not been loaded yet
    pub pending_reload: bool,
}

impl App {
    pub fn new(store: ChecklistStore) -> Self {
        let theme = Theme::from_config(&store.config.ui);
        let filter = store.config.behavior.default_filter;
        let show_key_hints = store.config.ui.show_key_hints;
        let status = store.load_warnings.last().map(|w| StatusMessage {
            text: w.clone(),
            is_error: true,
        });

        App {
            store,
            filter,
            cursor: 0,
            scroll_offset: 0,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            show_help: false,
            show_key_hints,
            edit_buffer: EditBuffer::default(),
            edit_target: None,
            confirm_action: None,
            search_input: String::new(),
            last_search: None,
            status,
            undo_stack: UndoStack::new(),
            pending_reload: false,
        }
    }

    /// Full-list indices of the items in the current view
    pub fn view_indices(&self) -> Vec<usize> {
        view::view_indices(self.store.checklist(), self.filter)
    }

    pub fn cursor_item(&self) -> Option<&ChecklistItem> {
        let index = *self.view_indices().get(self.cursor)?;
        self.store.checklist().items.get(index)
    }

    pub fn cursor_id(&self) -> Option<ItemId> {
        self.cursor_item().map(|item| item.id.clone())
    }

    /// Keep the cursor inside the current view
    pub fn clamp_cursor(&mut self) {
        let len = self.view_indices().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Put the cursor on `id` if it is visible. Returns false if it is not.
    pub fn select_id(&mut self, id: &ItemId) -> bool {
        let list = self.store.checklist();
        let found = self
            .view_indices()
            .iter()
            .position(|&i| &list.items[i].id == id);
        match found {
            Some(pos) => {
                self.cursor = pos;
                true
            }
            None => false,
        }
    }

    /// Keep the cursor on `id` if possible, otherwise just clamp it
    fn follow(&mut self, id: Option<ItemId>) {
        if !id.is_some_and(|id| self.select_id(&id)) {
            self.clamp_cursor();
        }
    }

    pub fn set_filter(&mut self, filter: FilterMode) {
        let current = self.cursor_id();
        self.filter = filter;
        self.follow(current);
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    /// Run a store mutation while holding the directory lock.
    ///
    /// The document is re-read first so edits made by other processes are
    /// not overwritten. A snapshot goes on the undo stack when the list
    /// changes. Errors are shown in the status row and yield None.
    pub fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut ChecklistStore) -> Result<T, StoreError>,
    ) -> Option<T> {
        let _lock = match FileLock::acquire_default(&self.store.dir) {
            Ok(lock) => lock,
            Err(e) => {
                self.set_error(e.to_string());
                return None;
            }
        };

        match self.store.reload() {
            Ok(true) => self.undo_stack.clear(),
            Ok(false) => {}
            Err(e) => {
                self.set_error(e.to_string());
                return None;
            }
        }

        let before = self.store.checklist().clone();
        match op(&mut self.store) {
            Ok(out) => {
                if self.store.checklist() != &before {
                    self.undo_stack.push(before);
                }
                Some(out)
            }
            Err(e) => {
                self.set_error(e.to_string());
                None
            }
        }
    }

    /// Write a snapshot taken from the undo stack back to disk.
    ///
    /// Nothing is written when another process changed the document since
    /// the last mutation.
    fn restore_snapshot(&mut self, snapshot: Checklist) -> bool {
        let current = self.cursor_id();
        let _lock = match FileLock::acquire_default(&self.store.dir) {
            Ok(lock) => lock,
            Err(e) => {
                self.set_error(e.to_string());
                return false;
            }
        };
        match self.store.reload() {
            Ok(true) => {
                self.undo_stack.clear();
                self.follow(current);
                self.set_error("list changed on disk; undo history cleared");
                return false;
            }
            Ok(false) => {}
            Err(e) => {
                self.set_error(e.to_string());
                return false;
            }
        }
        if let Err(e) = self.store.restore(snapshot) {
            self.set_error(e.to_string());
            return false;
        }
        self.follow(current);
        true
    }

    pub fn undo(&mut self) {
        let current = self.store.checklist().clone();
        match self.undo_stack.undo(&current) {
            Some(previous) => {
                if self.restore_snapshot(previous) {
                    self.set_status("undone");
                }
            }
            None => self.set_status("nothing to undo"),
        }
    }

    pub fn redo(&mut self) {
        let current = self.store.checklist().clone();
        match self.undo_stack.redo(&current) {
            Some(next) => {
                if self.restore_snapshot(next) {
                    self.set_status("redone");
                }
            }
            None => self.set_status("nothing to redo"),
        }
    }

    /// Load a change seen by the watcher once the user is back in Navigate
    /// mode. Until then it stays pending.
    pub fn sync_pending_reload(&mut self) {
        if self.pending_reload && self.mode == Mode::Navigate {
            self.pending_reload = false;
            self.reload_external();
        }
    }

    /// Pick up a change written by another process
    pub fn reload_external(&mut self) {
        let current = self.cursor_id();
        match self.store.reload() {
            Ok(true) => {
                self.undo_stack.clear();
                self.follow(current);
                self.set_status("list changed on disk; reloaded");
            }
            Ok(false) => {}
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Search regex for highlighting: the query being typed in Search mode,
    /// otherwise the last executed search.
    pub fn active_search_re(&self) -> Option<Regex> {
        let pattern = match self.mode {
            Mode::Search if !self.search_input.is_empty() => self.search_input.as_str(),
            Mode::Search => return None,
            _ => self.last_search.as_deref()?,
        };
        search::compile_pattern(pattern)
    }

    /// View positions whose text matches the active search
    pub fn search_matches(&self) -> Vec<usize> {
        let Some(re) = self.active_search_re() else {
            return Vec::new();
        };
        let list = self.store.checklist();
        self.view_indices()
            .iter()
            .enumerate()
            .filter(|(_, i)| re.is_match(&list.items[**i].text))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Move the cursor to the next or previous match, wrapping around.
    /// Returns false when nothing matches.
    pub fn jump_to_match(&mut self, forward: bool, include_current: bool) -> bool {
        let matches = self.search_matches();
        let (Some(&first), Some(&last)) = (matches.first(), matches.last()) else {
            return false;
        };
        let cur = self.cursor;
        self.cursor = if forward {
            matches
                .iter()
                .copied()
                .find(|&p| p > cur || (include_current && p == cur))
                .unwrap_or(first)
        } else {
            matches
                .iter()
                .rev()
                .copied()
                .find(|&p| p < cur)
                .unwrap_or(last)
        };
        true
    }
}

/// Restore filter, cursor and last search from .state.json
pub fn restore_ui_state(app: &mut App) {
    let Some(state) = read_ui_state(&app.store.dir) else {
        return;
    };
    app.filter = state.filter;
    app.last_search = state.last_search;
    app.follow(state.cursor_id.map(ItemId::from));
}

/// Save UI state to .state.json
pub fn save_ui_state(app: &App) {
    let state = UiState {
        filter: app.filter,
        cursor_id: app.cursor_id().map(|id| id.to_string()),
        last_search: app.last_search.clone(),
    };
    let _ = write_ui_state(&app.store.dir, &state);
}

/// Run the TUI application
pub fn run(start: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let root = store::discover_root(start)?;
    let store = {
        let _lock = FileLock::acquire_default(&root.join(DIR_NAME))?;
        ChecklistStore::open(&root)?
    };
    // Without a watcher, outside edits show up at the next mutation
    let watcher = DocumentWatcher::start(&store.dir, &store.config.storage.file_name()).ok();

    let mut app = App::new(store);
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&DocumentWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                    // Debounced state save: every ~5 key presses
                    save_counter += 1;
                    if save_counter >= 5 {
                        save_ui_state(app);
                        save_counter = 0;
                    }
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if watcher.is_some_and(|w| w.poll()) {
            app.pending_reload = true;
        }
        app.sync_pending_reload();

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
