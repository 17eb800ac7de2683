use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::store::ChecklistStore;
use crate::io::store::test_support::create_checklist;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen for `app`.
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}

/// Build an App over a fresh checklist on disk. `raw` holds one item per
/// line; the items at the `checked` positions are marked done.
pub fn app_with_items(raw: &str, checked: &[usize]) -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    create_checklist(tmp.path());
    let mut store = ChecklistStore::open(tmp.path()).unwrap();
    if !raw.is_empty() {
        store.add_items(raw).unwrap();
    }
    for &pos in checked {
        let id = store.checklist().items[pos].id.clone();
        store.set_checked(&id, true).unwrap();
    }
    (tmp, App::new(store))
}
