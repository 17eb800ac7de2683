use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::item::FilterMode;
use crate::tui::app::App;
use crate::util::unicode;

use super::{push_highlighted_spans, spans_width};

/// Render the items of the current view, one per row
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let view = app.view_indices();

    if view.is_empty() {
        app.scroll_offset = 0;
        let message = if app.store.checklist().is_empty() {
            " No items yet. Press a to add one.".to_string()
        } else {
            match app.filter {
                FilterMode::Completed => " Nothing completed yet".to_string(),
                FilterMode::Active => " All done!".to_string(),
                FilterMode::All => String::new(),
            }
        };
        let empty = Paragraph::new(message).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    // Keep the cursor row on screen
    let visible_height = area.height.max(1) as usize;
    let cursor = app.cursor.min(view.len() - 1);
    if cursor < app.scroll_offset {
        app.scroll_offset = cursor;
    } else if cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = cursor.saturating_sub(visible_height - 1);
    }
    app.scroll_offset = app.scroll_offset.min(view.len().saturating_sub(visible_height));

    let search_re = app.active_search_re();
    let match_style = Style::default()
        .fg(app.theme.search_match_fg)
        .bg(app.theme.search_match_bg);
    let width = area.width as usize;
    let list = app.store.checklist();
    let scroll = app.scroll_offset;
    let end = view.len().min(scroll + visible_height);

    let mut lines: Vec<Line> = Vec::new();
    for (pos, &index) in view.iter().enumerate().take(end).skip(scroll) {
        let item = &list.items[index];
        let is_cursor = pos == cursor;
        let row_bg = if is_cursor { app.theme.selection_bg } else { bg };

        let mut spans: Vec<Span> = Vec::new();
        let marker = if is_cursor { "\u{258E}" } else { " " };
        spans.push(Span::styled(
            marker,
            Style::default().fg(app.theme.highlight).bg(row_bg),
        ));
        spans.push(Span::styled(
            format!("[{}] ", item.checkbox_char()),
            Style::default()
                .fg(app.theme.checkbox_color(item.checked))
                .bg(row_bg),
        ));

        let mut text_style = if item.checked {
            Style::default()
                .fg(app.theme.dim)
                .bg(row_bg)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(app.theme.text_bright).bg(row_bg)
        };
        if is_cursor {
            text_style = text_style.add_modifier(Modifier::BOLD);
        }

        let room = width.saturating_sub(spans_width(&spans) + 1);
        let text = unicode::truncate_to_width(&item.text.replace('\n', " "), room);
        push_highlighted_spans(&mut spans, &text, text_style, match_style, search_re.as_ref());

        // Pad cursor line
        if is_cursor {
            let content_width = spans_width(&spans);
            if content_width < width {
                spans.push(Span::styled(
                    " ".repeat(width - content_width),
                    Style::default().bg(row_bg),
                ));
            }
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
