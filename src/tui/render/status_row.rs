use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

use super::spans_width;

const NAVIGATE_HINTS: &str = "a add  space toggle  e edit  d delete  / search  ? help  q quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let (mut spans, hint): (Vec<Span>, &str) = match app.mode {
        Mode::Search => (
            // Search prompt: /pattern▌
            vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ],
            "Enter search  Esc cancel",
        ),
        Mode::Add => (Vec::new(), "Enter newline  Ctrl-S save  Esc cancel"),
        Mode::Edit => (Vec::new(), "Enter save  Esc cancel"),
        Mode::Confirm => (Vec::new(), "y confirm  n cancel"),
        Mode::Navigate => match &app.last_search {
            Some(pattern) => (
                vec![Span::styled(format!("/{}", pattern), dim)],
                "n/N next/prev  Esc clear",
            ),
            None => (
                Vec::new(),
                if app.show_key_hints { NAVIGATE_HINTS } else { "" },
            ),
        },
    };

    // A status message replaces the left side
    if let Some(status) = &app.status {
        let color = if status.is_error {
            app.theme.red
        } else {
            app.theme.text_bright
        };
        spans = vec![Span::styled(
            status.text.clone(),
            Style::default().fg(color).bg(bg),
        )];
    }

    let content_width = spans_width(&spans);
    let hint_width = hint.chars().count();
    if !hint.is_empty() && content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, dim));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
