use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Gauge, Paragraph};

use crate::model::item::Progress;
use crate::ops::view;
use crate::tui::app::App;

/// Gauge label, e.g. "3/4 (75%)"
pub fn progress_label(p: &Progress) -> String {
    format!("{}/{} ({}%)", p.completed, p.total, p.percent)
}

/// Render the completion gauge for the whole list
pub fn render_progress_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let p = view::progress(app.store.checklist());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let pad = Paragraph::new(" ").style(Style::default().bg(bg));
    frame.render_widget(pad.clone(), chunks[0]);
    frame.render_widget(pad, chunks[2]);

    let fill = if p.total > 0 && p.completed == p.total {
        app.theme.green
    } else {
        app.theme.highlight
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(fill).bg(app.theme.selection_bg))
        .percent(u16::from(p.percent))
        .label(Span::styled(
            progress_label(&p),
            Style::default().fg(app.theme.text_bright),
        ));
    frame.render_widget(gauge, chunks[1]);
}
