use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, Mode};

use super::centered_rect_fixed;

/// Render the text box used by Add and Edit mode, with the terminal cursor
/// placed at the edit position.
pub fn render_input_box(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let title = match app.mode {
        Mode::Edit => " Edit item ",
        _ => " Add items (one per line) ",
    };

    let buffer = &app.edit_buffer;
    let line_count = buffer.text.split('\n').count();
    let inner_h = match app.mode {
        Mode::Edit => 1,
        _ => line_count.clamp(3, 10),
    };
    let width = area.width.saturating_sub(8).clamp(20, 72);
    let box_area = centered_rect_fixed(width, inner_h as u16 + 2, area);
    let inner_w = box_area.width.saturating_sub(2) as usize;
    let inner_h = box_area.height.saturating_sub(2) as usize;

    // Scroll so the cursor stays inside the box
    let (line, col) = buffer.cursor_line_col();
    let row_off = line.saturating_sub(inner_h.saturating_sub(1));
    let col_off = (col + 1).saturating_sub(inner_w);

    frame.render_widget(Clear, box_area);

    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let lines: Vec<Line> = buffer
        .text
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((row_off as u16, col_off as u16))
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, box_area);

    frame.set_cursor_position(Position::new(
        box_area.x + 1 + (col - col_off) as u16,
        box_area.y + 1 + (line - row_off) as u16,
    ));
}
