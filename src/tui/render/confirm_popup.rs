use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, ConfirmAction};
use crate::util::unicode;

use super::centered_rect_fixed;

/// Render the y/n prompt for a pending destructive action
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(action) = &app.confirm_action else {
        return;
    };
    let popup_w: u16 = 48.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(4) as usize;

    let question = match action {
        ConfirmAction::DeleteItem(id) => {
            let text = app
                .store
                .checklist()
                .get(id)
                .map(|item| item.text.as_str())
                .unwrap_or("?");
            format!("Delete \u{201c}{}\u{201d}?", text)
        }
        ConfirmAction::ClearAll => {
            format!("Delete all {} items?", app.store.checklist().len())
        }
    };

    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let lines = vec![
        Line::from(Span::styled(
            format!(" {}", unicode::truncate_to_width(&question, inner_w)),
            text_style,
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y", key_style),
            Span::styled(" yes   ", dim_style),
            Span::styled("n", key_style),
            Span::styled(" no", dim_style),
        ]),
    ];

    let popup_area = centered_rect_fixed(popup_w, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Mode;
    use crate::tui::render::test_helpers::{TERM_H, TERM_W, app_with_items, render_to_string};

    #[test]
    fn delete_prompt_names_item() {
        let (_tmp, mut app) = app_with_items("Buy milk", &[]);
        app.confirm_action = Some(ConfirmAction::DeleteItem(app.cursor_id().unwrap()));
        app.mode = Mode::Confirm;
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert!(out.contains("Delete \u{201c}Buy milk\u{201d}?"));
        assert!(out.contains("y yes"));
    }

    #[test]
    fn clear_prompt_counts_items() {
        let (_tmp, mut app) = app_with_items("a\nb\nc", &[]);
        app.confirm_action = Some(ConfirmAction::ClearAll);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert!(out.contains("Delete all 3 items?"));
    }

    #[test]
    fn nothing_without_pending_action() {
        let (_tmp, app) = app_with_items("a", &[]);
        let out = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert_eq!(out, "");
    }
}
