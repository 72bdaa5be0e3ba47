use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::{centered_rect_fixed, wrap_text};

/// Render the blocking alert; any key dismisses it
pub fn render_alert_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(text) = app.alert.as_deref() else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;

    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let header_style = Style::default()
        .fg(theme.yellow)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Alert", header_style)),
        Line::from(""),
    ];
    for s in wrap_text(" ", text, inner_w) {
        lines.push(Line::from(Span::styled(s, text_style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(" Press any key", dim_style)));

    let popup_h = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.yellow).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn alert_text_is_wrapped_inside_box() {
        let (mut app, _files, _tmp) = app_with_targets(&[]);
        app.show_alert("Failed to delete the file. The target will remain in the list.");
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_alert_popup(frame, &app, area);
        });
        assert!(output.contains("Alert"));
        assert!(output.contains("Failed to delete the file. The target will remain in"));
        assert!(output.contains(" the list."));
        assert!(output.contains("Press any key"));
    }
}
