use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::io::paths::abbreviate_path;
use crate::tui::app::App;

use super::helpers::{centered_rect_fixed, wrap_text};

/// Render the delete confirmation for the target in `app.confirm_delete`
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(target) = app.confirm_delete.and_then(|i| app.registry.get(i)) else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;

    let popup_w: u16 = 52.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let header_style = Style::default()
        .fg(theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(theme.text).bg(bg);
    let bright_style = Style::default().fg(theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);
    let key_style = Style::default()
        .fg(theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Remove target", header_style)),
        Line::from(""),
    ];
    for s in wrap_text(" ", &format!("\u{201c}{}\u{201d}", target.display_name), inner_w) {
        lines.push(Line::from(Span::styled(s, bright_style)));
    }
    for s in wrap_text(" ", &abbreviate_path(&target.path), inner_w) {
        lines.push(Line::from(Span::styled(s, dim_style)));
    }
    lines.push(Line::from(""));

    for (key, desc) in [
        ("r/y", "remove from the list"),
        ("D", "remove and delete the file"),
        ("n", "cancel"),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<5}", key), key_style),
            Span::styled(desc, text_style),
        ]));
    }

    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.red).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Mode;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn shows_target_and_choices() {
        let (mut app, _files, _tmp) = sample_app();
        app.confirm_delete = Some(1);
        app.mode = Mode::Confirm;
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert!(output.contains("Remove target"));
        assert!(output.contains("\u{201c}Stream title\u{201d}"));
        assert!(output.contains("/data/title.txt"));
        assert!(output.contains(" r/y  remove from the list"));
        assert!(output.contains(" D    remove and delete the file"));
        assert!(output.contains(" n    cancel"));
    }
}
