use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &mut App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(60, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let big_desc = format!("Add / subtract {}", app.big_step);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Navigation", header_style)));
    add_binding(&mut lines, " \u{2191}\u{2193}/jk", "Move cursor up/down", key_style, desc_style);
    add_binding(&mut lines, " g/G", "Jump to top/bottom", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Counters", header_style)));
    add_binding(&mut lines, " + / -", "Add / subtract 1", key_style, desc_style);
    add_binding(&mut lines, " ] / [", &big_desc, key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Text", header_style)));
    add_binding(&mut lines, " Enter/e", "Edit content inline", key_style, desc_style);
    add_binding(&mut lines, "   Enter", "Save and write the file", key_style, desc_style);
    add_binding(&mut lines, "   Alt+Enter", "New line", key_style, desc_style);
    add_binding(&mut lines, "   Esc", "Discard changes", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Targets", header_style)));
    add_binding(&mut lines, " a / Ctrl+N", "Add a target", key_style, desc_style);
    add_binding(&mut lines, " E", "Edit path, name, type", key_style, desc_style);
    add_binding(&mut lines, " d / Del", "Remove / delete file", key_style, desc_style);
    add_binding(&mut lines, " m", "Move mode (j/k, Enter)", key_style, desc_style);
    add_binding(&mut lines, " J / K", "Move down / up by one", key_style, desc_style);
    lines.push(Line::from(""));

    // Global keys
    lines.push(Line::from(Span::styled(" Global", header_style)));
    add_binding(&mut lines, " Ctrl+S", "Save the list now", key_style, desc_style);
    add_binding(&mut lines, " Esc", "Close dialog / cancel", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q / Ctrl+C", "Quit", key_style, desc_style);

    // Clamp scroll to content
    let inner_h = overlay_area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(inner_h);
    app.help_scroll = app.help_scroll.min(max_scroll);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg))
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!("{:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}

/// Create a centered rectangle of the given percentage of the parent
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
