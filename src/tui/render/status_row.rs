use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::paths::abbreviate_path;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::spans_width;

/// Render the title bar (top of screen)
pub fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let count = app.registry.len();
    let mut spans = vec![
        Span::styled(
            " foobs",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} target{}", count, if count == 1 { "" } else { "s" }),
            Style::default().fg(app.theme.text).bg(bg),
        ),
    ];

    let used = spans_width(&spans);
    if used + 4 < width {
        let store = unicode::truncate_to_width(
            &abbreviate_path(app.registry.store_path()),
            width - used - 4,
        );
        let pad = width - used - unicode::display_width(&store) - 1;
        spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
        spans.push(Span::styled(store, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Key hints for the current mode
fn mode_hint(app: &App) -> &'static str {
    match app.mode {
        Mode::Navigate if app.registry.is_empty() => "a add  ? help  q quit",
        Mode::Navigate => "+/- step  e edit  a add  E change  d remove  m move  ? help",
        Mode::Edit => "Enter save  Alt+Enter newline  Esc cancel",
        Mode::Form => "Tab next  Ctrl+O browse  Enter save  Esc cancel",
        Mode::Picker => "Enter open  \u{232B} up  . filter  Esc back",
        Mode::Confirm => "r/y remove  D delete file  n cancel",
        Mode::Move => "j/k position  Enter drop  Esc cancel",
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let label = match app.mode {
        Mode::Edit => Some(("-- EDIT --", app.theme.green)),
        Mode::Move => Some(("-- MOVE --", app.theme.yellow)),
        _ => None,
    };

    let mut spans = Vec::new();
    if let Some((text, color)) = label {
        spans.push(Span::styled(
            format!(" {} ", text),
            Style::default()
                .fg(color)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(msg) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", msg),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }

    if app.show_key_hints {
        let hint = mode_hint(app);
        let content_width = spans_width(&spans);
        let hint_width = unicode::display_width(hint) + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(
                hint,
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
