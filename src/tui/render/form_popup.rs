use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::TargetKind;
use crate::tui::app::{App, FormField, Mode, TargetForm};
use crate::tui::theme::Theme;

use super::helpers::{centered_rect_fixed, text_field_spans};

const LABEL_W: usize = 8;

/// Render the add/edit target form
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else {
        return;
    };
    let theme = &app.theme;
    let bg = theme.background;

    let popup_w: u16 = 64.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;
    let field_w = inner_w.saturating_sub(LABEL_W + 2).max(1);
    // Only the focused field shows a cursor, and not while the picker is up
    let active = app.mode == Mode::Form;

    let header_style = Style::default()
        .fg(theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let title = if form.editing_index.is_some() {
        " Edit target"
    } else {
        " Add target"
    };

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(title, header_style)),
        Line::from(""),
    ];

    for field in [FormField::Path, FormField::Name] {
        let (label, text) = match field {
            FormField::Path => ("File", form.path.as_str()),
            _ => ("Name", form.name.as_str()),
        };
        let focused = form.field == field;
        let cursor = (focused && active).then_some(form.cursor);
        let mut spans = vec![label_span(label, focused, theme)];
        spans.extend(text_field_spans(text, cursor, field_w, theme));
        lines.push(Line::from(spans));
    }
    lines.push(kind_line(form, theme));
    lines.push(Line::from(""));

    let placeholder = if form.path.is_empty() {
        " Type a path or press Ctrl+O to browse."
    } else {
        ""
    };
    lines.push(Line::from(Span::styled(placeholder, dim_style)));
    lines.push(Line::from(Span::styled(
        " Tab next \u{00B7} Ctrl+O browse \u{00B7} Enter save \u{00B7} Esc cancel",
        dim_style,
    )));

    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}

fn label_span(label: &str, focused: bool, theme: &Theme) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(theme.highlight)
            .bg(theme.background)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text).bg(theme.background)
    };
    let marker = if focused { "\u{25B8}" } else { " " };
    Span::styled(format!("{}{:<w$} ", marker, label, w = LABEL_W), style)
}

fn kind_line(form: &TargetForm, theme: &Theme) -> Line<'static> {
    let focused = form.field == FormField::Kind;
    let mut spans = vec![label_span("Type", focused, theme)];
    for kind in [TargetKind::String, TargetKind::Integer] {
        let chosen = form.kind == kind;
        let mark = if chosen { "(\u{2022})" } else { "( )" };
        let style = if chosen {
            Style::default()
                .fg(theme.kind_color(kind))
                .bg(theme.background)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim).bg(theme.background)
        };
        spans.push(Span::styled(format!("{} {}   ", mark, kind), style));
    }
    Line::from(spans)
}
