use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::tui::view::{CardBody, TargetCard, ViewState, build_view};
use crate::util::unicode;

use super::helpers::spans_width;

/// Body lines are indented past the number column
const BODY_INDENT: usize = 7;

/// Render the list of target cards, keeping the selected card in view
pub fn render_targets_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;

    if app.registry.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No targets yet.",
                Style::default().fg(app.theme.text).bg(bg),
            )),
            Line::from(Span::styled(
                "  Press a to add a file.",
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
        return;
    }

    let state = ViewState {
        cursor: app.cursor,
        editing: app.editing.as_ref(),
        move_state: app.move_state,
    };
    let cards = build_view(app.registry.targets(), &state);

    let width = area.width as usize;
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_range = (0, 0);
    for card in &cards {
        let start = lines.len();
        push_card(&mut lines, card, app.big_step, width, &app.theme);
        if card.selected {
            selected_range = (start, lines.len());
        }
        lines.push(Line::from(""));
    }

    // Adjust scroll so the selected card is visible
    let height = area.height as usize;
    let (sel_start, sel_end) = selected_range;
    if sel_start < app.scroll_offset {
        app.scroll_offset = sel_start;
    } else if sel_end > app.scroll_offset + height {
        app.scroll_offset = sel_end.saturating_sub(height).min(sel_start);
    }
    app.scroll_offset = app.scroll_offset.min(lines.len().saturating_sub(1));

    let visible: Vec<Line> = lines.into_iter().skip(app.scroll_offset).collect();
    frame.render_widget(Paragraph::new(visible).style(Style::default().bg(bg)), area);
}

fn push_card<'a>(
    lines: &mut Vec<Line<'a>>,
    card: &TargetCard,
    big_step: i64,
    width: usize,
    theme: &Theme,
) {
    let bg = if card.selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().fg(theme.text).bg(bg);
    let dim = Style::default().fg(theme.dim).bg(bg);
    let bright = Style::default()
        .fg(theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    // Header: marker, number, name, type badge, path
    let marker = if card.moving {
        "\u{2195} "
    } else if card.selected {
        "\u{25B8} "
    } else {
        "  "
    };
    let mut header = vec![
        Span::styled(marker, Style::default().fg(theme.highlight).bg(bg)),
        Span::styled(format!("{:>3}  ", card.number), dim),
        Span::styled(card.name.clone(), bright),
        Span::styled("  ", base),
        Span::styled(
            format!("[{}]", card.kind),
            Style::default().fg(theme.kind_color(card.kind)).bg(bg),
        ),
    ];
    let used = spans_width(&header);
    if used + 4 < width {
        let path = unicode::truncate_to_width(&card.path, width - used - 4);
        let pad = width - used - unicode::display_width(&path) - 1;
        header.push(Span::styled(" ".repeat(pad), base));
        header.push(Span::styled(path, dim));
        header.push(Span::styled(" ", base));
    }
    lines.push(Line::from(header));

    let indent = " ".repeat(BODY_INDENT);
    let body_width = width.saturating_sub(BODY_INDENT + 1).max(1);
    let mut body: Vec<Vec<Span<'a>>> = Vec::new();

    match &card.body {
        CardBody::Counter(value) => {
            let button = Style::default().fg(theme.highlight).bg(bg);
            body.push(vec![
                Span::styled(format!("[-{}] [-] ", big_step), button),
                Span::styled(format!(" {} ", value), bright),
                Span::styled(format!(" [+] [+{}]", big_step), button),
            ]);
        }
        CardBody::Text(text_lines) if text_lines.is_empty() => {
            body.push(vec![Span::styled(
                "(empty)",
                dim.add_modifier(Modifier::ITALIC),
            )]);
        }
        CardBody::Text(text_lines) => {
            for line in text_lines {
                for chunk in unicode::hard_wrap(line, body_width) {
                    body.push(vec![Span::styled(chunk, base)]);
                }
            }
        }
        CardBody::Editing {
            lines: edit_lines,
            cursor_line,
            cursor_col,
        } => {
            let edit_style = Style::default().fg(theme.text_bright).bg(bg);
            let cursor_style = Style::default()
                .fg(theme.background)
                .bg(theme.highlight);
            for (i, line) in edit_lines.iter().enumerate() {
                if i != *cursor_line {
                    body.push(vec![Span::styled(line.clone(), edit_style)]);
                    continue;
                }
                let at = unicode::display_col_to_byte_offset(line, *cursor_col);
                let (before, rest) = line.split_at(at);
                let (under, after) = match rest.graphemes(true).next() {
                    Some(g) => (g.to_string(), rest[g.len()..].to_string()),
                    None => (" ".to_string(), String::new()),
                };
                body.push(vec![
                    Span::styled(before.to_string(), edit_style),
                    Span::styled(under, cursor_style),
                    Span::styled(after, edit_style),
                ]);
            }
        }
    }

    for spans in body {
        let mut row = vec![Span::styled(indent.clone(), base)];
        let used = BODY_INDENT + spans_width(&spans);
        row.extend(spans);
        if card.selected && used < width {
            row.push(Span::styled(" ".repeat(width - used), base));
        }
        lines.push(Line::from(row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::{InlineEdit, Mode, MoveState};
    use crate::tui::render::test_helpers::*;

    fn draw(app: &mut App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_targets_view(frame, app, area);
        })
    }

    #[test]
    fn cards_show_number_name_badge_and_body() {
        let (mut app, _files, _tmp) = sample_app();
        let output = draw(&mut app);

        assert!(output.contains("\u{25B8}   1  Wins  [integer]"));
        assert!(output.contains("[-2] [-]  12  [+] [+2]"));
        assert!(output.contains("  2  Stream title  [string]"));
        assert!(output.contains("       Speedrun\n       any%"));
        assert!(output.contains("(empty)"));
        assert!(output.contains("/data/wins.txt"));
    }

    #[test]
    fn empty_list_hint() {
        let (mut app, _files, _tmp) = app_with_targets(&[]);
        let output = draw(&mut app);
        assert!(output.contains("No targets yet."));
        assert!(output.contains("Press a to add a file."));
    }

    #[test]
    fn editing_card_shows_buffer() {
        let (mut app, _files, _tmp) = sample_app();
        app.cursor = 1;
        app.mode = Mode::Edit;
        app.editing = Some(InlineEdit::new(1, "draft text"));
        let output = draw(&mut app);
        assert!(output.contains("draft text"));
        assert!(!output.contains("Speedrun"));
    }

    #[test]
    fn move_preview_reorders_and_marks() {
        let (mut app, _files, _tmp) = sample_app();
        app.mode = Mode::Move;
        app.move_state = Some(MoveState { from: 0, to: 2 });
        app.cursor = 2;
        let output = draw(&mut app);

        let title = output.find("Stream title").unwrap();
        let wins = output.find("Wins").unwrap();
        assert!(title < wins);
        assert!(output.contains("\u{2195}   3  Wins"));
    }

    #[test]
    fn scrolls_to_keep_selection_visible() {
        let rows: Vec<(String, String)> = (0..12)
            .map(|i| (format!("/t/{}.txt", i), format!("Counter {}", i)))
            .collect();
        let specs: Vec<(&str, &str, crate::model::TargetKind, &str)> = rows
            .iter()
            .map(|(p, n)| (p.as_str(), n.as_str(), crate::model::TargetKind::Integer, "0"))
            .collect();
        let (mut app, _files, _tmp) = app_with_targets(&specs);
        app.cursor = 11;
        let output = draw(&mut app);
        assert!(output.contains("Counter 11"));
        assert!(!output.contains("Counter 0 "));
        assert!(app.scroll_offset > 0);
    }
}
