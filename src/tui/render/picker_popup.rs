use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::io::paths::abbreviate_path;
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// Render the file picker on top of the form
pub fn render_picker_popup(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();
    let Some(picker) = &mut app.picker else {
        return;
    };
    let bg = theme.background;

    let popup_w: u16 = 70.min(area.width.saturating_sub(2));
    let popup_h: u16 = area.height.saturating_sub(4).max(6);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let inner_w = popup_w.saturating_sub(2) as usize;
    // Title, blank, list, blank, footer
    let list_h = (popup_h as usize).saturating_sub(6).max(1);

    if picker.cursor < picker.scroll_offset {
        picker.scroll_offset = picker.cursor;
    } else if picker.cursor >= picker.scroll_offset + list_h {
        picker.scroll_offset = picker.cursor + 1 - list_h;
    }

    let header_style = Style::default()
        .fg(theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dir_style = Style::default().fg(theme.cyan).bg(bg);
    let file_style = Style::default().fg(theme.text).bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let mut lines: Vec<Line> = Vec::new();
    let title = format!(" {}", abbreviate_path(&picker.dir));
    lines.push(Line::from(Span::styled(
        unicode::truncate_to_width(&title, inner_w),
        header_style,
    )));
    lines.push(Line::from(""));

    if picker.entries.is_empty() {
        lines.push(Line::from(Span::styled(" (nothing here)", dim_style)));
    }
    for (i, entry) in picker
        .entries
        .iter()
        .enumerate()
        .skip(picker.scroll_offset)
        .take(list_h)
    {
        let is_cursor = i == picker.cursor;
        let mut style = if entry.is_dir { dir_style } else { file_style };
        if is_cursor {
            style = style.bg(theme.selection_bg).add_modifier(Modifier::BOLD);
        }
        let marker = if is_cursor { "\u{25B8} " } else { "  " };
        let name = if entry.is_dir && entry.name != ".." {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        let text = unicode::pad_to_width(
            &unicode::truncate_to_width(&format!("{}{}", marker, name), inner_w),
            inner_w,
        );
        lines.push(Line::from(Span::styled(text, style)));
    }

    while lines.len() < list_h + 3 {
        lines.push(Line::from(""));
    }

    let filter = if picker.show_all || picker.extensions.is_empty() {
        "all files".to_string()
    } else {
        picker
            .extensions
            .iter()
            .map(|e| format!("*.{}", e))
            .collect::<Vec<_>>()
            .join(" ")
    };
    lines.push(Line::from(Span::styled(
        format!(
            " {} \u{00B7} . toggle filter \u{00B7} Enter open \u{00B7} \u{232B} up \u{00B7} Esc back",
            filter
        ),
        dim_style,
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .title(Span::styled(" Choose a file ", header_style))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::tui::picker::FilePickerState;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn lists_entries_with_dir_suffix() {
        let (mut app, _files, tmp) = app_with_targets(&[]);
        fs::create_dir(tmp.path().join("logs")).unwrap();
        fs::write(tmp.path().join("score.txt"), "1").unwrap();
        fs::write(tmp.path().join("skip.md"), "1").unwrap();
        app.picker = Some(FilePickerState::open(tmp.path(), &["txt".into()]).unwrap());

        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_picker_popup(frame, &mut app, area);
        });
        assert!(output.contains("Choose a file"));
        assert!(output.contains("\u{25B8} .."));
        assert!(output.contains("logs/"));
        assert!(output.contains("score.txt"));
        assert!(!output.contains("skip.md"));
        assert!(output.contains("*.txt"));
    }

    #[test]
    fn scrolls_to_cursor() {
        let (mut app, _files, tmp) = app_with_targets(&[]);
        for i in 0..40 {
            fs::write(tmp.path().join(format!("f{:02}.txt", i)), "").unwrap();
        }
        let mut picker = FilePickerState::open(tmp.path(), &["txt".into()]).unwrap();
        picker.jump_bottom();
        app.picker = Some(picker);

        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_picker_popup(frame, &mut app, area);
        });
        assert!(output.contains("\u{25B8} f39.txt"));
        assert!(!output.contains("f00.txt"));
        assert!(app.picker.as_ref().unwrap().scroll_offset > 0);
    }
}
