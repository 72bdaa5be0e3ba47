use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::theme::Theme;
use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// Word-wrap `text` into lines of at most `max_width` cells.
/// Every line (including the first) is prefixed with `indent`.
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_w = unicode::display_width(indent);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = indent.to_string();
        let mut width = indent_w;
        for word in paragraph.split_whitespace() {
            let word_w = unicode::display_width(word);
            let space = if width == indent_w { 0 } else { 1 };
            if width + space + word_w > max_width && width > indent_w {
                lines.push(std::mem::replace(&mut current, indent.to_string()));
                width = indent_w;
            }
            if width > indent_w {
                current.push(' ');
                width += 1;
            }
            current.push_str(word);
            width += word_w;
        }
        lines.push(current);
    }
    lines
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Spans for a single-line text field of `width` cells with a block cursor
/// at byte offset `cursor`. Long text scrolls so the cursor stays visible.
pub(super) fn text_field_spans(
    text: &str,
    cursor: Option<usize>,
    width: usize,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let style = Style::default().fg(theme.text_bright).bg(theme.selection_bg);
    let cursor_style = style.add_modifier(Modifier::REVERSED);

    let cursor_col = cursor.map(|c| unicode::byte_offset_to_display_col(text, c));
    let start_col = cursor_col.map_or(0, |c| c.saturating_sub(width.saturating_sub(1)));
    let start = unicode::display_col_to_byte_offset(text, start_col);

    let mut spans = Vec::new();
    let mut used = 0;
    let mut plain = String::new();
    for (i, g) in text[start..].grapheme_indices(true) {
        let gw = unicode::display_width(g);
        if used + gw > width {
            break;
        }
        if cursor == Some(start + i) {
            spans.push(Span::styled(std::mem::take(&mut plain), style));
            spans.push(Span::styled(g.to_string(), cursor_style));
        } else {
            plain.push_str(g);
        }
        used += gw;
    }
    spans.push(Span::styled(plain, style));

    if cursor.is_some_and(|c| c >= text.len()) && used < width {
        spans.push(Span::styled(" ", cursor_style));
        used += 1;
    }
    if used < width {
        spans.push(Span::styled(" ".repeat(width - used), style));
    }
    spans.retain(|s| !s.content.is_empty());
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text(" ", "one two three four", 10),
            vec![" one two", " three", " four"]
        );
        assert_eq!(wrap_text(" ", "a\nb", 10), vec![" a", " b"]);
    }

    #[test]
    fn centered_rect_clamps_to_area() {
        let r = centered_rect_fixed(100, 10, Rect::new(0, 0, 40, 20));
        assert_eq!(r, Rect::new(0, 5, 40, 10));
    }

    #[test]
    fn text_field_pads_and_places_cursor_at_end() {
        let theme = Theme::default();
        let spans = text_field_spans("abc", Some(3), 6, &theme);
        assert_eq!(text_of(&spans), "abc   ");
        assert_eq!(spans_width(&spans), 6);
    }

    #[test]
    fn text_field_scrolls_to_cursor() {
        let theme = Theme::default();
        let spans = text_field_spans("abcdefghij", Some(10), 5, &theme);
        assert_eq!(text_of(&spans), "ghij ");
    }
}
