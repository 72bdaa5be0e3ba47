use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::util::unicode;

/// Fold Shift into the character itself so bindings match on the char alone
/// (Shift+j arrives as 'J' on most terminals, but some also set SHIFT).
pub(super) fn normalize_key(mut key: KeyEvent) -> KeyEvent {
    if let KeyCode::Char(c) = key.code
        && key.modifiers.contains(KeyModifiers::SHIFT)
    {
        if c.is_ascii_lowercase() {
            key.code = KeyCode::Char(c.to_ascii_uppercase());
        }
        key.modifiers.remove(KeyModifiers::SHIFT);
    }
    key
}

/// Save the whole list right away (Ctrl+S).
pub(super) fn save_now(app: &mut App) {
    app.registry.save();
    app.status_message = Some("saved".into());
    app.after_mutation();
}

/// Help overlay intercepts ? and Esc, plus scroll keys
pub(super) fn handle_help(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll = app.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll = app.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => app.help_scroll = 0,
        KeyCode::Char('G') => app.help_scroll = usize::MAX,
        _ => {}
    }
}

pub(super) fn insert_at_cursor(buf: &mut String, cursor: &mut usize, text: &str) {
    let at = (*cursor).min(buf.len());
    buf.insert_str(at, text);
    *cursor = at + text.len();
}

/// Apply a single-line editing key to `buf`. Returns false when the key is
/// not an editing key, so the caller can handle it.
pub(super) fn edit_text_key(buf: &mut String, cursor: &mut usize, key: KeyEvent) -> bool {
    let ctrl_or_alt = key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        KeyCode::Char(c) if !ctrl_or_alt => {
            let mut tmp = [0u8; 4];
            insert_at_cursor(buf, cursor, c.encode_utf8(&mut tmp));
        }
        KeyCode::Backspace => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buf, *cursor) {
                buf.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = unicode::next_grapheme_boundary(buf, *cursor) {
                buf.replace_range(*cursor..next, "");
            }
        }
        KeyCode::Left => {
            if let Some(prev) = unicode::prev_grapheme_boundary(buf, *cursor) {
                *cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = unicode::next_grapheme_boundary(buf, *cursor) {
                *cursor = next;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buf.len(),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn normalize_shift_letters() {
        let k = normalize_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::SHIFT));
        assert_eq!(k.code, KeyCode::Char('J'));
        assert_eq!(k.modifiers, KeyModifiers::NONE);

        let k = normalize_key(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT));
        assert_eq!(k.code, KeyCode::Char('+'));
        assert_eq!(k.modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn typing_and_deleting_graphemes() {
        let mut buf = String::new();
        let mut cursor = 0;
        for c in "ae\u{0301}z".chars() {
            assert!(edit_text_key(&mut buf, &mut cursor, key(KeyCode::Char(c))));
        }
        assert_eq!(buf, "ae\u{0301}z");

        edit_text_key(&mut buf, &mut cursor, key(KeyCode::Left));
        edit_text_key(&mut buf, &mut cursor, key(KeyCode::Backspace));
        assert_eq!(buf, "az");
        assert_eq!(cursor, 1);

        edit_text_key(&mut buf, &mut cursor, key(KeyCode::Home));
        edit_text_key(&mut buf, &mut cursor, key(KeyCode::Delete));
        assert_eq!(buf, "z");
        assert_eq!(cursor, 0);
    }

    #[test]
    fn control_chars_are_not_inserted() {
        let mut buf = String::new();
        let mut cursor = 0;
        let handled = edit_text_key(
            &mut buf,
            &mut cursor,
            KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL),
        );
        assert!(!handled);
        assert!(buf.is_empty());
    }
}
