use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::TargetKind;
use crate::tui::app::{App, InlineEdit, Mode};
use crate::util::unicode;

use super::*;

/// Start editing the selected string target inline. Any other edit in
/// progress is dropped.
pub(super) fn begin_edit(app: &mut App) {
    let Some(target) = app.selected_target() else {
        return;
    };
    if target.kind != TargetKind::String {
        app.status_message = Some("integer target: use + - [ ] to change it".into());
        return;
    }
    app.editing = Some(InlineEdit::new(app.cursor, &target.content));
    app.mode = Mode::Edit;
}

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => cancel_edit(app),
        (m, KeyCode::Enter) if m.intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) => {
            if let Some(edit) = &mut app.editing {
                insert_at_cursor(&mut edit.buffer, &mut edit.cursor, "\n");
                edit.sticky_col = None;
            }
        }
        (_, KeyCode::Enter) => commit_edit(app),
        _ => {
            let Some(edit) = &mut app.editing else {
                app.mode = Mode::Navigate;
                return;
            };
            edit_multiline_key(edit, key);
        }
    }
}

fn commit_edit(app: &mut App) {
    let Some(edit) = app.editing.take() else {
        app.mode = Mode::Navigate;
        return;
    };
    app.mode = Mode::Navigate;
    match app.registry.set_content(edit.index, &edit.buffer) {
        Ok(()) => {
            app.status_message = Some("saved".into());
        }
        Err(e) => app.show_alert(e.to_string()),
    }
    app.after_mutation();
}

fn cancel_edit(app: &mut App) {
    app.editing = None;
    app.mode = Mode::Navigate;
}

/// Editing keys for a buffer that may span several lines. Home/End and
/// Up/Down act on the current line.
fn edit_multiline_key(edit: &mut InlineEdit, key: KeyEvent) {
    let buf = &edit.buffer;
    let start = line_start(buf, edit.cursor);
    let end = line_end(buf, edit.cursor);

    match key.code {
        KeyCode::Home => {
            edit.cursor = start;
            edit.sticky_col = None;
        }
        KeyCode::End => {
            edit.cursor = end;
            edit.sticky_col = None;
        }
        KeyCode::Up => {
            if start == 0 {
                return;
            }
            let col = sticky_col(edit, start);
            let prev_end = start - 1;
            let prev_start = line_start(buf, prev_end);
            edit.cursor =
                prev_start + unicode::display_col_to_byte_offset(&buf[prev_start..prev_end], col);
            edit.sticky_col = Some(col);
        }
        KeyCode::Down => {
            if end == buf.len() {
                return;
            }
            let col = sticky_col(edit, start);
            let next_start = end + 1;
            let next_end = line_end(buf, next_start);
            edit.cursor =
                next_start + unicode::display_col_to_byte_offset(&buf[next_start..next_end], col);
            edit.sticky_col = Some(col);
        }
        _ => {
            if edit_text_key(&mut edit.buffer, &mut edit.cursor, key) {
                edit.sticky_col = None;
            }
        }
    }
}

fn sticky_col(edit: &InlineEdit, line_start: usize) -> usize {
    edit.sticky_col.unwrap_or_else(|| {
        unicode::byte_offset_to_display_col(&edit.buffer[line_start..], edit.cursor - line_start)
    })
}

fn line_start(buf: &str, cursor: usize) -> usize {
    buf[..cursor].rfind('\n').map_or(0, |i| i + 1)
}

fn line_end(buf: &str, cursor: usize) -> usize {
    buf[cursor..].find('\n').map_or(buf.len(), |i| cursor + i)
}
