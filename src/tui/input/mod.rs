mod common;
mod confirm;
mod edit;
mod form;
mod move_mode;
mod navigate;
mod picker;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

// Import all submodule functions into this module's namespace
// so that submodules can access cross-module functions via `use super::*;`
#[allow(unused_imports)]
use common::*;
#[allow(unused_imports)]
use confirm::*;
#[allow(unused_imports)]
use edit::*;
#[allow(unused_imports)]
use form::*;
#[allow(unused_imports)]
use move_mode::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use picker::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    let key = normalize_key(key);

    // An alert blocks everything until dismissed
    if app.alert.is_some() {
        app.alert = None;
        return;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            app.should_quit = true;
            return;
        }
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
            save_now(app);
            return;
        }
        _ => {}
    }

    if app.show_help {
        handle_help(app, key);
        return;
    }

    log::trace!("key {:?} in {:?}", key, app.mode);
    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Edit => handle_edit(app, key),
        Mode::Form => handle_form(app, key),
        Mode::Picker => handle_picker(app, key),
        Mode::Confirm => handle_confirm(app, key),
        Mode::Move => handle_move(app, key),
    }
}

/// Handle a bracketed paste event (terminal sends pasted text as a single string).
/// Inline edits keep newlines; form fields are single-line.
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() || app.alert.is_some() {
        return;
    }
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    match app.mode {
        Mode::Edit => {
            if let Some(edit) = &mut app.editing {
                insert_at_cursor(&mut edit.buffer, &mut edit.cursor, &text);
                edit.sticky_col = None;
            }
        }
        Mode::Form => {
            if let Some(form) = &mut app.form {
                let clean = text.replace('\n', " ");
                let mut cursor = form.cursor;
                if let Some(field) = form.focused_text() {
                    insert_at_cursor(field, &mut cursor, &clean);
                }
                form.cursor = cursor;
            }
        }
        _ => {}
    }
}
