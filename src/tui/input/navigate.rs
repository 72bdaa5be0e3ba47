use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::registry::RegistryError;
use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Cursor
        (_, KeyCode::Char('j')) | (_, KeyCode::Down) => move_cursor(app, 1),
        (_, KeyCode::Char('k')) | (_, KeyCode::Up) => move_cursor(app, -1),
        (_, KeyCode::Char('g')) | (_, KeyCode::Home) => app.cursor = 0,
        (_, KeyCode::Char('G')) | (_, KeyCode::End) => {
            app.cursor = app.registry.len().saturating_sub(1);
        }

        // Counter steps
        (_, KeyCode::Char('+')) | (_, KeyCode::Char('=')) => step(app, 1),
        (_, KeyCode::Char('-')) => step(app, -1),
        (_, KeyCode::Char(']')) => step(app, app.big_step),
        (_, KeyCode::Char('[')) => step(app, app.big_step.saturating_neg()),

        // Inline edit
        (_, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char('e')) => begin_edit(app),

        // Reorder
        (KeyModifiers::NONE, KeyCode::Char('m')) => enter_move_mode(app),
        (_, KeyCode::Char('J')) => nudge(app, 1),
        (_, KeyCode::Char('K')) => nudge(app, -1),

        // Add / edit / delete
        (KeyModifiers::NONE, KeyCode::Char('a')) | (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
            open_add_form(app);
        }
        (_, KeyCode::Char('E')) => open_edit_form(app),
        (KeyModifiers::NONE, KeyCode::Char('d')) | (_, KeyCode::Delete) => begin_delete(app),

        (_, KeyCode::Char('?')) => app.show_help = true,
        (KeyModifiers::NONE, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Esc) => app.status_message = None,
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    if app.registry.is_empty() {
        return;
    }
    let max = app.registry.len() - 1;
    app.cursor = app.cursor.saturating_add_signed(delta).min(max);
}

/// Adjust the selected counter by `delta`.
pub(super) fn step(app: &mut App, delta: i64) {
    let Some(target) = app.selected_target() else {
        return;
    };
    let name = target.display_name.clone();
    match app.registry.adjust(app.cursor, delta) {
        Ok(value) => app.status_message = Some(format!("{}: {}", name, value)),
        Err(RegistryError::NotAnInteger { .. }) => {
            app.status_message = Some(format!("\"{}\" is a string target", name));
        }
        Err(e) => app.show_alert(e.to_string()),
    }
    app.after_mutation();
}

fn begin_delete(app: &mut App) {
    if app.selected_target().is_none() {
        return;
    }
    app.confirm_delete = Some(app.cursor);
    app.mode = Mode::Confirm;
}
