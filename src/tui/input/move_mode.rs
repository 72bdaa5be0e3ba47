use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode, MoveState};

/// Enter MOVE mode for the target under the cursor.
pub(super) fn enter_move_mode(app: &mut App) {
    if app.selected_target().is_none() {
        return;
    }
    app.move_state = Some(MoveState {
        from: app.cursor,
        to: app.cursor,
    });
    app.mode = Mode::Move;
}

pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    let Some(ms) = app.move_state else {
        app.mode = Mode::Navigate;
        return;
    };
    let last = app.registry.len().saturating_sub(1);

    match key.code {
        // Confirm
        KeyCode::Enter | KeyCode::Char('m') => {
            app.move_state = None;
            app.mode = Mode::Navigate;
            commit_move(app, ms.from, ms.to);
        }
        // Cancel: back to where we started
        KeyCode::Esc => {
            app.move_state = None;
            app.mode = Mode::Navigate;
            app.cursor = ms.from;
        }
        KeyCode::Char('j') | KeyCode::Down => set_drop(app, ms, (ms.to + 1).min(last)),
        KeyCode::Char('k') | KeyCode::Up => set_drop(app, ms, ms.to.saturating_sub(1)),
        KeyCode::Char('g') | KeyCode::Home => set_drop(app, ms, 0),
        KeyCode::Char('G') | KeyCode::End => set_drop(app, ms, last),
        _ => {}
    }
}

fn set_drop(app: &mut App, ms: MoveState, to: usize) {
    app.move_state = Some(MoveState { to, ..ms });
    app.cursor = to;
}

/// Move the selected target one position up or down right away (J/K).
pub(super) fn nudge(app: &mut App, delta: isize) {
    let len = app.registry.len();
    if len < 2 {
        return;
    }
    let from = app.cursor;
    let to = from.saturating_add_signed(delta).min(len - 1);
    commit_move(app, from, to);
}

fn commit_move(app: &mut App, from: usize, to: usize) {
    if from == to {
        app.cursor = to;
        return;
    }
    match app.registry.move_target(from, to) {
        Ok(()) => {
            app.cursor = to;
            app.status_message = Some(format!("moved to #{}", to + 1));
        }
        Err(e) => app.show_alert(e.to_string()),
    }
    app.after_mutation();
}
