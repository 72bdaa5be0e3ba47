use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::registry::RegistryError;
use crate::tui::app::{App, Mode};

pub(super) const DELETE_FAILED_ALERT: &str =
    "Failed to delete the file. The target will remain in the list.";

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        // Remove the target only
        KeyCode::Char('r') | KeyCode::Char('y') => confirm_remove(app, false),
        // Remove the target and delete its file
        KeyCode::Char('D') => confirm_remove(app, true),
        // Cancel: n or Esc
        KeyCode::Char('n') | KeyCode::Esc => {
            app.confirm_delete = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

fn confirm_remove(app: &mut App, also_delete_file: bool) {
    let index = app.confirm_delete.take();
    app.mode = Mode::Navigate;
    let Some(index) = index else {
        return;
    };

    match app.registry.remove(index, also_delete_file) {
        Ok(removed) => {
            app.status_message = Some(if also_delete_file {
                format!("removed \"{}\" and deleted its file", removed.display_name)
            } else {
                format!("removed \"{}\"", removed.display_name)
            });
        }
        Err(RegistryError::DeleteFailed { .. }) => app.show_alert(DELETE_FAILED_ALERT),
        Err(e) => app.show_alert(e.to_string()),
    }
    app.after_mutation();
}
