use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, FormField, Mode};
use crate::tui::picker::{FilePickerState, PickerStep};

use super::*;

/// Open the file picker from the form, starting next to the current path.
pub(super) fn open_picker(app: &mut App) {
    let Some(form) = &app.form else {
        return;
    };
    let start = resolve_form_path(&form.path)
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("/"));

    match FilePickerState::open(&start, &app.extensions) {
        Ok(picker) => {
            app.picker = Some(picker);
            app.mode = Mode::Picker;
        }
        Err(e) => app.show_alert(format!("Cannot open the file picker: {}", e)),
    }
}

pub(super) fn handle_picker(app: &mut App, key: KeyEvent) {
    let Some(picker) = &mut app.picker else {
        app.mode = Mode::Form;
        return;
    };

    let result = match key.code {
        KeyCode::Esc => {
            close_picker(app, None);
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            picker.move_cursor(1);
            Ok(())
        }
        KeyCode::Char('k') | KeyCode::Up => {
            picker.move_cursor(-1);
            Ok(())
        }
        KeyCode::Char('g') | KeyCode::Home => {
            picker.jump_top();
            Ok(())
        }
        KeyCode::Char('G') | KeyCode::End => {
            picker.jump_bottom();
            Ok(())
        }
        KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => picker.go_up(),
        KeyCode::Char('.') => picker.toggle_show_all(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => match picker.activate() {
            Ok(PickerStep::Picked(path)) => {
                close_picker(app, Some(path));
                return;
            }
            Ok(PickerStep::Stay) => Ok(()),
            Err(e) => Err(e),
        },
        _ => Ok(()),
    };

    if let Err(e) = result {
        app.show_alert(format!("Cannot open that directory: {}", e));
    }
}

/// Leave the picker. A chosen path fills the form; a blank name is filled
/// from the file stem.
fn close_picker(app: &mut App, picked: Option<PathBuf>) {
    app.picker = None;
    app.mode = Mode::Form;
    let (Some(path), Some(form)) = (picked, &mut app.form) else {
        return;
    };
    log::debug!("picked {}", path.display());
    if form.name.trim().is_empty() {
        form.name = default_name(&path);
    }
    form.path = path.to_string_lossy().into_owned();
    form.focus(FormField::Name);
}
