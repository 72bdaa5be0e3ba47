use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::TargetKind;
use crate::tui::app::{App, FormField, Mode, TargetForm};

use super::*;

pub(super) const NO_FILE_ALERT: &str = "Please select a target file";

pub(super) fn open_add_form(app: &mut App) {
    app.form = Some(TargetForm::for_add());
    app.mode = Mode::Form;
}

pub(super) fn open_edit_form(app: &mut App) {
    let Some(target) = app.selected_target() else {
        return;
    };
    app.form = Some(TargetForm::for_edit(app.cursor, target));
    app.mode = Mode::Form;
}

pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let Some(form) = &mut app.form else {
        app.mode = Mode::Navigate;
        return;
    };

    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.form = None;
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Enter) => submit_form(app),
        (KeyModifiers::CONTROL, KeyCode::Char('o')) => open_picker(app),
        (_, KeyCode::Tab) | (_, KeyCode::Down) => form.focus(form.field.next()),
        (_, KeyCode::BackTab) | (_, KeyCode::Up) => form.focus(form.field.prev()),
        _ if form.field == FormField::Kind => match key.code {
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right => {
                form.kind = form.kind.toggled();
            }
            KeyCode::Char('s') => form.kind = TargetKind::String,
            KeyCode::Char('i') => form.kind = TargetKind::Integer,
            _ => {}
        },
        _ => {
            let mut cursor = form.cursor;
            if let Some(field) = form.focused_text() {
                edit_text_key(field, &mut cursor, key);
            }
            form.cursor = cursor;
        }
    }
}

/// Create or update from the form. An empty path raises an alert and
/// leaves the form open.
fn submit_form(app: &mut App) {
    let Some(form) = app.form.clone() else {
        return;
    };

    let Some(path) = resolve_form_path(&form.path) else {
        app.show_alert(NO_FILE_ALERT);
        return;
    };
    let name = match form.name.trim() {
        "" => default_name(&path),
        name => name.to_string(),
    };

    let result = match form.editing_index {
        None => app
            .registry
            .create(path, &name, form.kind)
            .map(|_| format!("added \"{}\"", name)),
        Some(index) => app
            .registry
            .update(index, path, &name, form.kind)
            .map(|()| format!("updated \"{}\"", name)),
    };

    app.form = None;
    app.mode = Mode::Navigate;
    match result {
        Ok(msg) => {
            if form.editing_index.is_none() {
                app.cursor = app.registry.len().saturating_sub(1);
            }
            app.status_message = Some(msg);
        }
        Err(e) => app.show_alert(e.to_string()),
    }
    app.after_mutation();
}

/// Expand `~` and make the typed path absolute. None when blank.
pub(super) fn resolve_form_path(raw: &str) -> Option<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let expanded = match raw.strip_prefix("~/") {
        Some(rest) => match std::env::var("HOME") {
            Ok(home) if !home.is_empty() => Path::new(&home).join(rest),
            _ => PathBuf::from(raw),
        },
        None => PathBuf::from(raw),
    };
    Some(std::path::absolute(&expanded).unwrap_or(expanded))
}

pub(super) fn default_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::input::tests::{press, press_mod, type_str};
    use crate::tui::render::test_helpers::app_with_targets;

    #[test]
    fn empty_path_alerts_and_keeps_form() {
        let (mut app, _files, _tmp) = app_with_targets(&[]);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.alert.as_deref(), Some(NO_FILE_ALERT));
        assert_eq!(app.mode, Mode::Form);
        assert!(app.form.is_some());
        assert!(app.registry.is_empty());

        // Dismissing the alert returns to the form
        press(&mut app, KeyCode::Char('x'));
        assert!(app.alert.is_none());
        assert_eq!(app.mode, Mode::Form);
    }

    #[test]
    fn add_integer_target_through_form() {
        let (mut app, files, _tmp) = app_with_targets(&[]);
        files.put("/t/count.txt", "abc");

        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "/t/count.txt");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "Count");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.form.as_ref().unwrap().kind, TargetKind::Integer);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Navigate);
        let t = &app.registry.targets()[0];
        assert_eq!(t.display_name, "Count");
        assert_eq!(t.kind, TargetKind::Integer);
        assert_eq!(t.content, "0");
        assert_eq!(files.get("/t/count.txt").as_deref(), Some("0"));
        assert_eq!(app.status_message.as_deref(), Some("added \"Count\""));
    }

    #[test]
    fn blank_name_defaults_to_file_stem() {
        let (mut app, _files, _tmp) = app_with_targets(&[]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "/t/score.txt");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.registry.targets()[0].display_name, "score");
    }

    #[test]
    fn cursor_follows_new_target() {
        let (mut app, _files, _tmp) =
            app_with_targets(&[("/t/a.txt", "a", TargetKind::Integer, "1")]);
        press(&mut app, KeyCode::Char('a'));
        type_str(&mut app, "/t/b.txt");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn edit_form_renames_without_rereading() {
        let (mut app, files, _tmp) =
            app_with_targets(&[("/t/a.txt", "Old", TargetKind::String, "kept")]);
        files.put("/t/a.txt", "changed on disk");
        let reads = files.reads();

        press(&mut app, KeyCode::Char('E'));
        assert_eq!(app.form.as_ref().unwrap().field, FormField::Name);
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        type_str(&mut app, "New");
        press(&mut app, KeyCode::Enter);

        let t = &app.registry.targets()[0];
        assert_eq!(t.display_name, "New");
        assert_eq!(t.content, "kept");
        assert_eq!(files.reads(), reads);
    }

    #[test]
    fn esc_discards_form() {
        let (mut app, _files, _tmp) = app_with_targets(&[]);
        press_mod(&mut app, KeyCode::Char('n'), KeyModifiers::CONTROL);
        type_str(&mut app, "/t/x.txt");
        press(&mut app, KeyCode::Esc);
        assert!(app.form.is_none());
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.registry.is_empty());
    }

    #[test]
    fn kind_field_letter_shortcuts() {
        let (mut app, _files, _tmp) = app_with_targets(&[]);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.form.as_ref().unwrap().field, FormField::Kind);
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.form.as_ref().unwrap().kind, TargetKind::Integer);
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.form.as_ref().unwrap().kind, TargetKind::String);
    }

    #[test]
    fn resolve_form_path_cases() {
        assert_eq!(resolve_form_path("   "), None);
        assert_eq!(
            resolve_form_path("/t/a.txt"),
            Some(PathBuf::from("/t/a.txt"))
        );
        assert!(resolve_form_path("rel.txt").unwrap().is_absolute());
    }
}
