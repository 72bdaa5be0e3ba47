use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::file_service::FsFileService;
use crate::io::store::TargetStore;
use crate::model::{AppConfig, Target, TargetKind};
use crate::ops::registry::TargetRegistry;

use super::input;
use super::picker::FilePickerState;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Inline edit of a string target's content
    Edit,
    /// Add/edit target modal
    Form,
    /// File picker opened from the form
    Picker,
    /// Delete confirmation
    Confirm,
    /// Choosing a drop position for a target
    Move,
}

/// In-progress inline edit. `cursor` is a byte offset into `buffer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineEdit {
    pub index: usize,
    pub buffer: String,
    pub cursor: usize,
    /// Column to aim for when moving between lines
    pub sticky_col: Option<usize>,
}

impl InlineEdit {
    pub fn new(index: usize, content: &str) -> Self {
        InlineEdit {
            index,
            buffer: content.to_string(),
            cursor: content.len(),
            sticky_col: None,
        }
    }
}

/// Focused field in the add/edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Path,
    Name,
    Kind,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Path => FormField::Name,
            FormField::Name => FormField::Kind,
            FormField::Kind => FormField::Path,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Path => FormField::Kind,
            FormField::Name => FormField::Path,
            FormField::Kind => FormField::Name,
        }
    }
}

/// Add/edit form state. `editing_index` is `None` when adding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetForm {
    pub editing_index: Option<usize>,
    pub path: String,
    pub name: String,
    pub kind: TargetKind,
    pub field: FormField,
    /// Byte offset into the focused text field
    pub cursor: usize,
}

impl TargetForm {
    pub fn for_add() -> Self {
        TargetForm {
            editing_index: None,
            path: String::new(),
            name: String::new(),
            kind: TargetKind::String,
            field: FormField::Path,
            cursor: 0,
        }
    }

    pub fn for_edit(index: usize, target: &Target) -> Self {
        let name = target.display_name.clone();
        TargetForm {
            editing_index: Some(index),
            path: target.path.to_string_lossy().into_owned(),
            cursor: name.len(),
            name,
            kind: target.kind,
            field: FormField::Name,
        }
    }

    /// The focused text field, if the focus is on one
    pub fn focused_text(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Path => Some(&mut self.path),
            FormField::Name => Some(&mut self.name),
            FormField::Kind => None,
        }
    }

    /// Move focus and park the cursor at the end of the new field.
    pub fn focus(&mut self, field: FormField) {
        self.field = field;
        self.cursor = match field {
            FormField::Path => self.path.len(),
            FormField::Name => self.name.len(),
            FormField::Kind => 0,
        };
    }
}

/// Move mode: `from` is the target being moved, `to` the drop position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveState {
    pub from: usize,
    pub to: usize,
}

/// Main application state
pub struct App {
    pub registry: TargetRegistry,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Selected target index
    pub cursor: usize,
    /// First visible row of the target list
    pub scroll_offset: usize,
    pub editing: Option<InlineEdit>,
    pub form: Option<TargetForm>,
    pub picker: Option<FilePickerState>,
    pub confirm_delete: Option<usize>,
    pub move_state: Option<MoveState>,
    /// Blocking alert; any key dismisses it
    pub alert: Option<String>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub help_scroll: usize,
    pub big_step: i64,
    pub show_key_hints: bool,
    /// Picker file filter
    pub extensions: Vec<String>,
}

impl App {
    pub fn new(registry: TargetRegistry, config: &AppConfig) -> Self {
        App {
            registry,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            cursor: 0,
            scroll_offset: 0,
            editing: None,
            form: None,
            picker: None,
            confirm_delete: None,
            move_state: None,
            alert: None,
            status_message: None,
            show_help: false,
            help_scroll: 0,
            big_step: config.ui.big_step,
            show_key_hints: config.ui.show_key_hints,
            extensions: config.files.extensions.clone(),
        }
    }

    pub fn selected_target(&self) -> Option<&Target> {
        self.registry.get(self.cursor)
    }

    /// Keep the cursor inside the list after it shrinks.
    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.registry.len().saturating_sub(1));
    }

    /// Surface warnings from degraded writes/saves as a blocking alert.
    pub fn after_mutation(&mut self) {
        self.clamp_cursor();
        let warnings = self.registry.take_warnings();
        if warnings.is_empty() {
            return;
        }
        let mut text = warnings.join("\n");
        text.push_str(&format!(
            "\n\nDetails were saved to {}",
            self.registry.recovery_log().display()
        ));
        self.show_alert(text);
    }

    pub fn show_alert(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::debug!("alert: {}", text);
        self.alert = Some(text);
    }

    /// Drop every modal and inline edit without touching the registry.
    pub fn close_modals(&mut self) {
        self.editing = None;
        self.form = None;
        self.picker = None;
        self.confirm_delete = None;
        if let Some(ms) = self.move_state.take() {
            self.cursor = ms.from;
        }
        self.mode = Mode::Navigate;
    }
}

/// Run the TUI application
pub fn run(store: TargetStore, config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("opening store {}", store.path().display());
    let registry = TargetRegistry::open(Box::new(FsFileService), store);
    let mut app = App::new(registry, &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    log::info!("exiting with {} targets", app.registry.len());
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::app_with_targets;

    #[test]
    fn form_field_cycle() {
        assert_eq!(FormField::Path.next(), FormField::Name);
        assert_eq!(FormField::Kind.next(), FormField::Path);
        assert_eq!(FormField::Path.prev(), FormField::Kind);
    }

    #[test]
    fn form_for_edit_focuses_name() {
        let target = Target {
            path: "/t/a.txt".into(),
            display_name: "Alpha".into(),
            kind: TargetKind::Integer,
            content: "3".into(),
        };
        let form = TargetForm::for_edit(2, &target);
        assert_eq!(form.editing_index, Some(2));
        assert_eq!(form.path, "/t/a.txt");
        assert_eq!(form.field, FormField::Name);
        assert_eq!(form.cursor, 5);
    }

    #[test]
    fn close_modals_restores_cursor_after_move() {
        let (mut app, _files, _tmp) = app_with_targets(&[
            ("/t/a.txt", "a", TargetKind::Integer, "1"),
            ("/t/b.txt", "b", TargetKind::Integer, "2"),
        ]);
        app.mode = Mode::Move;
        app.move_state = Some(MoveState { from: 0, to: 1 });
        app.cursor = 1;
        app.close_modals();
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.cursor, 0);
        assert!(app.move_state.is_none());
    }

    #[test]
    fn after_mutation_turns_warnings_into_alert() {
        let (mut app, files, _tmp) =
            app_with_targets(&[("/t/a.txt", "a", TargetKind::Integer, "1")]);
        files.fail_writes_to("/t/a.txt");
        app.registry.adjust(0, 1).unwrap();
        app.after_mutation();
        let alert = app.alert.expect("alert");
        assert!(alert.contains("/t/a.txt"));
        assert!(alert.contains("recovery.log"));
    }
}
