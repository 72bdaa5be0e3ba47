use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One row in the picker listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// What happened when the user activated the entry under the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerStep {
    /// Navigated into a directory (or nothing to activate)
    Stay,
    /// A file was chosen
    Picked(PathBuf),
}

/// Directory browser used by the add/edit form to choose a target file.
///
/// Directories are listed first, then files, each group sorted by name.
/// Files are filtered to `extensions` unless `show_all` is on; hidden
/// entries (leading `.`) follow the same toggle.
#[derive(Debug, Clone)]
pub struct FilePickerState {
    pub dir: PathBuf,
    pub entries: Vec<PickerEntry>,
    pub cursor: usize,
    pub scroll_offset: usize,
    pub show_all: bool,
    pub extensions: Vec<String>,
}

impl FilePickerState {
    /// Open the picker in `dir`. Falls back to the parent chain until a
    /// readable directory is found.
    pub fn open(dir: &Path, extensions: &[String]) -> io::Result<Self> {
        let mut picker = FilePickerState {
            dir: dir.to_path_buf(),
            entries: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            show_all: false,
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        };

        let mut candidate = Some(dir.to_path_buf());
        while let Some(d) = candidate {
            picker.dir = d;
            match picker.refresh() {
                Ok(()) => return Ok(picker),
                Err(e) => {
                    log::debug!("picker: cannot list {}: {}", picker.dir.display(), e);
                    candidate = picker.dir.parent().map(Path::to_path_buf);
                }
            }
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no readable directory above {}", dir.display()),
        ))
    }

    /// Re-read the current directory.
    pub fn refresh(&mut self) -> io::Result<()> {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let Ok(entry) = entry else { continue };
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') && !self.show_all {
                continue;
            }
            let path = entry.path();
            // Follow symlinks so linked directories are browsable
            let is_dir = path.is_dir();
            if is_dir {
                dirs.push(PickerEntry { name, path, is_dir });
            } else if self.accepts(&path) {
                files.push(PickerEntry { name, path, is_dir });
            }
        }

        dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        self.entries.clear();
        if let Some(parent) = self.dir.parent() {
            self.entries.push(PickerEntry {
                name: "..".into(),
                path: parent.to_path_buf(),
                is_dir: true,
            });
        }
        self.entries.extend(dirs);
        self.entries.extend(files);
        self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
        Ok(())
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.show_all || self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }

    pub fn selected(&self) -> Option<&PickerEntry> {
        self.entries.get(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.entries.is_empty() {
            return;
        }
        let max = self.entries.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    pub fn jump_top(&mut self) {
        self.cursor = 0;
    }

    pub fn jump_bottom(&mut self) {
        self.cursor = self.entries.len().saturating_sub(1);
    }

    /// Enter the directory under the cursor, or pick the file.
    pub fn activate(&mut self) -> io::Result<PickerStep> {
        let Some(entry) = self.selected().cloned() else {
            return Ok(PickerStep::Stay);
        };
        if entry.is_dir {
            self.change_dir(entry.path)?;
            Ok(PickerStep::Stay)
        } else {
            Ok(PickerStep::Picked(entry.path))
        }
    }

    /// Go up one level, keeping the cursor on the directory we came from.
    pub fn go_up(&mut self) -> io::Result<()> {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        let came_from = self.dir.clone();
        self.change_dir(parent)?;
        if let Some(i) = self.entries.iter().position(|e| e.path == came_from) {
            self.cursor = i;
        }
        Ok(())
    }

    /// Toggle between the extension filter and showing every file.
    pub fn toggle_show_all(&mut self) -> io::Result<()> {
        self.show_all = !self.show_all;
        self.refresh()
    }

    fn change_dir(&mut self, dir: PathBuf) -> io::Result<()> {
        let previous = std::mem::replace(&mut self.dir, dir);
        let previous_cursor = self.cursor;
        self.cursor = 0;
        self.scroll_offset = 0;
        if let Err(e) = self.refresh() {
            self.dir = previous;
            self.cursor = previous_cursor;
            self.refresh()?;
            return Err(e);
        }
        Ok(())
    }
}
