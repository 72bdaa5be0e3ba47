use std::path::{Path, PathBuf};

use crate::io::file_service::FileService;
use crate::io::paths;
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::io::store::TargetStore;
use crate::model::target::{Target, TargetKind, coerce_integer, parse_integer};

/// Error type for registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no target file selected")]
    EmptyPath,
    #[error("no target at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("target {index} is not an integer target")]
    NotAnInteger { index: usize },
    #[error("could not delete {path}: {source}")]
    DeleteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The ordered list of targets and every operation that mutates it.
///
/// Each mutation writes the affected backing file right away and then
/// saves the whole list. Write and save failures do not roll back memory;
/// they are logged, recorded in the recovery log, and queued as warnings
/// for the caller to show (see [`TargetRegistry::take_warnings`]).
pub struct TargetRegistry {
    targets: Vec<Target>,
    files: Box<dyn FileService>,
    store: TargetStore,
    recovery_log: PathBuf,
    warnings: Vec<String>,
}

impl TargetRegistry {
    /// Load the list from `store` and manage it through `files`.
    pub fn open(files: Box<dyn FileService>, store: TargetStore) -> Self {
        let targets = store.load();
        Self::with_targets(files, store, targets)
    }

    pub fn with_targets(
        files: Box<dyn FileService>,
        store: TargetStore,
        targets: Vec<Target>,
    ) -> Self {
        let recovery_log = paths::recovery_log_path(store.path());
        TargetRegistry {
            targets,
            files,
            store,
            recovery_log,
            warnings: Vec::new(),
        }
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn get(&self, index: usize) -> Option<&Target> {
        self.targets.get(index)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    pub fn recovery_log(&self) -> &Path {
        &self.recovery_log
    }

    /// Drain warnings produced by degraded writes and saves.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Append a target for `path`, taking its current file content as the
    /// initial value.
    pub fn create(
        &mut self,
        path: impl Into<PathBuf>,
        display_name: &str,
        kind: TargetKind,
    ) -> Result<&Target, RegistryError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(RegistryError::EmptyPath);
        }

        let mut target = Target::new(path, display_name, kind);
        target.content = self.read(&target.path);
        self.normalize_integer(&mut target);

        log::info!(
            "created {} target \"{}\" for {}",
            kind,
            target.display_name,
            target.path.display()
        );
        self.targets.push(target);
        self.persist();
        let last = self.targets.len() - 1;
        Ok(&self.targets[last])
    }

    /// Replace a target's path, name and kind. Content is re-read only when
    /// the path changes; otherwise the in-memory value is kept.
    pub fn update(
        &mut self,
        index: usize,
        path: impl Into<PathBuf>,
        display_name: &str,
        kind: TargetKind,
    ) -> Result<(), RegistryError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(RegistryError::EmptyPath);
        }
        self.check_index(index)?;

        let current = &self.targets[index];
        let content = if path != current.path {
            log::debug!(
                "target {} moved from {} to {}",
                index,
                current.path.display(),
                path.display()
            );
            self.read(&path)
        } else {
            current.content.clone()
        };

        let mut target = Target {
            path,
            display_name: display_name.to_string(),
            kind,
            content,
        };
        self.normalize_integer(&mut target);

        log::info!("updated target {} (\"{}\")", index, target.display_name);
        self.targets[index] = target;
        self.persist();
        Ok(())
    }

    /// Replace a target's content and write it out. Integer targets store the
    /// coerced form of `text`.
    pub fn set_content(&mut self, index: usize, text: &str) -> Result<(), RegistryError> {
        self.check_index(index)?;

        let content = match self.targets[index].kind {
            TargetKind::String => text.to_string(),
            TargetKind::Integer => coerce_integer(text).0,
        };
        self.targets[index].content = content;
        self.write_target(index);
        self.persist();
        Ok(())
    }

    /// Add `delta` to an integer target. Unparseable content counts as 0.
    pub fn adjust(&mut self, index: usize, delta: i64) -> Result<i64, RegistryError> {
        self.check_index(index)?;
        if !self.targets[index].is_integer() {
            return Err(RegistryError::NotAnInteger { index });
        }

        let current = parse_integer(&self.targets[index].content).unwrap_or(0);
        let value = current.saturating_add(delta);
        self.targets[index].content = value.to_string();
        log::debug!("target {} adjusted by {} to {}", index, delta, value);

        self.write_target(index);
        self.persist();
        Ok(value)
    }

    /// Remove a target, optionally deleting its file first. If the delete
    /// fails, the target stays in the list.
    pub fn remove(&mut self, index: usize, also_delete_file: bool) -> Result<Target, RegistryError> {
        self.check_index(index)?;

        if also_delete_file {
            let target = &self.targets[index];
            if let Err(e) = self.files.delete_file(&target.path) {
                log::warn!("could not delete {}: {}", target.path.display(), e);
                return Err(RegistryError::DeleteFailed {
                    path: target.path.clone(),
                    source: e,
                });
            }
            recovery::log_recovery(
                &self.recovery_log,
                RecoveryEntry::new(RecoveryCategory::Delete, "file deleted with target")
                    .field("Target", target.display_name.as_str())
                    .field("Path", target.path.to_string_lossy())
                    .body(target.content.as_str()),
            );
        }

        let removed = self.targets.remove(index);
        log::info!(
            "removed target \"{}\"{}",
            removed.display_name,
            if also_delete_file { " and its file" } else { "" }
        );
        self.persist();
        Ok(removed)
    }

    /// Move the target at `from` so it ends up at `to`; the targets in
    /// between shift by one.
    pub fn move_target(&mut self, from: usize, to: usize) -> Result<(), RegistryError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from == to {
            return Ok(());
        }

        let target = self.targets.remove(from);
        self.targets.insert(to, target);
        log::debug!("moved target {} to {}", from, to);
        self.persist();
        Ok(())
    }

    /// Save the full list now.
    pub fn save(&mut self) {
        self.persist();
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn check_index(&self, index: usize) -> Result<(), RegistryError> {
        if index < self.targets.len() {
            Ok(())
        } else {
            Err(RegistryError::IndexOutOfRange {
                index,
                len: self.targets.len(),
            })
        }
    }

    /// Read a backing file; failures read as empty text.
    fn read(&self, path: &Path) -> String {
        match self.files.read_text(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("could not read {}: {}", path.display(), e);
                String::new()
            }
        }
    }

    /// Zero out unparseable integer content and write the zero back.
    fn normalize_integer(&mut self, target: &mut Target) {
        if target.kind != TargetKind::Integer {
            return;
        }
        let (content, coerced) = coerce_integer(&target.content);
        if coerced {
            log::info!(
                "{} is not an integer, resetting to 0",
                target.path.display()
            );
            target.content = content;
            self.write_file(target);
        }
    }

    fn write_target(&mut self, index: usize) {
        let target = self.targets[index].clone();
        self.write_file(&target);
    }

    fn write_file(&mut self, target: &Target) {
        if let Err(e) = self.files.write_text(&target.path, &target.content) {
            log::warn!("could not write {}: {}", target.path.display(), e);
            recovery::log_recovery(
                &self.recovery_log,
                RecoveryEntry::new(RecoveryCategory::Write, "target write failed")
                    .field("Target", target.display_name.as_str())
                    .field("Path", target.path.to_string_lossy())
                    .field("Error", e.to_string())
                    .body(target.content.as_str()),
            );
            self.warnings.push(format!(
                "could not write {}: {}",
                target.path.display(),
                e
            ));
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.targets) {
            log::warn!("could not save {}: {}", self.store.path().display(), e);
            let body = crate::io::store::serialize(&self.targets).unwrap_or_default();
            recovery::log_recovery(
                &self.recovery_log,
                RecoveryEntry::new(RecoveryCategory::Save, "target list save failed")
                    .field("Path", self.store.path().to_string_lossy())
                    .field("Error", e.to_string())
                    .body(body),
            );
            self.warnings.push(format!(
                "could not save target list to {}: {}",
                self.store.path().display(),
                e
            ));
        }
    }
}
