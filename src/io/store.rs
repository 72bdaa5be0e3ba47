use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::io::file_service::atomic_write;
use crate::io::paths;
use crate::model::Target;

/// The persisted target list: one JSON array of `{path, displayName, type,
/// content}` records. Every save rewrites the whole file.
#[derive(Debug, Clone)]
pub struct TargetStore {
    path: PathBuf,
}

impl TargetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TargetStore { path: path.into() }
    }

    /// The store at its default per-user location
    pub fn default_location() -> Self {
        Self::new(paths::store_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the target list. A missing record is an empty list. A corrupted
    /// record is backed up as `.bak` and also yields an empty list.
    pub fn load(&self) -> Vec<Target> {
        if !self.path.exists() {
            log::debug!("no target store at {}", self.path.display());
            return Vec::new();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("could not read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Target>>(&content) {
            Ok(targets) => {
                log::info!(
                    "loaded {} target(s) from {}",
                    targets.len(),
                    self.path.display()
                );
                targets
            }
            Err(e) => {
                let bak = self.backup_path();
                match fs::copy(&self.path, &bak) {
                    Ok(_) => log::warn!(
                        "could not parse {} (backed up as {}): {}",
                        self.path.display(),
                        bak.display(),
                        e
                    ),
                    Err(copy_err) => log::error!(
                        "could not parse {} ({}); backup to {} failed, the next save will overwrite it: {}",
                        self.path.display(),
                        e,
                        bak.display(),
                        copy_err
                    ),
                }
                Vec::new()
            }
        }
    }

    /// Serialize the full list and overwrite the record.
    pub fn save(&self, targets: &[Target]) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serialize(targets)?;
        atomic_write(&self.path, content.as_bytes())?;
        log::debug!("saved {} target(s) to {}", targets.len(), self.path.display());
        Ok(())
    }

    fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }
}

/// Serialized form of a target list, as written by [`TargetStore::save`].
pub fn serialize(targets: &[Target]) -> io::Result<String> {
    serde_json::to_string_pretty(targets).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TargetKind;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, TargetStore) {
        let tmp = TempDir::new().unwrap();
        let store = TargetStore::new(tmp.path().join("foobs").join("targets.json"));
        (tmp, store)
    }

    fn sample() -> Vec<Target> {
        vec![
            Target {
                path: PathBuf::from("/tmp/deaths.txt"),
                display_name: "Deaths".into(),
                kind: TargetKind::Integer,
                content: "3".into(),
            },
            Target {
                path: PathBuf::from("/tmp/caption.txt"),
                display_name: "Caption".into(),
                kind: TargetKind::String,
                content: "line one\nline two".into(),
            },
        ]
    }

    #[test]
    fn missing_store_is_empty() {
        let (_tmp, store) = temp_store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_creates_parent_and_loads_back() {
        let (_tmp, store) = temp_store();
        store.save(&sample()).unwrap();
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn save_of_load_is_idempotent() {
        let (_tmp, store) = temp_store();
        store.save(&sample()).unwrap();

        store.save(&store.load()).unwrap();
        let first = fs::read_to_string(store.path()).unwrap();
        store.save(&store.load()).unwrap();
        let second = fs::read_to_string(store.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn corrupted_store_is_backed_up() {
        let (_tmp, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json [[[").unwrap();

        assert!(store.load().is_empty());
        let bak = store.path().with_file_name("targets.json.bak");
        assert_eq!(fs::read_to_string(bak).unwrap(), "not json [[[");
    }

    #[test]
    fn failed_backup_still_loads_empty() {
        let (_tmp, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json [[[").unwrap();
        // A directory in the way makes the copy fail
        let bak = store.path().with_file_name("targets.json.bak");
        fs::create_dir(&bak).unwrap();

        assert!(store.load().is_empty());
        assert!(bak.is_dir());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "not json [[[");
    }

    #[test]
    fn structural_mismatch_is_empty() {
        let (_tmp, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), r#"{"targets": []}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn reads_compact_records() {
        let (_tmp, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"[{"path":"/tmp/a.txt","displayName":"A","type":"string","content":"hi"}]"#,
        )
        .unwrap();
        let targets = store.load();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].display_name, "A");
        assert_eq!(targets[0].kind, TargetKind::String);
        assert_eq!(targets[0].content, "hi");
    }
}
