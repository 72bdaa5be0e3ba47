use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Raw access to the files behind targets.
///
/// Implementations report failures plainly; the registry decides which
/// failures degrade (reads, writes) and which abort (deletes).
pub trait FileService {
    fn read_text(&self, path: &Path) -> io::Result<String>;
    fn write_text(&self, path: &Path, text: &str) -> io::Result<()>;
    fn delete_file(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileService;

impl FileService for FsFileService {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    /// Overwrites in place so the file keeps its permissions and symlinks
    /// keep pointing at the real file.
    fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
        fs::write(path, text)
    }

    fn delete_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
/// Only for files foobs owns (the store record and config).
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod memory {
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};
    use std::io;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    use super::FileService;

    #[derive(Default)]
    struct Inner {
        files: HashMap<PathBuf, String>,
        fail_writes: HashSet<PathBuf>,
        fail_deletes: HashSet<PathBuf>,
        reads: usize,
    }

    /// In-memory file service with failure injection. Clones share state, so
    /// a test can keep a handle after moving one into a registry.
    #[derive(Clone, Default)]
    pub struct MemoryFileService {
        inner: Rc<RefCell<Inner>>,
    }

    impl MemoryFileService {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(self, path: &str, text: &str) -> Self {
            self.put(path, text);
            self
        }

        pub fn put(&self, path: &str, text: &str) {
            self.inner
                .borrow_mut()
                .files
                .insert(PathBuf::from(path), text.to_string());
        }

        pub fn get(&self, path: &str) -> Option<String> {
            self.inner.borrow().files.get(Path::new(path)).cloned()
        }

        pub fn exists(&self, path: &str) -> bool {
            self.inner.borrow().files.contains_key(Path::new(path))
        }

        pub fn fail_writes_to(&self, path: &str) {
            self.inner
                .borrow_mut()
                .fail_writes
                .insert(PathBuf::from(path));
        }

        pub fn fail_deletes_of(&self, path: &str) {
            self.inner
                .borrow_mut()
                .fail_deletes
                .insert(PathBuf::from(path));
        }

        /// Number of reads served so far
        pub fn reads(&self) -> usize {
            self.inner.borrow().reads
        }
    }

    impl FileService for MemoryFileService {
        fn read_text(&self, path: &Path) -> io::Result<String> {
            let mut inner = self.inner.borrow_mut();
            inner.reads += 1;
            inner
                .files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn write_text(&self, path: &Path, text: &str) -> io::Result<()> {
            let mut inner = self.inner.borrow_mut();
            if inner.fail_writes.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "write refused",
                ));
            }
            inner.files.insert(path.to_path_buf(), text.to_string());
            Ok(())
        }

        fn delete_file(&self, path: &Path) -> io::Result<()> {
            let mut inner = self.inner.borrow_mut();
            if inner.fail_deletes.contains(path) {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "delete refused",
                ));
            }
            inner
                .files
                .remove(path)
                .map(|_| ())
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn fs_service_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("score.txt");
        let files = FsFileService;

        files.write_text(&path, "12").unwrap();
        assert_eq!(files.read_text(&path).unwrap(), "12");

        files.write_text(&path, "13").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "13");

        files.delete_file(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn fs_service_reports_missing_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.txt");
        let files = FsFileService;
        assert!(files.read_text(&path).is_err());
        assert!(files.delete_file(&path).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn fs_service_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("score.txt");
        fs::write(&path, "1").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        FsFileService.write_text(&path, "2").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert_eq!(fs::read_to_string(&path).unwrap(), "2");
    }

    #[cfg(unix)]
    #[test]
    fn fs_service_writes_through_symlink() {
        let tmp = TempDir::new().unwrap();
        let real = tmp.path().join("real.txt");
        let link = tmp.path().join("link.txt");
        fs::write(&real, "1").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        FsFileService.write_text(&link, "2").unwrap();
        assert_eq!(fs::read_to_string(&real).unwrap(), "2");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    }

    #[test]
    fn atomic_write_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("caption.txt");
        atomic_write(&path, b"hello").unwrap();
        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("caption.txt")]);
    }
}
