use std::path::{Path, PathBuf};

/// Per-user application directory, respecting XDG_CONFIG_HOME
pub fn config_dir() -> PathBuf {
    config_dir_from(
        std::env::var("XDG_CONFIG_HOME").ok().as_deref(),
        std::env::var("HOME").ok().as_deref(),
    )
}

fn config_dir_from(xdg: Option<&str>, home: Option<&str>) -> PathBuf {
    let base = match xdg {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(home.unwrap_or("/")).join(".config"),
    };
    base.join("foobs")
}

/// Default location of the persisted target list
pub fn store_path() -> PathBuf {
    config_dir().join("targets.json")
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn log_path() -> PathBuf {
    config_dir().join("foobs.log")
}

/// The recovery log sits next to whichever store is in use, so a `--store`
/// override keeps its recovery data alongside it.
pub fn recovery_log_path(store: &Path) -> PathBuf {
    store
        .parent()
        .unwrap_or(Path::new("."))
        .join("recovery.log")
}

/// Abbreviate a path by replacing $HOME with ~
pub fn abbreviate_path(path: &Path) -> String {
    abbreviate_path_from(path, std::env::var("HOME").ok().as_deref())
}

fn abbreviate_path_from(path: &Path, home: Option<&str>) -> String {
    let s = path.to_string_lossy();
    if let Some(home) = home.map(|h| h.trim_end_matches('/'))
        && !home.is_empty()
        && let Some(rest) = s.strip_prefix(home)
        && (rest.is_empty() || rest.starts_with('/'))
    {
        return format!("~{}", rest);
    }
    s.into_owned()
}
