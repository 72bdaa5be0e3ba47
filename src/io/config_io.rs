use std::fs;
use std::path::{Path, PathBuf};

use crate::io::file_service::atomic_write;
use crate::model::config::AppConfig;

/// Error type for config file operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml_edit::TomlError),
    #[error("invalid config: {0}")]
    Invalid(#[from] toml::de::Error),
    #[error("invalid key \"{0}\"")]
    InvalidKey(String),
}

/// Load the config, falling back to defaults when it is missing or broken.
pub fn load_config(path: &Path) -> AppConfig {
    if !path.exists() {
        return AppConfig::default();
    }
    match fs::read_to_string(path)
        .map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })
        .and_then(|text| toml::from_str::<AppConfig>(&text).map_err(ConfigError::from))
    {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}; using defaults", e);
            eprintln!("warning: {}; using defaults", e);
            AppConfig::default()
        }
    }
}

/// Read the raw config document for formatting-preserving edits. A missing
/// file is an empty document.
pub fn read_config_document(path: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    if !path.exists() {
        return Ok(toml_edit::DocumentMut::new());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(text.parse::<toml_edit::DocumentMut>()?)
}

/// Validate and write the config document back to disk.
pub fn write_config_document(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    let text = doc.to_string();
    toml::from_str::<AppConfig>(&text)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    atomic_write(path, text.as_bytes()).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Set a dotted key such as `ui.big_step` or `ui.colors.background`.
/// The value is read as a TOML literal when it parses as one (numbers,
/// booleans, arrays), otherwise it is stored as a string.
pub fn set_value(
    doc: &mut toml_edit::DocumentMut,
    dotted_key: &str,
    raw_value: &str,
) -> Result<(), ConfigError> {
    let parts: Vec<&str> = dotted_key.split('.').collect();
    if parts.iter().any(|p| p.trim().is_empty()) {
        return Err(ConfigError::InvalidKey(dotted_key.to_string()));
    }
    let (leaf, tables) = parts
        .split_last()
        .ok_or_else(|| ConfigError::InvalidKey(dotted_key.to_string()))?;

    let mut table = doc.as_table_mut();
    for name in tables {
        if !table.contains_key(name) {
            table[*name] = toml_edit::Item::Table(toml_edit::Table::new());
        }
        table = table[*name]
            .as_table_mut()
            .ok_or_else(|| ConfigError::InvalidKey(dotted_key.to_string()))?;
    }

    table[*leaf] = toml_edit::value(parse_value(raw_value));
    Ok(())
}

fn parse_value(raw: &str) -> toml_edit::Value {
    raw.parse::<toml_edit::Value>()
        .unwrap_or_else(|_| toml_edit::Value::from(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r##"# my settings
[ui]
big_step = 2 # coarse

[ui.colors]
background = "#101010"
"##;

    #[test]
    fn missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("config.toml"));
        assert_eq!(config.ui.big_step, 2);
    }

    #[test]
    fn malformed_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[ui\nbig_step = ").unwrap();
        let config = load_config(&path);
        assert_eq!(config.files.extensions, vec!["txt"]);
    }

    #[test]
    fn round_trip_preserves_formatting() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, SAMPLE).unwrap();

        let doc = read_config_document(&path).unwrap();
        write_config_document(&path, &doc).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
    }

    #[test]
    fn set_existing_and_new_keys() {
        let mut doc: toml_edit::DocumentMut = SAMPLE.parse().unwrap();
        set_value(&mut doc, "ui.big_step", "5").unwrap();
        set_value(&mut doc, "ui.colors.highlight", "#FF0000").unwrap();
        set_value(&mut doc, "log.level", "debug").unwrap();

        let text = doc.to_string();
        assert!(text.contains("# my settings"));
        let config: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(config.ui.big_step, 5);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#FF0000");
        assert_eq!(config.ui.colors.get("background").unwrap(), "#101010");
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn set_array_value() {
        let mut doc = toml_edit::DocumentMut::new();
        set_value(&mut doc, "files.extensions", r#"["txt", "md"]"#).unwrap();
        let config: AppConfig = toml::from_str(&doc.to_string()).unwrap();
        assert_eq!(config.files.extensions, vec!["txt", "md"]);
    }

    #[test]
    fn rejects_empty_key_segments() {
        let mut doc = toml_edit::DocumentMut::new();
        assert!(set_value(&mut doc, "ui..big_step", "1").is_err());
        assert!(set_value(&mut doc, "", "1").is_err());
    }

    #[test]
    fn write_rejects_wrong_types() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        let mut doc = toml_edit::DocumentMut::new();
        set_value(&mut doc, "ui.big_step", "lots").unwrap();
        assert!(write_config_document(&path, &doc).is_err());
        assert!(!path.exists());
    }
}
