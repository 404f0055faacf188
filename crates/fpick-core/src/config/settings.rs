//! Picker configuration loaded from a TOML file.
//!
//! Every field has a default, so the picker works without a config file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::classify::RootDetection;
use crate::error::{PickerError, PickerResult};
use crate::nav::lister::SelectionMode;

/// Top-level configuration.
///
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`PickerError::NotFound`] if the file does not exist.
    /// - [`PickerError::PermissionDenied`] if the file is not readable.
    /// - [`PickerError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> PickerResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PickerError::from_io(path, e))?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> PickerResult<Self> {
        toml::from_str(content).map_err(|e| PickerError::ConfigParse(e.to_string()))
    }
}

/// Initial session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(default)]
    pub selection_mode: SelectionMode,
    #[serde(default = "default_true")]
    pub show_hidden: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::default(),
            show_hidden: true,
        }
    }
}

/// Storage enumeration settings, consumed by
/// [`ConfiguredStorage`](crate::storage::ConfiguredStorage).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Primary storage root, e.g. `/storage/emulated/0`.
    #[serde(default)]
    pub device_root: Option<PathBuf>,
    /// Further mount candidates.
    #[serde(default)]
    pub mounts: Vec<PathBuf>,
    /// App-private fragment stripped from candidates.
    #[serde(default)]
    pub private_suffix: Option<String>,
    #[serde(default)]
    pub root_detection: RootDetection,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_picker_config() {
        let config = Config::default();

        assert_eq!(config.picker.selection_mode, SelectionMode::File);
        assert!(config.picker.show_hidden);
    }

    #[test]
    fn default_storage_config() {
        let config = Config::default();

        assert!(config.storage.device_root.is_none());
        assert!(config.storage.mounts.is_empty());
        assert!(config.storage.private_suffix.is_none());
        assert_eq!(config.storage.root_detection, RootDetection::Pattern);
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[picker]
selection_mode = "directory"
show_hidden = false

[storage]
device_root = "/storage/emulated/0"
mounts = ["/storage/1A2B-3C4D", "/mnt/usb"]
private_suffix = "/Android/data/com.example/files"
root_detection = "enumerated"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.picker.selection_mode, SelectionMode::Directory);
        assert!(!config.picker.show_hidden);

        assert_eq!(
            config.storage.device_root,
            Some(PathBuf::from("/storage/emulated/0"))
        );
        assert_eq!(
            config.storage.mounts,
            vec![PathBuf::from("/storage/1A2B-3C4D"), PathBuf::from("/mnt/usb")]
        );
        assert_eq!(
            config.storage.private_suffix.as_deref(),
            Some("/Android/data/com.example/files")
        );
        assert_eq!(config.storage.root_detection, RootDetection::Enumerated);
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let config = Config::parse(
            r#"
[picker]
selection_mode = "directory"
"#,
        )
        .unwrap();

        assert_eq!(config.picker.selection_mode, SelectionMode::Directory);
        assert!(config.picker.show_hidden);
        assert!(config.storage.mounts.is_empty());
    }

    #[test]
    fn load_empty_toml_uses_all_defaults() {
        let config = Config::parse("").unwrap();
        let default = Config::default();

        assert_eq!(config.picker.show_hidden, default.picker.show_hidden);
        assert_eq!(config.picker.selection_mode, default.picker.selection_mode);
    }

    #[test]
    fn unknown_selection_mode_is_a_parse_error() {
        let result = Config::parse("[picker]\nselection_mode = \"both\"\n");
        assert!(matches!(result.unwrap_err(), PickerError::ConfigParse(_)));
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), PickerError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), PickerError::ConfigParse(_)));
    }
}
