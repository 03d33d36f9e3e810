//! # App configuration - `notesapp.toml`
//!
//! Client-side settings that shape how the service behaves. Read at startup; a
//! missing or empty file is equivalent to the defaults.
//!
//! ## Structure
//!
//! ```toml
//! [storage]
//! profile_images_prefix = "profileImages"
//! note_images_prefix = "noteImages"
//!
//! [categories]
//! palette = ["#FFCDD2", "#F8BBD0", "#E1BEE7"]
//!
//! [sharing]
//! require_unique_username = false
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`NotesAppConfig`] | Top-level config with TOML (de)serialisation and the canonical filename. |
//! | [`StorageConfig`] | Blob path prefixes for uploaded images. |
//! | [`CategoryConfig`] | Colour palette offered when creating categories. |
//! | [`SharingConfig`] | Whether a username matching several profiles is an error. |

use serde::{Deserialize, Serialize};

use crate::categories::DEFAULT_PALETTE;

/// Top-level configuration stored in `notesapp.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotesAppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub categories: CategoryConfig,
    #[serde(default)]
    pub sharing: SharingConfig,
}

/// Blob storage layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_profile_images_prefix")]
    pub profile_images_prefix: String,
    #[serde(default = "default_note_images_prefix")]
    pub note_images_prefix: String,
}

fn default_profile_images_prefix() -> String {
    "profileImages".to_string()
}

fn default_note_images_prefix() -> String {
    "noteImages".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            profile_images_prefix: default_profile_images_prefix(),
            note_images_prefix: default_note_images_prefix(),
        }
    }
}

/// Category settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Colours offered in the picker. The first one is the default.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
        }
    }
}

impl CategoryConfig {
    pub fn default_color(&self) -> &str {
        self.palette
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_PALETTE[0])
    }
}

/// Sharing settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Fail instead of picking the first profile when a username is taken twice.
    #[serde(default)]
    pub require_unique_username: bool,
}

impl NotesAppConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "notesapp.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read `path`, treating a missing file as the default configuration.
    pub fn load(path: &std::path::Path) -> Result<Self, String> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content).map_err(|e| e.to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = NotesAppConfig::from_toml("").unwrap();
        assert_eq!(config, NotesAppConfig::default());
        assert_eq!(config.storage.profile_images_prefix, "profileImages");
        assert_eq!(config.categories.default_color(), "#FFCDD2");
        assert!(!config.sharing.require_unique_username);
    }

    #[test]
    fn test_partial_sections() {
        let config = NotesAppConfig::from_toml(
            r##"
            [sharing]
            require_unique_username = true

            [categories]
            palette = ["#000000"]
            "##,
        )
        .unwrap();
        assert!(config.sharing.require_unique_username);
        assert_eq!(config.categories.default_color(), "#000000");
        assert_eq!(config.storage.note_images_prefix, "noteImages");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = NotesAppConfig::default();
        config.storage.note_images_prefix = "attachments".into();
        let text = config.to_toml().unwrap();
        assert_eq!(NotesAppConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file_loads_default() {
        let path = std::env::temp_dir().join(format!("notesapp_missing_{}.toml", std::process::id()));
        let _ = std::fs::remove_file(&path);
        assert_eq!(NotesAppConfig::load(&path).unwrap(), NotesAppConfig::default());
    }
}
