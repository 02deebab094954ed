//! Config file loading and creation for the photorank CLI.
//!
//! Config lives at ~/.config/photorank/config.toml.
//! All fields are optional — CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default)]
pub struct PhotorankConfig {
    /// Image file extensions to pick up when scanning a folder.
    pub extensions: Option<Vec<String>>,
    /// Directory name (inside the image folder) rejected files move to.
    pub rejected_dir: Option<String>,
    /// Progress file name (inside the image folder).
    pub progress_file: Option<String>,
    /// Prefix for export folders: <prefix>_5 .. <prefix>_1.
    pub export_prefix: Option<String>,
}

pub const DEFAULT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];
pub const DEFAULT_REJECTED_DIR: &str = "rejected";
pub const DEFAULT_PROGRESS_FILE: &str = "progress.json";
pub const DEFAULT_EXPORT_PREFIX: &str = "rated";

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# photorank configuration
# All values here can be overridden by CLI flags.

# Image extensions picked up when scanning a folder
# extensions = [\"png\", \"jpg\", \"jpeg\", \"gif\"]

# Folder (inside the image folder) that rejected images move to
# rejected_dir = \"rejected\"

# Progress file name (inside the image folder)
# progress_file = \"progress.json\"

# Export folder prefix: <prefix>_5 holds the top 20%
# export_prefix = \"rated\"
";

/// Returns the default config path: ~/.config/photorank/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home)
        .join(".config")
        .join("photorank")
        .join("config.toml")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> PhotorankConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => PhotorankConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let cfg: PhotorankConfig =
            toml::from_str("rejected_dir = \"trash\"\nextensions = [\"webp\"]").unwrap();
        assert_eq!(cfg.rejected_dir.as_deref(), Some("trash"));
        assert_eq!(cfg.extensions, Some(vec!["webp".to_string()]));
        assert!(cfg.progress_file.is_none());
    }

    #[test]
    fn test_default_template_is_valid_toml() {
        let cfg: PhotorankConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(cfg.extensions.is_none());
        assert!(cfg.export_prefix.is_none());
    }
}
