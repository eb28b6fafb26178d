// User settings
// Loaded from ~/.config/brewmap/settings.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Lookup service
    #[serde(rename = "lookup.apiKey", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(rename = "lookup.endpoint", skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    // Input
    /// 1-based column holding the brewery name
    #[serde(rename = "input.nameColumn", skip_serializing_if = "Option::is_none")]
    pub name_column: Option<usize>,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("brewmap");
        config_dir.join("settings.json")
    }

    /// Load settings from the default location, falling back to defaults.
    ///
    /// A missing file is normal. An unreadable or malformed file is
    /// reported on stderr and ignored.
    pub fn load() -> Self {
        let path = Self::config_path();
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("warning: {}", e);
                eprintln!("warning: using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from `path`. Missing file → defaults.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("error reading {}: {}", path.display(), e))?;
        Self::parse(&contents).map_err(|e| format!("error parsing {}: {}", path.display(), e))
    }

    /// Parse settings JSON. Lines starting with `//` are comments.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        if cleaned.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Get the config file path for display
    pub fn config_path_display() -> String {
        Self::config_path().to_string_lossy().to_string()
    }
}
