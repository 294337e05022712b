//! YAML configuration parsing for user mappings
//!
//! Parses keymap.yaml files into a [`UserMappingTable`]:
//!
//! ```yaml
//! mappings:
//!   - keys: "<leader>ff"
//!     action: ":action GotoFile"
//!   - modes: [n, x]
//!     keys: "<Space>"
//!     to: "<leader>"
//!   - mode: normal
//!     keys: "Y"
//!     to: "y$"
//!     recursive: false
//! ```
//!
//! An entry without `mode`/`modes` applies to every mode a plain `:map` covers.

use std::path::Path;

use serde::Deserialize;

use super::binding::UserMapping;
use super::mode::Mode;
use super::notation::KeyNotation;
use super::registry::UserMappingTable;

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    #[serde(default)]
    pub mappings: Vec<MappingConfig>,
}

/// A single mapping entry from YAML
#[derive(Debug, Deserialize)]
pub struct MappingConfig {
    pub keys: String,
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub modes: Vec<Mode>,
    /// Terminal action text, e.g. `:action GotoFile`
    #[serde(default)]
    pub action: Option<String>,
    /// Key sequence this mapping expands to
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default = "default_recursive")]
    pub recursive: bool,
}

fn default_recursive() -> bool {
    true
}

/// Load user mappings from a YAML file
pub fn load_keymap_file(path: &Path, notation: &KeyNotation) -> Result<UserMappingTable, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content, notation)
}

/// Parse user mappings from YAML string
pub fn parse_keymap_yaml(yaml: &str, notation: &KeyNotation) -> Result<UserMappingTable, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let mut table = UserMappingTable::new();

    for entry in config.mappings {
        let keys = notation
            .parse(&entry.keys)
            .map_err(|e| KeymapError::InvalidKey(format!("{}: {}", entry.keys, e)))?;
        if keys.is_empty() {
            return Err(KeymapError::InvalidKey("empty key sequence".to_string()));
        }

        let mapping = match (entry.action, entry.to) {
            (Some(action), None) => UserMapping::action(action),
            (None, Some(to)) => {
                let target = notation
                    .parse(&to)
                    .map_err(|e| KeymapError::InvalidKey(format!("{}: {}", to, e)))?;
                if entry.recursive {
                    UserMapping::redirect(target)
                } else {
                    UserMapping::noremap(target)
                }
            }
            _ => {
                return Err(KeymapError::InvalidMapping(format!(
                    "{} needs exactly one of `action` or `to`",
                    entry.keys
                )))
            }
        };

        let mut modes = entry.modes;
        modes.extend(entry.mode);
        if modes.is_empty() {
            modes.extend(Mode::MAP_MODES);
        }
        table.map_modes(&modes, keys, mapping);
    }

    Ok(table)
}

/// Load `~/.config/whichkey/keymap.yaml`, or an empty table if missing or invalid
pub fn load_user_mappings(notation: &KeyNotation) -> UserMappingTable {
    let Some(path) = crate::config_paths::keymap_file() else {
        return UserMappingTable::new();
    };

    if !path.exists() {
        tracing::debug!("No user keymap at {}", path.display());
        return UserMappingTable::new();
    }

    match load_keymap_file(&path, notation) {
        Ok(table) => {
            tracing::info!(
                "Loaded user keymap from {} ({} mappings)",
                path.display(),
                table.len()
            );
            table
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
            UserMappingTable::new()
        }
    }
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidMapping(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidMapping(m) => write!(f, "Invalid mapping: {}", m),
        }
    }
}

impl std::error::Error for KeymapError {}
