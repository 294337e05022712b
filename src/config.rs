//! Global variable store and typed which-key settings
//!
//! The host exposes its configuration as loosely typed global variables
//! (`g:WhichKey_ShowVimActions`, `g:mapleader`, ...). They are modelled as
//! [`VimValue`]s here, and [`WhichKeyConfig`] pulls the typed settings out
//! once so nothing downstream matches on variants.
//!
//! On disk the store is a YAML mapping in `~/.config/whichkey/config.yaml`:
//!
//! ```yaml
//! mapleader: " "
//! WhichKey_ShowVimActions: true
//! WhichKeyDesc_find_file: "<leader>ff Find file"
//! WhichKey_Descriptions:
//!   "<leader>":
//!     g: ["Git", { b: "Blame", s: "Status" }]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::keymap::KeyNotation;
use crate::sort::SortOrder;

pub const PROCESS_UNKNOWN_MAPPINGS: &str = "WhichKey_ProcessUnknownMappings";
pub const SHOW_VIM_ACTIONS: &str = "WhichKey_ShowVimActions";
pub const DEFAULT_DELAY: &str = "WhichKey_DefaultDelay";
pub const SORT_ORDER: &str = "WhichKey_SortOrder";
pub const SORT_CASE_SENSITIVE: &str = "WhichKey_SortCaseSensitive";
pub const DESCRIPTIONS_DICT: &str = "WhichKey_Descriptions";
pub const FLAT_DESCRIPTION_PREFIX: &str = "WhichKeyDesc";
pub const MAPLEADER: &str = "mapleader";

/// Popup delay when `WhichKey_DefaultDelay` is not set
pub const DEFAULT_DELAY_MS: u64 = 200;

/// A dynamically typed variable value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VimValue {
    Text(String),
    Number(i64),
    List(Vec<VimValue>),
    /// Entries keep their declaration order
    Dictionary(Vec<(String, VimValue)>),
}

impl VimValue {
    pub fn text(value: impl Into<String>) -> Self {
        VimValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            VimValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            VimValue::Number(n) => Some(*n),
            VimValue::Text(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// `true`/`false` text (any case) or a number, non-zero meaning true
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VimValue::Number(n) => Some(*n != 0),
            VimValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Scalars as text, the way Vim's `string()` prints them
    pub fn as_string(&self) -> Option<String> {
        match self {
            VimValue::Text(text) => Some(text.clone()),
            VimValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Convert a YAML value; `null` has no Vim counterpart and yields `None`
    pub fn from_yaml(value: serde_yaml::Value) -> Option<Self> {
        use serde_yaml::Value;

        match value {
            Value::Null => None,
            Value::Bool(b) => Some(VimValue::Number(i64::from(b))),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map(VimValue::Number),
            Value::String(s) => Some(VimValue::Text(s)),
            Value::Sequence(items) => Some(VimValue::List(
                items.into_iter().filter_map(VimValue::from_yaml).collect(),
            )),
            Value::Mapping(map) => Some(VimValue::Dictionary(
                map.into_iter()
                    .filter_map(|(k, v)| {
                        let key = yaml_key(k)?;
                        Some((key, VimValue::from_yaml(v)?))
                    })
                    .collect(),
            )),
            Value::Tagged(tagged) => VimValue::from_yaml(tagged.value),
        }
    }
}

fn yaml_key(key: serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    match key {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => {
            tracing::debug!("Ignoring non-scalar dictionary key: {:?}", other);
            None
        }
    }
}

impl From<&str> for VimValue {
    fn from(value: &str) -> Self {
        VimValue::Text(value.to_string())
    }
}

impl From<i64> for VimValue {
    fn from(value: i64) -> Self {
        VimValue::Number(value)
    }
}

impl From<bool> for VimValue {
    fn from(value: bool) -> Self {
        VimValue::Number(i64::from(value))
    }
}

/// Errors that can occur when loading the variable store
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_yaml::Error),
    /// The document parsed but its top level is not a mapping
    NotAMapping,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "Invalid YAML: {}", e),
            ConfigError::NotAMapping => write!(f, "Expected a mapping of variable names"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            ConfigError::NotAMapping => None,
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// The host's global variables, by name without the `g:` scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    vars: BTreeMap<String, VimValue>,
}

fn unscoped(name: &str) -> &str {
    name.strip_prefix("g:").unwrap_or(name)
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<VimValue>) {
        self.vars.insert(unscoped(name).to_string(), value.into());
    }

    /// Builder-style set
    pub fn with(mut self, name: &str, value: impl Into<VimValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&VimValue> {
        self.vars.get(unscoped(name))
    }

    pub fn remove(&mut self, name: &str) -> Option<VimValue> {
        self.vars.remove(unscoped(name))
    }

    /// Variables named `{prefix}_*`, in name order
    pub fn with_prefix<'a>(&'a self, prefix: &str) -> impl Iterator<Item = (&'a str, &'a VimValue)> {
        let prefix = format!("{}_", unscoped(prefix));
        self.vars
            .range(prefix.clone()..)
            .take_while(move |(name, _)| name.starts_with(&prefix))
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Parse a YAML mapping of variable names to values
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let map = match value {
            serde_yaml::Value::Mapping(map) => map,
            serde_yaml::Value::Null => return Ok(Self::default()),
            _ => return Err(ConfigError::NotAMapping),
        };

        let mut store = Self::default();
        for (key, value) in map {
            let Some(name) = yaml_key(key) else {
                continue;
            };
            match VimValue::from_yaml(value) {
                Some(value) => store.set(&name, value),
                None => tracing::debug!("Ignoring variable {} with null value", name),
            }
        }
        Ok(store)
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load from the config directory, or return an empty store if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_file(&path) {
            Ok(store) => {
                tracing::info!("Loaded {} variables from {}", store.len(), path.display());
                store
            }
            Err(e) => {
                tracing::warn!("Failed to load config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Typed which-key settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhichKeyConfig {
    /// Let the editor process sequences that resolve to nothing
    pub process_unknown_mappings: bool,
    /// Show built-in commands that have no description
    pub show_vim_actions: bool,
    pub popup_delay: Duration,
    pub sort_order: SortOrder,
    pub sort_case_sensitive: bool,
    /// Raw `mapleader`, one key per character
    pub leader: String,
}

impl Default for WhichKeyConfig {
    fn default() -> Self {
        Self {
            process_unknown_mappings: true,
            show_vim_actions: false,
            popup_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            sort_order: SortOrder::default(),
            sort_case_sensitive: true,
            leader: crate::keymap::notation::DEFAULT_LEADER.to_string(),
        }
    }
}

impl WhichKeyConfig {
    /// Extract settings; missing or wrong-typed values fall back to defaults
    pub fn from_variables(vars: &VariableStore) -> Self {
        let defaults = Self::default();

        let flag = |name: &str, default: bool| match vars.get(name) {
            None => default,
            Some(value) => value.as_bool().unwrap_or_else(|| {
                tracing::warn!("{} is not a boolean ({:?}), using {}", name, value, default);
                default
            }),
        };

        let popup_delay = match vars.get(DEFAULT_DELAY).map(|v| v.as_number()) {
            None => defaults.popup_delay,
            Some(Some(ms)) => Duration::from_millis(ms.max(0).unsigned_abs()),
            Some(None) => {
                tracing::warn!("{} is not a number, using {}ms", DEFAULT_DELAY, DEFAULT_DELAY_MS);
                defaults.popup_delay
            }
        };

        let sort_order = match vars.get(SORT_ORDER).and_then(VimValue::as_text) {
            None => defaults.sort_order,
            Some(text) => text.parse().unwrap_or_else(|e| {
                tracing::warn!("{}", e);
                defaults.sort_order
            }),
        };

        let leader = vars
            .get(MAPLEADER)
            .and_then(VimValue::as_text)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or(defaults.leader);

        Self {
            process_unknown_mappings: flag(
                PROCESS_UNKNOWN_MAPPINGS,
                defaults.process_unknown_mappings,
            ),
            show_vim_actions: flag(SHOW_VIM_ACTIONS, defaults.show_vim_actions),
            popup_delay,
            sort_order,
            sort_case_sensitive: flag(SORT_CASE_SENSITIVE, defaults.sort_case_sensitive),
            leader,
        }
    }

    /// Key notation parser with this config's leader
    pub fn notation(&self) -> KeyNotation {
        KeyNotation::with_leader_str(&self.leader)
    }
}
