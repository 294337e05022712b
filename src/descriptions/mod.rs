//! Layered lookup of human-readable descriptions
//!
//! Each layer answers "which children of this path have a description?".
//! Layers are stacked in [`CombinedDescriptionProvider`]: built-in defaults,
//! then the flat `WhichKeyDesc_*` variables, then the `WhichKey_Descriptions`
//! dictionary. Later layers win.
//!
//! # Example
//!
//! ```
//! use whichkey::config::VariableStore;
//! use whichkey::descriptions;
//! use whichkey::keymap::{parse_keys, KeyNotation, Keystroke};
//!
//! let vars = VariableStore::new().with("WhichKeyDesc_gg", "gg Top of file");
//! let provider = descriptions::from_variables(&vars, &KeyNotation::default());
//!
//! let g = parse_keys("g").unwrap();
//! assert_eq!(
//!     provider.lookup(&g, Keystroke::char('g')).as_deref(),
//!     Some("Top of file")
//! );
//! ```

mod combined;
mod defaults;
mod dictionary;
mod flat;

pub use combined::{first_text, CombinedDescriptionProvider};
pub use defaults::{DefaultDescriptions, DEFAULT_DESCRIPTIONS};
pub use dictionary::DictionaryDescriptions;
pub use flat::FlatDescriptions;

use crate::config::{VariableStore, DESCRIPTIONS_DICT, FLAT_DESCRIPTION_PREFIX};
use crate::keymap::{KeyNotation, Keystroke};

/// A candidate label for one next key below some path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub key: Keystroke,
    /// `None` when the layer knows the key but has no text for it
    pub text: Option<String>,
}

impl Description {
    pub fn new(key: Keystroke, text: impl Into<String>) -> Self {
        Self {
            key,
            text: Some(text.into()),
        }
    }

    pub fn untitled(key: Keystroke) -> Self {
        Self { key, text: None }
    }
}

/// One layer of descriptions
pub trait DescriptionProvider: Send + Sync {
    /// Descriptions of the direct children of `path`, exactly one key deeper
    fn describe(&self, path: &[Keystroke]) -> Vec<Description>;
}

/// The standard three layers built from the global variables
pub fn from_variables(vars: &VariableStore, notation: &KeyNotation) -> CombinedDescriptionProvider {
    CombinedDescriptionProvider::new()
        .with_layer(DefaultDescriptions::new())
        .with_layer(FlatDescriptions::from_variables(
            vars,
            FLAT_DESCRIPTION_PREFIX,
            notation,
        ))
        .with_layer(DictionaryDescriptions::from_variables(
            vars,
            DESCRIPTIONS_DICT,
            notation,
        ))
}
