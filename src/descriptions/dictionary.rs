//! Dictionary description layer
//!
//! ```vim
//! let g:WhichKey_Descriptions = {
//!     \ '<leader>': ['Leader', {
//!     \     'f': ['Find', { 'f': 'File', 'g': 'Grep' }],
//!     \     'w': 'Save',
//!     \ }],
//!     \ }
//! ```
//!
//! A value is a description string, a `[description, children]` pair, or a
//! bare dictionary of children with no description of its own.

use super::{Description, DescriptionProvider};
use crate::config::{VariableStore, VimValue};
use crate::keymap::{KeyNotation, Keystroke};

#[derive(Debug, Clone, PartialEq, Eq)]
enum DescriptionNode {
    Text(String),
    Group {
        text: Option<String>,
        children: Vec<(Keystroke, DescriptionNode)>,
    },
}

impl DescriptionNode {
    fn text(&self) -> Option<&str> {
        match self {
            DescriptionNode::Text(text) => Some(text),
            DescriptionNode::Group { text, .. } => text.as_deref(),
        }
    }
}

fn convert_value(value: &VimValue, notation: &KeyNotation) -> Option<DescriptionNode> {
    match value {
        VimValue::Text(_) | VimValue::Number(_) => value.as_string().map(DescriptionNode::Text),
        VimValue::List(items) => {
            let text = items.first().and_then(VimValue::as_string);
            let children = match items.last() {
                Some(VimValue::Dictionary(entries)) => convert_dictionary(entries, notation),
                _ => Vec::new(),
            };
            Some(DescriptionNode::Group { text, children })
        }
        VimValue::Dictionary(entries) => Some(DescriptionNode::Group {
            text: None,
            children: convert_dictionary(entries, notation),
        }),
    }
}

fn convert_dictionary(
    entries: &[(String, VimValue)],
    notation: &KeyNotation,
) -> Vec<(Keystroke, DescriptionNode)> {
    let mut children: Vec<(Keystroke, DescriptionNode)> = Vec::new();

    for (key_text, value) in entries {
        let key = match notation.parse_single(key_text) {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!("Skipping description key {:?}: {}", key_text, e);
                continue;
            }
        };
        if children.iter().any(|(k, _)| *k == key) {
            tracing::debug!("Duplicate description key {:?}, keeping the first", key_text);
            continue;
        }
        if let Some(node) = convert_value(value, notation) {
            children.push((key, node));
        }
    }

    children
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryDescriptions {
    root: Vec<(Keystroke, DescriptionNode)>,
}

impl DictionaryDescriptions {
    /// Build from a dictionary value; anything else yields an empty layer
    pub fn from_value(value: &VimValue, notation: &KeyNotation) -> Self {
        match value {
            VimValue::Dictionary(entries) => Self {
                root: convert_dictionary(entries, notation),
            },
            other => {
                tracing::debug!("Description table is not a dictionary: {:?}", other);
                Self::default()
            }
        }
    }

    pub fn from_variables(vars: &VariableStore, name: &str, notation: &KeyNotation) -> Self {
        vars.get(name)
            .map(|value| Self::from_value(value, notation))
            .unwrap_or_default()
    }
}

impl DescriptionProvider for DictionaryDescriptions {
    fn describe(&self, path: &[Keystroke]) -> Vec<Description> {
        let mut children = &self.root;
        for key in path {
            match children.iter().find(|(k, _)| k == key) {
                Some((_, DescriptionNode::Group { children: next, .. })) => children = next,
                _ => return Vec::new(),
            }
        }

        children
            .iter()
            .map(|(key, node)| Description {
                key: *key,
                text: node.text().map(str::to_string),
            })
            .collect()
    }
}
