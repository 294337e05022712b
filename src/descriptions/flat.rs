//! Flat description layer: `"<keys> <description>"` strings
//!
//! Each `WhichKeyDesc_*` variable holds one entry, e.g.
//! `let g:WhichKeyDesc_find = "<leader>ff Find file"`. An entry with no text
//! after the keys describes its key with an empty string, which hides it.

use super::{Description, DescriptionProvider};
use crate::config::VariableStore;
use crate::keymap::{KeyNotation, KeySequence, Keystroke};

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Split an entry into its key notation and description text
fn split_entry(entry: &str) -> Option<(&str, &str)> {
    let entry = entry.trim_start_matches(is_blank);
    let line = entry.split('\n').next().unwrap_or_default();
    if line.is_empty() {
        return None;
    }
    let end = line.find(is_blank).unwrap_or(line.len());
    let (keys, rest) = line.split_at(end);
    Some((keys, rest.trim_start_matches(is_blank)))
}

#[derive(Debug, Clone, Default)]
pub struct FlatDescriptions {
    entries: Vec<(KeySequence, String)>,
}

impl FlatDescriptions {
    /// Parse entries in order; the first entry for a key sequence wins
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a str>, notation: &KeyNotation) -> Self {
        let mut parsed: Vec<(KeySequence, String)> = Vec::new();

        for entry in entries {
            let Some((keys_text, text)) = split_entry(entry) else {
                tracing::debug!("Skipping empty description entry {:?}", entry);
                continue;
            };
            let keys = match notation.parse(keys_text) {
                Ok(keys) if !keys.is_empty() => keys,
                Ok(_) => continue,
                Err(e) => {
                    tracing::debug!("Skipping description entry {:?}: {}", entry, e);
                    continue;
                }
            };
            if let Some((_, existing)) = parsed.iter().find(|(k, _)| *k == keys) {
                tracing::debug!(
                    "Duplicate description for {}: keeping {:?}, ignoring {:?}",
                    keys,
                    existing,
                    text
                );
                continue;
            }
            parsed.push((keys, text.to_string()));
        }

        Self { entries: parsed }
    }

    /// Entries from every `{prefix}_*` variable, in variable-name order
    pub fn from_variables(vars: &VariableStore, prefix: &str, notation: &KeyNotation) -> Self {
        let texts: Vec<String> = vars
            .with_prefix(prefix)
            .filter_map(|(name, value)| {
                let text = value.as_string();
                if text.is_none() {
                    tracing::debug!("Skipping {}: not a string", name);
                }
                text
            })
            .collect();
        Self::from_entries(texts.iter().map(String::as_str), notation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DescriptionProvider for FlatDescriptions {
    fn describe(&self, path: &[Keystroke]) -> Vec<Description> {
        self.entries
            .iter()
            .filter(|(keys, _)| keys.len() == path.len() + 1 && keys.starts_with(path))
            .map(|(keys, text)| Description::new(keys[path.len()], text.clone()))
            .collect()
    }
}
