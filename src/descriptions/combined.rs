//! Stack of description layers with explicit precedence

use super::{Description, DescriptionProvider};
use crate::keymap::Keystroke;

/// Description layers in declaration order; the last declared has the highest priority
#[derive(Default)]
pub struct CombinedDescriptionProvider {
    layers: Vec<Box<dyn DescriptionProvider>>,
}

impl CombinedDescriptionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_layer(&mut self, layer: impl DescriptionProvider + 'static) {
        self.layers.push(Box::new(layer));
    }

    /// Builder-style push
    pub fn with_layer(mut self, layer: impl DescriptionProvider + 'static) -> Self {
        self.push_layer(layer);
        self
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Text for `key` below `path`, taken from the highest-priority layer that has some
    pub fn lookup(&self, path: &[Keystroke], key: Keystroke) -> Option<String> {
        self.layers.iter().rev().find_map(|layer| {
            layer
                .describe(path)
                .into_iter()
                .find(|d| d.key == key && d.text.is_some())
                .and_then(|d| d.text)
        })
    }

    /// Custom description of exactly `keys`, used to title the current prefix
    pub fn which_key_description(&self, keys: &[Keystroke]) -> Option<String> {
        let (last, parent) = keys.split_last()?;
        self.lookup(parent, *last)
    }
}

impl DescriptionProvider for CombinedDescriptionProvider {
    /// All layers' descriptions, highest priority first
    fn describe(&self, path: &[Keystroke]) -> Vec<Description> {
        self.layers
            .iter()
            .rev()
            .flat_map(|layer| layer.describe(path))
            .collect()
    }
}

/// Text of the first description for `key` that has any
pub fn first_text(descriptions: &[Description], key: Keystroke) -> Option<&str> {
    descriptions
        .iter()
        .find(|d| d.key == key && d.text.is_some())
        .and_then(|d| d.text.as_deref())
}
