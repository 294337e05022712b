//! Key-sequence resolution: which keys may follow what was typed
//!
//! ```text
//! typed keys ─┬─> direct children ───────────────┐
//!             ├─> prefix-by-prefix redirects ─────┼─> candidates ─> descriptions ─> mappings
//!             └─> redirect of the whole sequence ─┘
//! ```

use crate::config::WhichKeyConfig;
use crate::descriptions::{first_text, CombinedDescriptionProvider, DescriptionProvider};
use crate::keymap::{BindingOrigin, BindingRegistry, DirectChild, KeySequence, Keystroke, Mode};

/// Label of a continuation that only leads to further keys
pub const DEFAULT_PREFIX_LABEL: &str = "Prefix";

/// What pressing one next key does
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    /// More keys are needed after this one
    pub prefix: bool,
    pub description: String,
}

/// Stateless resolver over a registry and description snapshot
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    registry: BindingRegistry<'a>,
    descriptions: &'a CombinedDescriptionProvider,
    show_vim_actions: bool,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: BindingRegistry<'a>, descriptions: &'a CombinedDescriptionProvider) -> Self {
        Self {
            registry,
            descriptions,
            show_vim_actions: false,
        }
    }

    pub fn from_config(
        registry: BindingRegistry<'a>,
        descriptions: &'a CombinedDescriptionProvider,
        config: &WhichKeyConfig,
    ) -> Self {
        Self::new(registry, descriptions).with_vim_actions(config.show_vim_actions)
    }

    /// Also list built-in commands that no description layer mentions
    pub fn with_vim_actions(mut self, show: bool) -> Self {
        self.show_vim_actions = show;
        self
    }

    pub fn registry(&self) -> BindingRegistry<'a> {
        self.registry
    }

    /// All valid next keys after `typed`, one entry per key, in discovery order
    ///
    /// Empty for an empty sequence. Entries whose description resolves to
    /// blank text are left out.
    pub fn nested_mappings(&self, mode: Mode, typed: &[Keystroke]) -> Vec<(Keystroke, Mapping)> {
        if typed.is_empty() {
            return Vec::new();
        }

        let typed_path = KeySequence::from(typed);
        let mut candidates: Vec<(DirectChild, KeySequence)> = Vec::new();
        let mut collect = |children: Vec<DirectChild>, parent: &KeySequence| {
            for child in children {
                if !candidates.iter().any(|(c, _)| c.key == child.key) {
                    candidates.push((child, parent.clone()));
                }
            }
        };

        collect(self.registry.direct_children(mode, typed), &typed_path);

        // At most one substitution per typed key, so redirect cycles terminate
        let mut replaced = KeySequence::new();
        for keystroke in typed {
            replaced.push(*keystroke);
            if let Some(target) = self.registry.resolve_redirect(mode, &replaced) {
                replaced = target;
            }
        }
        if replaced != typed_path {
            collect(self.registry.direct_children(mode, &replaced), &replaced);
        }

        if let Some(target) = self.registry.resolve_redirect(mode, typed) {
            if target != replaced {
                collect(self.registry.direct_children(mode, &target), &target);
            }
        }

        let descriptions = self.descriptions.describe(typed);
        let mut result = Vec::with_capacity(candidates.len());

        for (child, parent) in candidates {
            let text = first_text(&descriptions, child.key)
                .map(str::to_string)
                .or_else(|| {
                    (parent != typed_path)
                        .then(|| self.descriptions.lookup(&parent, child.key))
                        .flatten()
                });

            if text.is_none() && child.origin == BindingOrigin::BuiltIn && !self.show_vim_actions {
                continue;
            }

            let description = text.unwrap_or_else(|| {
                if child.terminal {
                    child.default_label.clone()
                } else {
                    DEFAULT_PREFIX_LABEL.to_string()
                }
            });
            if description.trim().is_empty() {
                continue;
            }

            result.push((
                child.key,
                Mapping {
                    prefix: !child.terminal,
                    description,
                },
            ));
        }

        tracing::trace!(
            "Resolved {} in {:?}: {} continuations (via {})",
            typed_path,
            mode,
            result.len(),
            replaced
        );

        result
    }

    /// Custom description of exactly `typed`, for titling the popup
    pub fn which_key_description(&self, typed: &[Keystroke]) -> Option<String> {
        self.descriptions.which_key_description(typed)
    }
}
