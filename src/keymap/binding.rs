//! Binding values from the two sources: built-in commands and user mappings

use super::notation::format_keys;
use super::types::KeySequence;

/// The argument a built-in command waits for after its keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    #[default]
    None,
    /// An operator: `d{motion}`
    Motion,
    /// A single literal character: `r{char}`
    Character,
    /// A character that may be entered as a digraph: `f{char}`
    Digraph,
}

/// A native command of the modal editor, as found in its command trie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinCommand {
    /// Host action identifier, also used as the fallback label
    pub action_id: String,
    pub argument: ArgumentKind,
}

impl BuiltinCommand {
    pub fn new(action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            argument: ArgumentKind::None,
        }
    }

    /// Set the expected argument (builder pattern)
    pub fn with_argument(mut self, argument: ArgumentKind) -> Self {
        self.argument = argument;
        self
    }

    /// Whether the keys after this command are its argument rather than a new command
    pub fn expects_argument(&self) -> bool {
        self.argument != ArgumentKind::None
    }
}

/// A user-defined mapping from the live remap table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserMapping {
    /// Terminal action (`:action Foo`, a handler, ...)
    Action { presentable: String },
    /// Expands to another key sequence; `recursive` is `map` vs `noremap`
    Redirect { to: KeySequence, recursive: bool },
}

impl UserMapping {
    pub fn action(presentable: impl Into<String>) -> Self {
        UserMapping::Action {
            presentable: presentable.into(),
        }
    }

    /// `map` style redirect, subject to further expansion
    pub fn redirect(to: KeySequence) -> Self {
        UserMapping::Redirect { to, recursive: true }
    }

    /// `noremap` style redirect
    pub fn noremap(to: KeySequence) -> Self {
        UserMapping::Redirect {
            to,
            recursive: false,
        }
    }

    /// Text the host would show for this mapping
    pub fn presentable_string(&self) -> String {
        match self {
            UserMapping::Action { presentable } => presentable.clone(),
            UserMapping::Redirect { to, .. } => format_keys(to),
        }
    }

    /// Target of a recursive redirect; non-recursive redirects are not followed
    pub fn recursive_target(&self) -> Option<&KeySequence> {
        match self {
            UserMapping::Redirect {
                to,
                recursive: true,
            } => Some(to),
            _ => None,
        }
    }
}

/// Which registry a binding came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingOrigin {
    BuiltIn,
    User,
}
