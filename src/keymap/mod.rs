//! Key bindings of the modal editor, seen from the which-key side
//!
//! This module provides:
//! - Canonical keystrokes and key sequences with Vim notation
//! - The built-in command trie and its flattened per-mode snapshot
//! - User mappings (actions and redirects), loadable from YAML
//! - [`BindingRegistry`], the per-call union of both sources
//!
//! # Architecture
//!
//! ```text
//! CommandTrie ──flatten──> BuiltinBindings ─┐
//!                                            ├─> BindingRegistry ─> Resolver / UnknownMappingPolicy
//! keymap.yaml ──parse────> UserMappingTable ─┘
//! ```

mod binding;
mod config;
mod mode;
pub mod notation;
mod registry;
mod trie;
mod types;

pub use binding::{ArgumentKind, BindingOrigin, BuiltinCommand, UserMapping};
pub use config::{load_keymap_file, load_user_mappings, parse_keymap_yaml, KeymapError};
pub use mode::Mode;
pub use notation::{format_keys, parse_keys, KeyNotation, NotationError};
pub use registry::{
    BindingRegistry, BuiltinBindings, DirectChild, UserMappingSource, UserMappingTable,
};
pub use trie::{CommandNode, CommandTrie};
pub use types::{KeyCode, KeySequence, Keystroke, Modifiers};
