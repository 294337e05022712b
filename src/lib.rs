//! which-key for a Vim emulation layer
//!
//! As keys are typed, this crate works out which keys may follow under the
//! current mode, labels them from layered description tables, and decides
//! whether a sequence that leads nowhere should still reach the editor.
//!
//! ```
//! use whichkey::config::{VariableStore, WhichKeyConfig};
//! use whichkey::keymap::{parse_keys, BindingRegistry, BuiltinBindings, Mode, UserMapping, UserMappingTable};
//! use whichkey::{descriptions, Resolver};
//!
//! let vars = VariableStore::new().with("WhichKeyDesc_find", "<leader>f Find file");
//! let config = WhichKeyConfig::from_variables(&vars);
//! let notation = config.notation();
//!
//! let builtins = BuiltinBindings::new();
//! let mut user = UserMappingTable::new();
//! user.map(Mode::Normal, notation.parse("<leader>f").unwrap(), UserMapping::action(":action GotoFile"));
//!
//! let descriptions = descriptions::from_variables(&vars, &notation);
//! let resolver = Resolver::from_config(BindingRegistry::new(&builtins, &user), &descriptions, &config);
//!
//! let next = resolver.nested_mappings(Mode::Normal, &parse_keys("<leader>").unwrap());
//! assert_eq!(next[0].1.description, "Find file");
//! ```

pub mod config;
pub mod config_paths;
pub mod descriptions;
pub mod keymap;
pub mod policy;
pub mod popup;
pub mod resolver;
pub mod sort;
pub mod tracing;

// Re-export commonly used types
pub use config::{VariableStore, WhichKeyConfig};
pub use keymap::{BindingRegistry, KeySequence, Keystroke, Mode};
pub use policy::UnknownMappingPolicy;
pub use popup::{PopupContent, PopupScheduler, PopupSink};
pub use resolver::{Mapping, Resolver};
pub use sort::{sort_mappings, SortOrder};
