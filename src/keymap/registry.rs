//! Binding registry: the union of built-in commands and user mappings per mode
//!
//! The built-in half is flattened once from the host's command trie and never
//! changes. The user half is read through [`UserMappingSource`] on every call,
//! so remaps take effect between keystrokes without any invalidation.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;

use super::binding::{BindingOrigin, BuiltinCommand, UserMapping};
use super::mode::Mode;
use super::trie::CommandTrie;
use super::types::{KeySequence, Keystroke};

/// Flattened built-in commands of one mode
#[derive(Debug, Default)]
struct ModeBindings {
    entries: Vec<(KeySequence, BuiltinCommand)>,
    index: HashMap<KeySequence, usize>,
    /// Every strict, non-empty prefix of some entry
    prefixes: HashSet<KeySequence>,
}

impl ModeBindings {
    fn from_trie(trie: &CommandTrie) -> Self {
        let mut bindings = ModeBindings::default();
        for (keys, command) in trie.flatten() {
            for len in 1..keys.len() {
                bindings.prefixes.insert(KeySequence::from(&keys[..len]));
            }
            bindings.index.insert(keys.clone(), bindings.entries.len());
            bindings.entries.push((keys, command));
        }
        bindings
    }
}

/// Immutable snapshot of the host's built-in commands, all modes
#[derive(Debug, Default)]
pub struct BuiltinBindings {
    modes: HashMap<Mode, ModeBindings>,
}

impl BuiltinBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten one command trie per mode
    pub fn from_tries<'t>(tries: impl IntoIterator<Item = (Mode, &'t CommandTrie)>) -> Self {
        let modes: HashMap<Mode, ModeBindings> = tries
            .into_iter()
            .map(|(mode, trie)| (mode, ModeBindings::from_trie(trie)))
            .collect();

        tracing::debug!(
            "Loaded built-in bindings: {}",
            modes
                .iter()
                .map(|(mode, b)| format!("{:?}={}", mode, b.entries.len()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Self { modes }
    }

    /// All built-in commands of `mode`, depth first in trie order
    pub fn entries(&self, mode: Mode) -> &[(KeySequence, BuiltinCommand)] {
        self.modes
            .get(&mode)
            .map(|b| b.entries.as_slice())
            .unwrap_or_default()
    }

    /// The command bound to exactly `keys`
    pub fn command(&self, mode: Mode, keys: &[Keystroke]) -> Option<&BuiltinCommand> {
        let bindings = self.modes.get(&mode)?;
        let idx = *bindings.index.get(keys)?;
        bindings.entries.get(idx).map(|(_, command)| command)
    }

    /// Whether some built-in command is strictly longer than `keys` and starts with it
    pub fn is_prefix(&self, mode: Mode, keys: &[Keystroke]) -> bool {
        match self.modes.get(&mode) {
            Some(bindings) if keys.is_empty() => !bindings.entries.is_empty(),
            Some(bindings) => bindings.prefixes.contains(keys),
            None => false,
        }
    }
}

/// Read access to the live user remap table
///
/// Implementations are queried on every resolution and must not block on I/O.
/// Lookups borrow the table through [`UserMappingSource::for_each_mapping`]
/// instead of copying it.
pub trait UserMappingSource {
    /// Visit every user mapping of `mode`
    fn for_each_mapping(&self, mode: Mode, f: &mut dyn FnMut(&KeySequence, &UserMapping));

    /// The user mapping bound to exactly `keys`
    fn mapping(&self, mode: Mode, keys: &[Keystroke]) -> Option<UserMapping> {
        let mut found = None;
        self.for_each_mapping(mode, &mut |k, mapping| {
            if found.is_none() && &k[..] == keys {
                found = Some(mapping.clone());
            }
        });
        found
    }

    /// Owned copy of all user mappings of `mode`
    fn mappings(&self, mode: Mode) -> Vec<(KeySequence, UserMapping)> {
        let mut all = Vec::new();
        self.for_each_mapping(mode, &mut |k, mapping| all.push((k.clone(), mapping.clone())));
        all
    }
}

/// In-memory user mapping table, the equivalent of `:map` / `:noremap` state
#[derive(Debug, Clone, Default)]
pub struct UserMappingTable {
    modes: HashMap<Mode, BTreeMap<KeySequence, UserMapping>>,
}

impl UserMappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `keys` in `mode`, replacing any previous mapping of the same keys
    pub fn map(&mut self, mode: Mode, keys: KeySequence, mapping: UserMapping) {
        if keys.is_empty() {
            return;
        }
        self.modes.entry(mode).or_default().insert(keys, mapping);
    }

    /// Bind `keys` in several modes at once (`:map` covers normal, visual, select and op-pending)
    pub fn map_modes(&mut self, modes: &[Mode], keys: KeySequence, mapping: UserMapping) {
        for mode in modes {
            self.map(*mode, keys.clone(), mapping.clone());
        }
    }

    pub fn unmap(&mut self, mode: Mode, keys: &[Keystroke]) -> Option<UserMapping> {
        self.modes.get_mut(&mode)?.remove(keys)
    }

    pub fn clear(&mut self) {
        self.modes.clear();
    }

    pub fn len(&self) -> usize {
        self.modes.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserMappingSource for UserMappingTable {
    fn for_each_mapping(&self, mode: Mode, f: &mut dyn FnMut(&KeySequence, &UserMapping)) {
        if let Some(table) = self.modes.get(&mode) {
            for (keys, mapping) in table {
                f(keys, mapping);
            }
        }
    }

    fn mapping(&self, mode: Mode, keys: &[Keystroke]) -> Option<UserMapping> {
        self.modes.get(&mode)?.get(keys).cloned()
    }
}

/// A table shared with a config reloader
impl<T: UserMappingSource> UserMappingSource for RwLock<T> {
    fn for_each_mapping(&self, mode: Mode, f: &mut dyn FnMut(&KeySequence, &UserMapping)) {
        let guard = self.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.for_each_mapping(mode, f);
    }

    fn mapping(&self, mode: Mode, keys: &[Keystroke]) -> Option<UserMapping> {
        let guard = self.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.mapping(mode, keys)
    }
}

/// One valid next key below a typed sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectChild {
    pub key: Keystroke,
    /// No binding continues past this key
    pub terminal: bool,
    /// Presentable string of the binding ending at this key, or the key path itself
    pub default_label: String,
    /// `User` if any user mapping contributed this key
    pub origin: BindingOrigin,
}

/// Both binding sources for one resolution call
#[derive(Clone, Copy)]
pub struct BindingRegistry<'a> {
    builtins: &'a BuiltinBindings,
    user: &'a dyn UserMappingSource,
}

impl<'a> BindingRegistry<'a> {
    pub fn new(builtins: &'a BuiltinBindings, user: &'a dyn UserMappingSource) -> Self {
        Self { builtins, user }
    }

    pub fn builtins(&self) -> &'a BuiltinBindings {
        self.builtins
    }

    /// True for the empty sequence, or when some binding strictly extends `keys`
    pub fn is_prefix(&self, mode: Mode, keys: &[Keystroke]) -> bool {
        if keys.is_empty() || self.builtins.is_prefix(mode, keys) {
            return true;
        }
        let mut extended = false;
        self.user.for_each_mapping(mode, &mut |k, _| {
            extended |= k.len() > keys.len() && k.starts_with(keys);
        });
        extended
    }

    /// True when `keys` is exactly the path of some binding
    pub fn is_action(&self, mode: Mode, keys: &[Keystroke]) -> bool {
        self.builtins.command(mode, keys).is_some() || self.is_user_mapping(mode, keys)
    }

    pub fn is_user_mapping(&self, mode: Mode, keys: &[Keystroke]) -> bool {
        !keys.is_empty() && self.user.mapping(mode, keys).is_some()
    }

    pub fn builtin_command(&self, mode: Mode, keys: &[Keystroke]) -> Option<&'a BuiltinCommand> {
        self.builtins.command(mode, keys)
    }

    /// Whether `key` begins some operator-pending binding (a motion), built-in or `omap`
    pub fn is_motion_start(&self, key: Keystroke) -> bool {
        let keys = [key];
        if self.builtins.command(Mode::OperatorPending, &keys).is_some()
            || self.builtins.is_prefix(Mode::OperatorPending, &keys)
        {
            return true;
        }
        let mut starts = false;
        self.user.for_each_mapping(Mode::OperatorPending, &mut |k, _| {
            starts |= k.first() == Some(&key);
        });
        starts
    }

    /// Target of the recursive redirect bound to exactly `keys`
    pub fn resolve_redirect(&self, mode: Mode, keys: &[Keystroke]) -> Option<KeySequence> {
        if keys.is_empty() {
            return None;
        }
        self.user
            .mapping(mode, keys)
            .and_then(|mapping| mapping.recursive_target().cloned())
    }

    /// All next keys one level below `keys`, built-in bindings first, then user ones
    ///
    /// Bindings whose first key is a reserved placeholder are skipped.
    pub fn direct_children(&self, mode: Mode, keys: &[Keystroke]) -> Vec<DirectChild> {
        let mut children: Vec<(DirectChild, Option<String>)> = Vec::new();
        let depth = keys.len();

        let mut visit = |path: &[Keystroke], label: String, origin: BindingOrigin| {
            if path.len() <= depth || !path.starts_with(keys) {
                return;
            }
            if path.first().is_some_and(Keystroke::is_reserved) {
                return;
            }

            let key = path[depth];
            let terminal = path.len() == depth + 1;
            match children.iter_mut().find(|(child, _)| child.key == key) {
                Some((child, child_label)) => {
                    child.terminal &= terminal;
                    if origin == BindingOrigin::User {
                        child.origin = BindingOrigin::User;
                        if terminal {
                            *child_label = Some(label);
                        }
                    }
                }
                None => children.push((
                    DirectChild {
                        key,
                        terminal,
                        default_label: String::new(),
                        origin,
                    },
                    terminal.then_some(label),
                )),
            }
        };

        for (path, command) in self.builtins.entries(mode) {
            visit(path, command.action_id.clone(), BindingOrigin::BuiltIn);
        }
        self.user.for_each_mapping(mode, &mut |path, mapping| {
            visit(&path[..], mapping.presentable_string(), BindingOrigin::User);
        });

        children
            .into_iter()
            .map(|(mut child, label)| {
                child.default_label = label
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or_else(|| {
                        let mut path = KeySequence::from(keys);
                        path.push(child.key);
                        path.to_string()
                    });
                child
            })
            .collect()
    }
}
