//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use whichkey::config::{VariableStore, WhichKeyConfig};
use whichkey::descriptions::{self, CombinedDescriptionProvider};
use whichkey::keymap::{
    parse_keys, ArgumentKind, BindingRegistry, BuiltinBindings, BuiltinCommand, CommandTrie,
    KeySequence, Keystroke, Mode, UserMapping, UserMappingTable,
};
use whichkey::{Mapping, Resolver, UnknownMappingPolicy};

/// Parse key notation with the default leader
pub fn keys(text: &str) -> KeySequence {
    parse_keys(text).unwrap()
}

pub fn key(c: char) -> Keystroke {
    Keystroke::char(c)
}

/// `(key, prefix, description)` triples for compact assertions
pub fn as_triples(mappings: &[(Keystroke, Mapping)]) -> Vec<(String, bool, String)> {
    mappings
        .iter()
        .map(|(k, m)| (k.canonical(), m.prefix, m.description.clone()))
        .collect()
}

/// A small slice of a Vim host's built-in command tree
pub fn normal_trie() -> CommandTrie {
    CommandTrie::new()
        .with(&keys("d"), BuiltinCommand::new("VimDeleteMotion").with_argument(ArgumentKind::Motion))
        .with(&keys("c"), BuiltinCommand::new("VimChangeMotion").with_argument(ArgumentKind::Motion))
        .with(&keys("gU"), BuiltinCommand::new("VimChangeCaseUpperMotion").with_argument(ArgumentKind::Motion))
        .with(&keys("gJ"), BuiltinCommand::new("VimDeleteJoinLinesSpaces"))
        .with(&keys("f"), BuiltinCommand::new("VimMotionFindCharForward").with_argument(ArgumentKind::Digraph))
        .with(&keys("r"), BuiltinCommand::new("VimChangeCharacter").with_argument(ArgumentKind::Character))
        .with(&keys("zt"), BuiltinCommand::new("VimScrollLineToTop"))
        .with(&keys("za"), BuiltinCommand::new("VimToggleFold"))
        .with(&keys("<C-w>s"), BuiltinCommand::new("VimWindowSplitHorizontal"))
        .with(&keys("<C-w>v"), BuiltinCommand::new("VimWindowSplitVertical"))
        .with(&keys("j"), BuiltinCommand::new("VimMotionDown"))
}

pub fn op_pending_trie() -> CommandTrie {
    CommandTrie::new()
        .with(&keys("w"), BuiltinCommand::new("VimMotionWordRight"))
        .with(&keys("j"), BuiltinCommand::new("VimMotionDown"))
        .with(&keys("iw"), BuiltinCommand::new("VimTextObjInnerWord"))
        .with(&keys("aw"), BuiltinCommand::new("VimTextObjOuterWord"))
}

pub fn builtins() -> BuiltinBindings {
    let normal = normal_trie();
    let op_pending = op_pending_trie();
    BuiltinBindings::from_tries([(Mode::Normal, &normal), (Mode::OperatorPending, &op_pending)])
}

/// User mappings in the shape of a typical `.ideavimrc`
pub fn user_mappings() -> UserMappingTable {
    let mut table = UserMappingTable::new();
    table.map(Mode::Normal, keys("gg"), UserMapping::action(":action EditorTextStart"));
    table.map(Mode::Normal, keys("gw"), UserMapping::action(":action ReformatCode"));
    table.map(Mode::Normal, keys("gba"), UserMapping::action(":action Annotate"));
    table.map(Mode::Normal, keys("gbb"), UserMapping::action(":action GitBranches"));
    table.map(Mode::Normal, keys("<leader>ff"), UserMapping::action(":action GotoFile"));
    table.map(Mode::Normal, keys("<leader>fg"), UserMapping::action(":action FindInPath"));
    table.map(Mode::Normal, keys("<leader>w"), UserMapping::action(":action SaveAll"));
    table.map(Mode::Normal, keys("<Space>"), UserMapping::redirect(keys("<leader>")));
    table
}

/// Everything one resolution needs, owned in one place
pub struct Fixture {
    pub builtins: BuiltinBindings,
    pub user: UserMappingTable,
    pub vars: VariableStore,
    pub config: WhichKeyConfig,
    pub descriptions: CombinedDescriptionProvider,
}

impl Fixture {
    pub fn new(builtins: BuiltinBindings, user: UserMappingTable, vars: VariableStore) -> Self {
        let config = WhichKeyConfig::from_variables(&vars);
        let descriptions = descriptions::from_variables(&vars, &config.notation());
        Self {
            builtins,
            user,
            vars,
            config,
            descriptions,
        }
    }

    pub fn standard() -> Self {
        Self::new(builtins(), user_mappings(), VariableStore::new())
    }

    /// Standard bindings with extra global variables
    pub fn with_vars(vars: VariableStore) -> Self {
        Self::new(builtins(), user_mappings(), vars)
    }

    /// Only user mappings, no built-in commands
    pub fn user_only(user: UserMappingTable) -> Self {
        Self::new(BuiltinBindings::new(), user, VariableStore::new())
    }

    pub fn registry(&self) -> BindingRegistry<'_> {
        BindingRegistry::new(&self.builtins, &self.user)
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::from_config(self.registry(), &self.descriptions, &self.config)
    }

    pub fn policy(&self) -> UnknownMappingPolicy<'_> {
        UnknownMappingPolicy::from_config(self.registry(), &self.config)
    }

    pub fn resolve(&self, typed: &str) -> Vec<(String, bool, String)> {
        as_triples(&self.resolver().nested_mappings(Mode::Normal, &keys(typed)))
    }
}
