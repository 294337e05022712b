//! The host's built-in command tree
//!
//! Each node is either a command (leaf) or a part node whose children are
//! keyed by the next keystroke. The registry flattens it once at startup.

use super::binding::BuiltinCommand;
use super::types::{KeySequence, Keystroke};

/// A node of the built-in command tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandNode {
    Command(BuiltinCommand),
    Part(CommandTrie),
}

/// Children of a part node, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTrie {
    children: Vec<(Keystroke, CommandNode)>,
}

impl CommandTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, keystroke: &Keystroke) -> Option<&CommandNode> {
        self.children
            .iter()
            .find(|(k, _)| k == keystroke)
            .map(|(_, node)| node)
    }

    /// Register a command under `keys`
    ///
    /// A command can't also be a part node: inserting below an existing
    /// command replaces it, and inserting onto an existing part node is ignored.
    pub fn insert(&mut self, keys: &[Keystroke], command: BuiltinCommand) {
        let Some((last, init)) = keys.split_last() else {
            return;
        };

        let mut trie = self;
        for keystroke in init {
            let idx = match trie.children.iter().position(|(k, _)| k == keystroke) {
                Some(idx) => idx,
                None => {
                    trie.children
                        .push((*keystroke, CommandNode::Part(CommandTrie::new())));
                    trie.children.len() - 1
                }
            };
            let node = &mut trie.children[idx].1;
            if let CommandNode::Command(existing) = node {
                tracing::debug!(
                    "Built-in {} shadowed by a longer command at {}",
                    existing.action_id,
                    KeySequence::from(keys)
                );
                *node = CommandNode::Part(CommandTrie::new());
            }
            trie = match node {
                CommandNode::Part(child) => child,
                CommandNode::Command(_) => return,
            };
        }

        match trie.children.iter_mut().find(|(k, _)| k == last) {
            Some((_, CommandNode::Part(_))) => {
                tracing::debug!(
                    "Ignoring built-in {} at {}: keys are a prefix of other commands",
                    command.action_id,
                    KeySequence::from(keys)
                );
            }
            Some((_, node)) => *node = CommandNode::Command(command),
            None => trie.children.push((*last, CommandNode::Command(command))),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, keys: &[Keystroke], command: BuiltinCommand) -> Self {
        self.insert(keys, command);
        self
    }

    /// All commands with their full key paths, depth first in insertion order
    ///
    /// Paths are accumulated on an explicit stack instead of walking parent
    /// links, so arbitrarily deep trees don't recurse.
    pub fn flatten(&self) -> Vec<(KeySequence, BuiltinCommand)> {
        let mut result = Vec::new();
        let mut stack: Vec<(KeySequence, &CommandNode)> = self
            .children
            .iter()
            .rev()
            .map(|(k, node)| (KeySequence::from(vec![*k]), node))
            .collect();

        while let Some((path, node)) = stack.pop() {
            match node {
                CommandNode::Command(command) => result.push((path, command.clone())),
                CommandNode::Part(trie) => {
                    for (k, child) in trie.children.iter().rev() {
                        stack.push((path.with(*k), child));
                    }
                }
            }
        }

        result
    }
}
