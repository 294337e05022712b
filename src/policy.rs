//! Whether a sequence that resolves to nothing is still passed to the editor

use crate::config::WhichKeyConfig;
use crate::keymap::{ArgumentKind, BindingRegistry, Keystroke, Mode};

/// Recognizes repeated-operator idioms (`dd`, `gUU`, `gUgU`)
///
/// Which commands may be doubled is host-specific, so the policy takes it as
/// a predicate.
pub trait OperatorDoubling {
    fn is_doubled(&self, registry: &BindingRegistry<'_>, mode: Mode, keys: &[Keystroke]) -> bool;
}

/// Any predicate over the mode and typed keys
impl<F> OperatorDoubling for F
where
    F: Fn(Mode, &[Keystroke]) -> bool,
{
    fn is_doubled(&self, _registry: &BindingRegistry<'_>, mode: Mode, keys: &[Keystroke]) -> bool {
        self(mode, keys)
    }
}

/// `op op` or `op last(op)` where `op` is a built-in operator taking a motion
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinOperatorDoubling;

impl OperatorDoubling for BuiltinOperatorDoubling {
    fn is_doubled(&self, registry: &BindingRegistry<'_>, mode: Mode, keys: &[Keystroke]) -> bool {
        (1..keys.len()).any(|split| {
            let (op, tail) = keys.split_at(split);
            let is_operator = registry
                .builtin_command(mode, op)
                .is_some_and(|command| command.argument == ArgumentKind::Motion);
            is_operator && (tail == op || tail == &op[op.len() - 1..])
        })
    }
}

/// Admission policy for unresolved sequences
pub struct UnknownMappingPolicy<'a, D = BuiltinOperatorDoubling> {
    registry: BindingRegistry<'a>,
    process_unknown_mappings: bool,
    doubling: D,
}

impl<'a> UnknownMappingPolicy<'a> {
    pub fn new(registry: BindingRegistry<'a>, process_unknown_mappings: bool) -> Self {
        Self {
            registry,
            process_unknown_mappings,
            doubling: BuiltinOperatorDoubling,
        }
    }

    pub fn from_config(registry: BindingRegistry<'a>, config: &WhichKeyConfig) -> Self {
        Self::new(registry, config.process_unknown_mappings)
    }
}

impl<'a, D: OperatorDoubling> UnknownMappingPolicy<'a, D> {
    /// Replace the repeated-operator predicate
    pub fn with_doubling<E: OperatorDoubling>(self, doubling: E) -> UnknownMappingPolicy<'a, E> {
        UnknownMappingPolicy {
            registry: self.registry,
            process_unknown_mappings: self.process_unknown_mappings,
            doubling,
        }
    }

    /// Whether the editor should still process `keys`
    ///
    /// Only meaningful after resolution found no continuation. A refused
    /// sequence should be swallowed and the pending keys reset.
    pub fn admit(&self, mode: Mode, keys: &[Keystroke]) -> bool {
        if self.process_unknown_mappings || mode.is_text_entry() {
            return true;
        }

        let Some((last, prefix)) = keys.split_last() else {
            return true;
        };
        if prefix.is_empty() {
            return true;
        }

        if self.registry.is_action(mode, keys)
            || self.registry.is_action(Mode::OperatorPending, keys)
        {
            return true;
        }

        // The last key is the argument of a pending command (`f<char>`, `d<motion>`)
        if prefix.len() == 1
            && self
                .registry
                .builtin_command(mode, prefix)
                .is_some_and(|command| command.expects_argument())
        {
            return true;
        }

        // A custom operator followed by a motion
        if self.registry.is_user_mapping(mode, prefix) && self.registry.is_motion_start(*last) {
            return true;
        }

        if self.doubling.is_doubled(&self.registry, mode, keys) {
            return true;
        }

        tracing::debug!(
            "Refusing unknown sequence {} in {:?}",
            crate::keymap::KeySequence::from(keys),
            mode
        );
        false
    }
}
