//! Editing modes that partition the binding tables
//!
//! Bindings are resolved independently per mode, the same way the Vim
//! emulation layer keeps one mapping table per mapping mode.

use std::str::FromStr;

use serde::Deserialize;

/// The modal editor's current mapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[serde(alias = "n")]
    Normal,
    #[serde(alias = "x", alias = "v")]
    Visual,
    #[serde(alias = "s")]
    Select,
    /// Transient mode after an operator key, awaiting a motion
    #[serde(alias = "o", alias = "op_pending")]
    OperatorPending,
    #[serde(alias = "i")]
    Insert,
    #[serde(alias = "c", alias = "command_line")]
    CmdLine,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Normal,
        Mode::Visual,
        Mode::Select,
        Mode::OperatorPending,
        Mode::Insert,
        Mode::CmdLine,
    ];

    /// Modes covered by a plain `:map`
    pub const MAP_MODES: [Mode; 4] = [
        Mode::Normal,
        Mode::Visual,
        Mode::Select,
        Mode::OperatorPending,
    ];

    /// Modes where typed keys are text rather than commands
    pub const fn is_text_entry(self) -> bool {
        matches!(self, Mode::Insert | Mode::CmdLine)
    }
}

impl FromStr for Mode {
    type Err = String;

    /// Accepts the long names and Vim's single-letter map prefixes (`n`, `x`, `o`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "n" => Ok(Mode::Normal),
            "visual" | "x" | "v" => Ok(Mode::Visual),
            "select" | "s" => Ok(Mode::Select),
            "operator_pending" | "op_pending" | "o" => Ok(Mode::OperatorPending),
            "insert" | "i" => Ok(Mode::Insert),
            "cmd_line" | "command_line" | "c" => Ok(Mode::CmdLine),
            _ => Err(format!("Unknown mode: {}", s)),
        }
    }
}
