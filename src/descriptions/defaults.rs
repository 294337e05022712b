//! Built-in descriptions for Vim's standard motions and operators
//!
//! Based on the which-key.nvim presets.

use super::{Description, DescriptionProvider};
use crate::keymap::{KeyNotation, KeySequence, Keystroke};

pub const DEFAULT_DESCRIPTIONS: &[(&str, &str)] = &[
    ("$", "End of line"),
    ("0", "Start of line"),
    ("b", "Prev word"),
    ("B", "Prev WORD"),
    ("c", "Change"),
    ("<c-w>h", "Go to the left window"),
    ("<c-w>j", "Go to the down window"),
    ("<c-w>k", "Go to the up window"),
    ("<c-w>l", "Go to the right window"),
    ("<c-w>o", "Close all other windows"),
    ("<c-w>q", "Quit a window"),
    ("<c-w>s", "Split window"),
    ("<c-w>-", "Decrease height"),
    ("<c-w><", "Decrease width"),
    ("<c-w>=", "Equally high and wide"),
    ("<c-w>+", "Increase height"),
    ("<c-w>>", "Increase width"),
    ("<c-w>_", "Max out the height"),
    ("<c-w>|", "Max out the width"),
    ("<c-w>", "window"),
    ("<c-w>T", "Break out into a new tab"),
    ("<c-w>v", "Split window vertically"),
    ("<c-w>w", "Switch windows"),
    ("<c-w>x", "Swap current with next"),
    ("d", "Delete"),
    ("e", "Next end of word"),
    ("E", "Next end of WORD"),
    ("f", "Move to next char"),
    ("F", "Move to prev char"),
    ("ge", "Prev end of word"),
    ("gf", "Go to file under cursor"),
    ("gg", "First line"),
    ("gi", "Go to last insert"),
    ("gN", "Search backwards and select"),
    ("gn", "Search forwards and select"),
    ("g%", "Cycle backwards through results"),
    ("g,", "Go to [count] newer position in change list"),
    ("g;", "Go to [count] older position in change list"),
    ("G", "Last line"),
    ("g~", "Toggle case"),
    ("gt", "Go to next tab page"),
    ("gT", "Go to previous tab page"),
    ("gu", "Lowercase"),
    ("gU", "Uppercase"),
    ("gv", "Last visual selection"),
    ("gw", "Format"),
    ("gx", "Open file with system app"),
    ("H", "Home line of window (top)"),
    ("h", "Left"),
    ("j", "Down"),
    ("k", "Up"),
    ("L", "Last line of window"),
    ("l", "Right"),
    ("M", "Middle line of window"),
    ("]M", "Next method end"),
    ("]m", "Next method start"),
    ("[M", "Previous method end"),
    ("[m", "Previous method start"),
    ("r", "Replace"),
    ("]s", "Next misspelled word"),
    ("[s", "Previous misspelled word"),
    ("<", "Indent left"),
    (">", "Indent right"),
    ("%", "Matching (){}[]"),
    ("](", "Next ("),
    ("]<", "Next <"),
    ("]{", "Next {"),
    ("}", "Next empty line"),
    (";", "Next ftFT"),
    ("]%", "Next unmatched group"),
    ("{", "Prev empty line"),
    (",", "Prev ftFT"),
    ("[(", "Previous ("),
    ("[<", "Previous <"),
    ("[{", "Previous {"),
    ("[%", "Previous unmatched group"),
    ("!", "Run program"),
    ("?", "Search backward"),
    ("/", "Search forward"),
    ("^", "Start of line (non ws)"),
    ("~", "Toggle case"),
    ("t", "Move before next char"),
    ("T", "Move before prev char"),
    ("v", "Visual"),
    ("V", "Visual Line"),
    ("w", "Next word"),
    ("W", "Next WORD"),
    ("y", "Yank"),
    ("zA", "Toggle all folds under cursor"),
    ("za", "Toggle fold under cursor"),
    ("zb", "Bottom this line"),
    ("z<CR>", "Top this line"),
    ("zC", "Close all folds under cursor"),
    ("zc", "Close fold under cursor"),
    ("zD", "Delete all folds under cursor"),
    ("zd", "Delete fold under cursor"),
    ("zE", "Delete all folds in file"),
    ("ze", "Right this line"),
    ("zf", "Create fold"),
    ("zg", "Add word to spell list"),
    ("zH", "Half screen to the left"),
    ("zi", "Toggle folding"),
    ("zL", "Half screen to the right"),
    ("zM", "Close all folds"),
    ("zm", "Fold more"),
    ("zO", "Open all folds under cursor"),
    ("zo", "Open fold under cursor"),
    ("zr", "Fold less"),
    ("zR", "Open all folds"),
    ("zs", "Left this line"),
    ("z=", "Spelling suggestions"),
    ("zt", "Top this line"),
    ("zv", "Show cursor line"),
    ("zw", "Mark word as bad/misspelling"),
    ("zx", "Update folds"),
    ("zz", "Center this line"),
];

/// The built-in defaults layer, parsed once
#[derive(Debug, Clone)]
pub struct DefaultDescriptions {
    entries: Vec<(KeySequence, &'static str)>,
}

impl Default for DefaultDescriptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultDescriptions {
    pub fn new() -> Self {
        let notation = KeyNotation::default();
        let entries = DEFAULT_DESCRIPTIONS
            .iter()
            .filter_map(|(keys, text)| match notation.parse(keys) {
                Ok(parsed) => Some((parsed, *text)),
                Err(e) => {
                    tracing::warn!("Invalid default description key {:?}: {}", keys, e);
                    None
                }
            })
            .collect();
        Self { entries }
    }
}

impl DescriptionProvider for DefaultDescriptions {
    fn describe(&self, path: &[Keystroke]) -> Vec<Description> {
        self.entries
            .iter()
            .filter(|(keys, _)| keys.len() == path.len() + 1 && keys.starts_with(path))
            .map(|(keys, text)| Description::new(keys[path.len()], *text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::{parse_keys, Modifiers};

    #[test]
    fn test_all_defaults_parse() {
        assert_eq!(DefaultDescriptions::new().entries.len(), DEFAULT_DESCRIPTIONS.len());
    }

    #[test]
    fn test_describe_only_exact_depth() {
        let defaults = DefaultDescriptions::new();

        let root = defaults.describe(&[]);
        assert!(root.contains(&Description::new(Keystroke::char('w'), "Next word")));
        assert!(root.contains(&Description::new(
            Keystroke::char_with_mods('w', Modifiers::CTRL),
            "window"
        )));
        assert!(!root.iter().any(|d| d.text.as_deref() == Some("First line")));

        let g = defaults.describe(&parse_keys("g").unwrap());
        assert!(g.contains(&Description::new(Keystroke::char('g'), "First line")));
        assert!(g.contains(&Description::new(Keystroke::char('w'), "Format")));
    }

    #[test]
    fn test_describe_named_and_bracket_keys() {
        let defaults = DefaultDescriptions::new();

        let z = defaults.describe(&parse_keys("z").unwrap());
        assert!(z.contains(&Description::new(parse_keys("<CR>").unwrap()[0], "Top this line")));

        let ctrl_w = defaults.describe(&parse_keys("<C-w>").unwrap());
        assert!(ctrl_w.contains(&Description::new(Keystroke::char('<'), "Decrease width")));
        assert!(ctrl_w.contains(&Description::new(Keystroke::char('>'), "Increase width")));
    }
}
