//! Presentation order of resolved mappings

use std::cmp::Ordering;
use std::str::FromStr;

use crate::keymap::Keystroke;
use crate::resolver::Mapping;

/// How the popup orders its entries (`WhichKey_SortOrder`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    ByKey,
    ByKeyPrefixFirst,
    ByKeyPrefixLast,
    ByDescription,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "by_key" => Ok(SortOrder::ByKey),
            "by_key_prefix_first" => Ok(SortOrder::ByKeyPrefixFirst),
            "by_key_prefix_last" => Ok(SortOrder::ByKeyPrefixLast),
            "by_description" => Ok(SortOrder::ByDescription),
            _ => Err(format!("Unknown sort order: {}", s)),
        }
    }
}

fn compare_text(a: &str, b: &str, case_sensitive: bool) -> Ordering {
    if case_sensitive {
        a.cmp(b)
    } else {
        a.to_lowercase().cmp(&b.to_lowercase())
    }
}

/// Sort in place; keys compare by their canonical notation. Stable.
pub fn sort_mappings(entries: &mut [(Keystroke, Mapping)], order: SortOrder, case_sensitive: bool) {
    let by_key = |a: &(Keystroke, Mapping), b: &(Keystroke, Mapping)| {
        compare_text(&a.0.canonical(), &b.0.canonical(), case_sensitive)
    };

    match order {
        SortOrder::ByKey => entries.sort_by(by_key),
        SortOrder::ByKeyPrefixFirst => entries.sort_by(|a, b| {
            b.1.prefix.cmp(&a.1.prefix).then_with(|| by_key(a, b))
        }),
        SortOrder::ByKeyPrefixLast => entries.sort_by(|a, b| {
            a.1.prefix.cmp(&b.1.prefix).then_with(|| by_key(a, b))
        }),
        SortOrder::ByDescription => entries.sort_by(|a, b| {
            compare_text(&a.1.description, &b.1.description, case_sensitive)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: char, prefix: bool, description: &str) -> (Keystroke, Mapping) {
        (
            Keystroke::char(key),
            Mapping {
                prefix,
                description: description.to_string(),
            },
        )
    }

    fn keys(entries: &[(Keystroke, Mapping)]) -> String {
        entries.iter().map(|(k, _)| k.canonical()).collect()
    }

    fn sample() -> Vec<(Keystroke, Mapping)> {
        vec![
            entry('b', false, "buffers"),
            entry('G', true, "Git"),
            entry('a', true, "actions"),
            entry('c', false, "Close"),
        ]
    }

    #[test]
    fn test_by_key_case_sensitive() {
        let mut entries = sample();
        sort_mappings(&mut entries, SortOrder::ByKey, true);
        assert_eq!(keys(&entries), "Gabc");
    }

    #[test]
    fn test_by_key_case_insensitive() {
        let mut entries = sample();
        sort_mappings(&mut entries, SortOrder::ByKey, false);
        assert_eq!(keys(&entries), "abcG");
    }

    #[test]
    fn test_prefix_first_and_last() {
        let mut entries = sample();
        sort_mappings(&mut entries, SortOrder::ByKeyPrefixFirst, true);
        assert_eq!(keys(&entries), "Gabc");

        sort_mappings(&mut entries, SortOrder::ByKeyPrefixLast, false);
        assert_eq!(keys(&entries), "bcaG");
    }

    #[test]
    fn test_by_description() {
        let mut entries = sample();
        sort_mappings(&mut entries, SortOrder::ByDescription, true);
        assert_eq!(keys(&entries), "cGab");

        sort_mappings(&mut entries, SortOrder::ByDescription, false);
        assert_eq!(keys(&entries), "abcG");
    }

    #[test]
    fn test_parse_sort_order() {
        assert_eq!("BY_KEY_PREFIX_FIRST".parse::<SortOrder>(), Ok(SortOrder::ByKeyPrefixFirst));
        assert!("by_colour".parse::<SortOrder>().is_err());
    }
}
