//! Resolver integration tests
//!
//! Tests for nested mapping resolution: direct children, redirects,
//! description layering and the structural invariants of the result.

mod common;

use common::{as_triples, key, keys, Fixture};

use whichkey::config::VariableStore;
use whichkey::descriptions::{first_text, DescriptionProvider};
use whichkey::keymap::{Mode, UserMapping, UserMappingTable};

fn triple(key: &str, prefix: bool, description: &str) -> (String, bool, String) {
    (key.to_string(), prefix, description.to_string())
}

fn sorted(mut triples: Vec<(String, bool, String)>) -> Vec<(String, bool, String)> {
    triples.sort();
    triples
}

// ========================================================================
// Direct Children Tests
// ========================================================================

#[test]
fn test_user_mappings_under_g() {
    let mut user = UserMappingTable::new();
    user.map(Mode::Normal, keys("gg"), UserMapping::action(":action EditorTextStart"));
    user.map(Mode::Normal, keys("gw"), UserMapping::action(":action ReformatCode"));
    user.map(Mode::Normal, keys("gba"), UserMapping::action(":action Annotate"));
    user.map(Mode::Normal, keys("gbb"), UserMapping::action(":action GitBranches"));
    let fixture = Fixture::user_only(user);

    assert_eq!(
        sorted(fixture.resolve("g")),
        sorted(vec![
            triple("g", false, "First line"),
            triple("w", false, "Format"),
            triple("b", true, "Prefix"),
        ])
    );
}

#[test]
fn test_builtins_come_first_and_undescribed_ones_are_hidden() {
    let fixture = Fixture::standard();

    assert_eq!(
        fixture.resolve("g"),
        vec![
            triple("U", false, "Uppercase"),
            triple("b", true, "Prefix"),
            triple("g", false, "First line"),
            triple("w", false, "Format"),
        ]
    );
}

#[test]
fn test_show_vim_actions_lists_every_builtin() {
    let fixture = Fixture::with_vars(VariableStore::new().with("WhichKey_ShowVimActions", true));

    assert_eq!(
        fixture.resolve("g"),
        vec![
            triple("U", false, "Uppercase"),
            triple("J", false, "VimDeleteJoinLinesSpaces"),
            triple("b", true, "Prefix"),
            triple("g", false, "First line"),
            triple("w", false, "Format"),
        ]
    );
}

#[test]
fn test_user_action_label_without_description() {
    let fixture = Fixture::standard();

    assert_eq!(
        fixture.resolve("gb"),
        vec![
            triple("a", false, ":action Annotate"),
            triple("b", false, ":action GitBranches"),
        ]
    );
}

#[test]
fn test_terminal_and_unknown_sequences_resolve_to_nothing() {
    let fixture = Fixture::standard();

    assert!(fixture.resolve("gw").is_empty());
    assert!(fixture.resolve("q").is_empty());
    assert!(fixture.resolve("gq").is_empty());
    assert!(fixture.resolve("j").is_empty());
}

#[test]
fn test_other_modes_are_independent() {
    let fixture = Fixture::standard();
    let resolver = fixture.resolver();

    assert!(resolver.nested_mappings(Mode::Visual, &keys("g")).is_empty());
    assert!(resolver.nested_mappings(Mode::Insert, &keys("g")).is_empty());
    assert_eq!(
        as_triples(&resolver.nested_mappings(Mode::OperatorPending, &keys("i"))),
        Vec::<(String, bool, String)>::new(),
        "iw has no description and is hidden"
    );
}

#[test]
fn test_reserved_placeholder_bindings_are_skipped() {
    let mut user = UserMappingTable::new();
    user.map(Mode::Normal, keys("<Plug>(easymotion-s)"), UserMapping::action("EasyMotion"));
    user.map(Mode::Normal, keys("s"), UserMapping::redirect(keys("<Plug>(easymotion-s)")));
    let fixture = Fixture::user_only(user);

    assert!(fixture.resolve("<Plug>").is_empty());
    assert!(fixture.resolve("s").is_empty());
}

// ========================================================================
// Redirect Tests
// ========================================================================

#[test]
fn test_redirect_is_followed_one_level() {
    let mut user = UserMappingTable::new();
    user.map(Mode::Normal, keys("ab"), UserMapping::redirect(keys("cd")));
    user.map(Mode::Normal, keys("cde"), UserMapping::action("E"));
    user.map(Mode::Normal, keys("cdf"), UserMapping::action("F"));
    let fixture = Fixture::user_only(user);

    assert_eq!(
        fixture.resolve("ab"),
        vec![triple("e", false, "E"), triple("f", false, "F")]
    );
}

#[test]
fn test_redirect_of_a_typed_prefix() {
    let fixture = Fixture::standard();

    assert_eq!(
        fixture.resolve("<Space>"),
        vec![
            triple("f", true, "Prefix"),
            triple("w", false, ":action SaveAll"),
        ]
    );
    assert_eq!(
        fixture.resolve("<Space>f"),
        vec![
            triple("f", false, ":action GotoFile"),
            triple("g", false, ":action FindInPath"),
        ]
    );
}

#[test]
fn test_redirect_target_descriptions_apply() {
    let vars = VariableStore::new().with("WhichKeyDesc_find", "<leader>f Find");
    let fixture = Fixture::with_vars(vars);

    assert_eq!(fixture.resolve("<Space>")[0], triple("f", true, "Find"));
}

#[test]
fn test_redirect_does_not_replace_direct_children() {
    let mut user = UserMappingTable::new();
    user.map(Mode::Normal, keys("x"), UserMapping::redirect(keys("y")));
    user.map(Mode::Normal, keys("xa"), UserMapping::action("direct"));
    user.map(Mode::Normal, keys("ya"), UserMapping::action("redirected"));
    user.map(Mode::Normal, keys("yb"), UserMapping::action("extra"));
    let fixture = Fixture::user_only(user);

    assert_eq!(
        fixture.resolve("x"),
        vec![triple("a", false, "direct"), triple("b", false, "extra")]
    );
}

#[test]
fn test_cyclic_redirects_terminate() {
    let mut user = UserMappingTable::new();
    user.map(Mode::Normal, keys("a"), UserMapping::redirect(keys("b")));
    user.map(Mode::Normal, keys("b"), UserMapping::redirect(keys("a")));
    user.map(Mode::Normal, keys("bc"), UserMapping::action("C"));
    let fixture = Fixture::user_only(user);

    assert_eq!(fixture.resolve("a"), vec![triple("c", false, "C")]);
    assert!(fixture.resolve("aa").is_empty());
    assert_eq!(fixture.resolve("b"), vec![triple("c", false, "C")]);
}

#[test]
fn test_self_redirect_terminates() {
    let mut user = UserMappingTable::new();
    user.map(Mode::Normal, keys("a"), UserMapping::redirect(keys("aa")));
    user.map(Mode::Normal, keys("aab"), UserMapping::action("B"));
    let fixture = Fixture::user_only(user);

    // one substitution per typed key, so "aa" is not expanded again
    assert_eq!(
        fixture.resolve("a"),
        vec![triple("a", true, "Prefix"), triple("b", false, "B")]
    );
}

#[test]
fn test_noremap_is_not_followed() {
    let mut user = UserMappingTable::new();
    user.map(Mode::Normal, keys("Y"), UserMapping::noremap(keys("gb")));
    user.map(Mode::Normal, keys("gba"), UserMapping::action("A"));
    let fixture = Fixture::user_only(user);

    assert!(fixture.resolve("Y").is_empty());
}

// ========================================================================
// Description Tests
// ========================================================================

#[test]
fn test_empty_description_hides_key() {
    let vars = VariableStore::from_yaml_str(
        r#"
WhichKeyDesc_find: "<leader>f Find"
WhichKey_Descriptions:
  "<leader>":
    f: ""
"#,
    )
    .unwrap();
    let fixture = Fixture::with_vars(vars);

    assert_eq!(
        fixture.resolve("<leader>"),
        vec![triple("w", false, ":action SaveAll")]
    );
}

#[test]
fn test_flat_entry_without_text_hides_key() {
    let vars = VariableStore::new().with("WhichKeyDesc_gw", "gw");
    let fixture = Fixture::with_vars(vars);

    assert!(fixture.resolve("g").iter().all(|(k, _, _)| k != "w"));
}

#[test]
fn test_layer_precedence() {
    let flat = VariableStore::new().with("WhichKeyDesc_top", "gg Go to top");
    let fixture = Fixture::with_vars(flat.clone());

    let described = fixture.descriptions.describe(&keys("g"));
    assert_eq!(first_text(&described, key('g')), Some("Go to top"));
    assert!(fixture
        .resolve("g")
        .contains(&triple("g", false, "Go to top")));

    let mut layered = flat;
    layered.set(
        "WhichKey_Descriptions",
        VariableStore::from_yaml_str("d:\n  g:\n    g: Top of file\n")
            .unwrap()
            .get("d")
            .cloned()
            .unwrap(),
    );
    let fixture = Fixture::with_vars(layered);
    assert!(fixture
        .resolve("g")
        .contains(&triple("g", false, "Top of file")));
}

#[test]
fn test_leader_from_variables() {
    let vars = VariableStore::new()
        .with("mapleader", ",")
        .with("WhichKeyDesc_save", "<leader>w Save all");
    let mut user = UserMappingTable::new();
    user.map(Mode::Normal, keys(",w"), UserMapping::action(":action SaveAll"));
    let fixture = Fixture::new(common::builtins(), user, vars);

    assert_eq!(fixture.resolve(","), vec![triple("w", false, "Save all")]);
}

#[test]
fn test_which_key_description_titles_prefix() {
    let vars = VariableStore::new().with("WhichKeyDesc_find", "<leader>f Find");
    let fixture = Fixture::with_vars(vars);
    let resolver = fixture.resolver();

    assert_eq!(
        resolver.which_key_description(&keys("<leader>f")).as_deref(),
        Some("Find")
    );
    assert_eq!(
        resolver.which_key_description(&keys("<C-w>")).as_deref(),
        Some("window")
    );
    assert_eq!(resolver.which_key_description(&keys("gb")), None);
}

// ========================================================================
// Invariant Tests
// ========================================================================

const SAMPLE_SEQUENCES: &[&str] = &["g", "gb", "z", "<C-w>", "<leader>", "<leader>f", "<Space>", "d"];

#[test]
fn test_resolution_is_idempotent() {
    let fixture = Fixture::with_vars(VariableStore::new().with("WhichKey_ShowVimActions", true));
    for typed in SAMPLE_SEQUENCES {
        assert_eq!(fixture.resolve(typed), fixture.resolve(typed), "{}", typed);
    }
}

#[test]
fn test_no_duplicate_keys() {
    let fixture = Fixture::with_vars(VariableStore::new().with("WhichKey_ShowVimActions", true));
    for typed in SAMPLE_SEQUENCES {
        let result = fixture.resolve(typed);
        let mut seen: Vec<&String> = result.iter().map(|(k, _, _)| k).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), result.len(), "duplicate key after {}", typed);
    }
}

#[test]
fn test_prefix_flag_matches_deeper_bindings() {
    let fixture = Fixture::with_vars(VariableStore::new().with("WhichKey_ShowVimActions", true));
    let registry = fixture.registry();

    // sequences without redirects, so children sit directly below the typed keys
    for typed in ["g", "gb", "z", "<C-w>", "<leader>", "<leader>f"] {
        let typed = keys(typed);
        for (key, mapping) in fixture.resolver().nested_mappings(Mode::Normal, &typed) {
            assert_eq!(
                mapping.prefix,
                registry.is_prefix(Mode::Normal, &typed.with(key)),
                "{}{}",
                typed,
                key
            );
        }
    }
}

#[test]
fn test_no_blank_descriptions() {
    let vars = VariableStore::new()
        .with("WhichKey_ShowVimActions", true)
        .with("WhichKeyDesc_blank", "gg   ");
    let fixture = Fixture::with_vars(vars);
    for typed in SAMPLE_SEQUENCES {
        assert!(fixture
            .resolve(typed)
            .iter()
            .all(|(_, _, description)| !description.trim().is_empty()));
    }
}
