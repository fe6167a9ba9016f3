//! Integration tests for expansion, aliasing, and matcher behavior.

use crate::common::pattern_dir;
use anyhow::Result;
use patrex::{CompileOptions, LoadOptions, PatrexError, PatternStore};

const NO_BUILTINS: LoadOptions = LoadOptions {
    include_builtins: false,
};

#[test]
fn test_log_line_grammar_end_to_end() -> Result<()> {
    patrex::test_utils::init_test_logging(None);

    let dir = pattern_dir(&[(
        "web",
        "REQUESTLINE %{WORD:method} %{URIPATH:path} HTTP/%{NUMBER:version}\n",
    )])?;
    let store = PatternStore::load(&[dir.path()], &LoadOptions::default())?;

    let re = store.compile(
        "^%{IPORHOST:client} - %{REQUESTLINE} %{NUMBER:status}$",
        &CompileOptions::default(),
    )?;

    let caps = re.captures("192.168.0.1 - GET /index.html HTTP/1.1 200").unwrap();
    assert_eq!(&caps["client"], "192.168.0.1");
    assert_eq!(&caps["method"], "GET");
    assert_eq!(&caps["path"], "/index.html");
    assert_eq!(&caps["version"], "1.1");
    assert_eq!(&caps["status"], "200");
    Ok(())
}

#[test]
fn test_token_free_template_round_trips() -> Result<()> {
    let store = PatternStore::new();
    let template = r"^(?P<word>\w+) (?P<num>[0-9]+)$";

    let compiled = store.compile(template, &CompileOptions::default())?;
    let direct = regex::Regex::new(template)?;

    for input in ["hello 42", "x 0", "not a match", "hello 42 trailing"] {
        assert_eq!(compiled.is_match(input), direct.is_match(input), "input: {input}");
    }
    assert_eq!(compiled.as_str(), direct.as_str());
    Ok(())
}

#[test]
fn test_alias_produces_named_field() -> Result<()> {
    let mut store = PatternStore::new();
    store.insert("NUM", "[0-9]+");

    let re = store.compile("%{NUM:count}", &CompileOptions::default())?;
    let caps = re.captures("42").unwrap();
    assert_eq!(caps.name("count").unwrap().as_str(), "42");
    Ok(())
}

#[test]
fn test_alias_renames_only_first_existing_group() -> Result<()> {
    let mut store = PatternStore::new();
    store.insert("PAIR", r"(?P<k>\w+)=(?P<v>\w+)");

    let re = store.compile("%{PAIR:first}", &CompileOptions::default())?;
    let caps = re.captures("user=alice").unwrap();

    // k was renamed to first; v kept its name.
    assert_eq!(caps.name("first").unwrap().as_str(), "user");
    assert_eq!(caps.name("v").unwrap().as_str(), "alice");
    assert!(caps.name("k").is_none());
    Ok(())
}

#[test]
fn test_nested_reference_with_alias() -> Result<()> {
    let mut store = PatternStore::new();
    store.insert("B", "x");
    store.insert("A", "%{B}");

    assert_eq!(store.expand("%{A}", false)?, "x");

    // Aliasing a fragment that is itself a bare reference wraps it first,
    // then the inner reference resolves on the next pass.
    let re = store.compile("%{A:letter}", &CompileOptions::default())?;
    assert_eq!(re.captures("x").unwrap().name("letter").unwrap().as_str(), "x");
    Ok(())
}

#[test]
fn test_repeated_token_expands_at_every_occurrence() -> Result<()> {
    let dir = pattern_dir(&[("base", "DIGIT [0-9]\n")])?;
    let store = PatternStore::load(&[dir.path()], &NO_BUILTINS)?;

    let expanded = store.expand("%{DIGIT}-%{DIGIT}-%{DIGIT}", false)?;
    assert_eq!(expanded, "[0-9]-[0-9]-[0-9]");
    Ok(())
}

#[test]
fn test_unresolved_reference_passes_through() {
    let store = PatternStore::new();

    // Expansion leaves the token verbatim; it is never dropped.
    assert_eq!(store.expand("%{MISSING}", false).unwrap(), "%{MISSING}");
    assert_eq!(
        store.expand("start %{MISSING} end", false).unwrap(),
        "start %{MISSING} end"
    );

    // Downstream the leftover token either trips the engine's syntax
    // checks or survives into the compiled pattern source; it must do one
    // of the two.
    match store.compile("%{MISSING}", &CompileOptions::default()) {
        Err(err) => assert!(matches!(err, PatrexError::InvalidPatternSyntax { .. })),
        Ok(re) => assert!(re.as_str().contains("%{MISSING}")),
    }
}

#[test]
fn test_strict_mode_surfaces_unresolved_reference() {
    let store = PatternStore::new();
    let options = CompileOptions {
        strict: true,
        ..Default::default()
    };

    let err = store.compile("%{MISSING}", &options).unwrap_err();
    assert!(matches!(err, PatrexError::UnresolvedReference { name } if name == "MISSING"));
}

#[test]
fn test_engine_syntax_error_propagates() -> Result<()> {
    let dir = pattern_dir(&[("bad", "BROKEN (unbalanced\n")])?;
    let store = PatternStore::load(&[dir.path()], &NO_BUILTINS)?;

    let err = store.compile("%{BROKEN}", &CompileOptions::default()).unwrap_err();
    match err {
        PatrexError::InvalidPatternSyntax { source } => {
            // The engine's own diagnosis is preserved unchanged.
            assert!(!source.to_string().is_empty());
        }
        other => panic!("expected InvalidPatternSyntax, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_compile_options_reach_the_engine() -> Result<()> {
    let mut store = PatternStore::new();
    store.insert("LEVEL", "warn");

    let re = store.compile(
        "^%{LEVEL:level}$",
        &CompileOptions {
            case_insensitive: true,
            ..Default::default()
        },
    )?;
    assert_eq!(re.captures("WARN").unwrap().name("level").unwrap().as_str(), "WARN");

    let strict_case = store.compile("^%{LEVEL:level}$", &CompileOptions::default())?;
    assert!(!strict_case.is_match("WARN"));
    Ok(())
}
