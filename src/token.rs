//! Placeholder token grammar.
//!
//! Templates reference other patterns with `%{NAME}` or `%{NAME:ALIAS}`
//! tokens, where `NAME` and `ALIAS` are each a run of word characters.
//! This module is the single definition of that grammar; the dependency
//! graph and the expander both tokenize through it so they can never
//! disagree about what counts as a reference.

use regex::Regex;
use std::sync::LazyLock;

/// Matches one placeholder occurrence: `%{NAME}` or `%{NAME:ALIAS}`.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%\{(?P<name>\w+)(?::(?P<alias>\w+))?\}")
        .expect("placeholder grammar is valid regex")
});

/// One `%{NAME}` / `%{NAME:ALIAS}` occurrence found in a template.
///
/// Tokens are transient: they exist only in string form inside a template
/// and disappear once the expander substitutes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The full matched text, including the `%{` and `}` delimiters.
    pub text: String,
    /// The referenced pattern name.
    pub name: String,
    /// The capture-group name requested for this reference, if any.
    pub alias: Option<String>,
}

/// Find every placeholder occurrence in `template`, in match order.
///
/// Occurrences are reported individually: a template containing the same
/// token twice yields two entries. Text that merely resembles a token
/// (`%{`, `%{bad-name}`, `${NAME}`) is not matched.
pub fn find_placeholders(template: &str) -> Vec<Token> {
    PLACEHOLDER_RE
        .captures_iter(template)
        .map(|caps| Token {
            text: caps[0].to_string(),
            name: caps["name"].to_string(),
            alias: caps.name("alias").map(|m| m.as_str().to_string()),
        })
        .collect()
}
