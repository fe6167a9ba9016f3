//! Fixed-point template expansion and regex compilation.
//!
//! This is the driver of the pipeline: given a top-level template (which
//! need not itself be a named pattern) and a dictionary, every placeholder
//! token is repeatedly substituted with its underlying fragment until no
//! resolvable token remains, and the resulting literal string is handed to
//! the regex engine.
//!
//! Two behaviors are preserved deliberately from the original grok
//! semantics:
//!
//! - **Replace-all-occurrences-per-pass**: a resolved token is substituted
//!   at every literal occurrence of its text in the working string, not
//!   just at the span the scanner matched. A template using `%{WORD}` three
//!   times gets all three replaced in one step.
//! - **First-named-group-only aliasing**: when `%{NAME:alias}` references a
//!   fragment that already contains named capture groups, only the first
//!   group marker is renamed to the alias; later groups keep their names.
//!   This is a documented limitation, not an error.
//!
//! Unresolved references (`%{NAME}` with no dictionary entry) are left
//! verbatim in the output by default, which usually surfaces later as an
//! [`InvalidPatternSyntax`](crate::PatrexError::InvalidPatternSyntax) from
//! the engine. [`CompileOptions::strict`] turns them into an immediate
//! [`UnresolvedReference`](crate::PatrexError::UnresolvedReference) error.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

use tracing::{debug, trace};

use crate::core::{PatrexError, Result};
use crate::graph::PatternGraph;
use crate::store::PatternMap;
use crate::token::{Token, find_placeholders};

/// Matches the opening marker of a named capture group, `(?P<name>`.
static NAMED_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\?P<\w+>").expect("named-group marker is valid regex"));

/// Flags applied when the expanded pattern is handed to the regex engine,
/// plus the expansion strictness switch.
///
/// The boolean flags map one-to-one onto [`regex::RegexBuilder`] options;
/// the default is everything off, matching the engine's own defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Match letters case-insensitively (`(?i)`).
    pub case_insensitive: bool,
    /// `^` and `$` match at line boundaries instead of text boundaries (`(?m)`).
    pub multi_line: bool,
    /// `.` also matches `\n` (`(?s)`).
    pub dot_matches_new_line: bool,
    /// Ignore pattern whitespace and allow `#` comments (`(?x)`).
    pub ignore_whitespace: bool,
    /// Fail with an error on an unresolved `%{NAME}` reference instead of
    /// leaving the token text in the expanded pattern.
    pub strict: bool,
}

/// Expand every placeholder token in `template` against `patterns`.
///
/// The dictionary is first checked for reference cycles; expansion refuses
/// to start on a cyclic dictionary. Substitution then runs in passes: each
/// pass scans the working string for tokens and replaces the resolvable
/// ones, so fragments that themselves contain tokens are resolved one
/// level per pass. The loop exits when a pass finds nothing left to
/// resolve — unresolved tokens do not count as progress, so they cannot
/// keep it alive.
///
/// Returns the fully expanded pattern source. With `strict` set, an
/// unresolved reference aborts expansion instead of passing through.
///
/// # Errors
///
/// - [`PatrexError::CyclicPattern`] if the dictionary contains a reference
///   cycle, naming one implicated pattern.
/// - [`PatrexError::UnresolvedReference`] in strict mode only.
///
/// # Examples
///
/// ```
/// use patrex::{expand, PatternMap};
///
/// let mut patterns = PatternMap::new();
/// patterns.insert("B".to_string(), "x".to_string());
/// patterns.insert("A".to_string(), "%{B}".to_string());
///
/// assert_eq!(expand("%{A}", &patterns, false)?, "x");
/// # Ok::<(), patrex::PatrexError>(())
/// ```
pub fn expand(template: &str, patterns: &PatternMap, strict: bool) -> Result<String> {
    let graph = PatternGraph::build(patterns);
    if let Some(name) = graph.find_cycle() {
        return Err(PatrexError::CyclicPattern { name });
    }

    let mut expanded = template.to_string();
    loop {
        let mut substituted = false;
        for token in find_placeholders(&expanded) {
            let Some(fragment) = patterns.get(&token.name) else {
                if strict {
                    return Err(PatrexError::UnresolvedReference { name: token.name });
                }
                trace!("leaving unresolved reference {} in place", token.text);
                continue;
            };
            let replacement = resolve_fragment(&token, fragment);
            trace!("substituting {} -> {}", token.text, replacement);
            // Replaces every occurrence of the token text in the working
            // string, not just the span this match came from.
            expanded = expanded.replace(&token.text, &replacement);
            substituted = true;
        }
        if !substituted {
            break;
        }
    }

    debug!("expanded template to {} chars", expanded.len());
    Ok(expanded)
}

/// Expand `template` against `patterns` and compile the result.
///
/// Runs [`expand`] (including the cycle pre-check), then hands the literal
/// pattern source to [`regex::RegexBuilder`] with the flags from
/// `options`.
///
/// # Errors
///
/// Everything [`expand`] can raise, plus
/// [`PatrexError::InvalidPatternSyntax`] when the engine rejects the
/// expanded source.
///
/// # Examples
///
/// ```
/// use patrex::{compile, CompileOptions, PatternMap};
///
/// let mut patterns = PatternMap::new();
/// patterns.insert("NUM".to_string(), "[0-9]+".to_string());
///
/// let re = compile("value=%{NUM:count}", &patterns, &CompileOptions::default())?;
/// let caps = re.captures("value=42").unwrap();
/// assert_eq!(&caps["count"], "42");
/// # Ok::<(), patrex::PatrexError>(())
/// ```
pub fn compile(template: &str, patterns: &PatternMap, options: &CompileOptions) -> Result<Regex> {
    let source = expand(template, patterns, options.strict)?;
    let regex = RegexBuilder::new(&source)
        .case_insensitive(options.case_insensitive)
        .multi_line(options.multi_line)
        .dot_matches_new_line(options.dot_matches_new_line)
        .ignore_whitespace(options.ignore_whitespace)
        .build()?;
    Ok(regex)
}

/// Compute the replacement text for one resolved token.
///
/// Without an alias the fragment is substituted verbatim. With an alias,
/// the first named capture group in the fragment is renamed to the alias;
/// a fragment without named groups is wrapped in a new one.
fn resolve_fragment(token: &Token, fragment: &str) -> String {
    match &token.alias {
        None => fragment.to_string(),
        Some(alias) => {
            if NAMED_GROUP_RE.is_match(fragment) {
                // TODO: decide whether a fragment with several named
                // groups should be rejected here; today only the first
                // marker is renamed.
                NAMED_GROUP_RE.replace(fragment, format!("(?P<{alias}>")).into_owned()
            } else {
                format!("(?P<{alias}>{fragment})")
            }
        }
    }
}
