//! patrex - named regex pattern expansion with cycle-safe compilation.
//!
//! patrex turns grok-style log-line grammars like `%{IPORHOST:host}
//! %{NUMBER:bytes}` into a single runnable [`regex::Regex`] with named
//! capture groups. Reusable regular-expression fragments live in a
//! dictionary under short names; templates reference them (and each other)
//! with `%{NAME}` / `%{NAME:alias}` placeholder tokens, and compilation
//! resolves every reference down to a literal pattern.
//!
//! # Pipeline
//!
//! Three components compose the pipeline:
//!
//! - [`store`] - reads pattern-definition files from a set of directories
//!   into a [`PatternMap`], optionally merging the built-in pattern set
//!   shipped with the crate
//! - [`graph`] - builds the directed reference graph between pattern names
//!   and detects cycles before any expansion is attempted
//! - [`expand`] - fixed-point substitution of placeholder tokens, with
//!   capture-group aliasing, followed by compilation through
//!   [`regex::RegexBuilder`]
//!
//! The [`token`] module defines the placeholder grammar both the graph and
//! the expander tokenize with, and [`core`] holds the error type.
//!
//! # Example
//!
//! ```
//! use patrex::{compile, CompileOptions, PatternMap};
//!
//! let mut patterns = PatternMap::new();
//! patterns.insert("NUM".to_string(), "[0-9]+".to_string());
//! patterns.insert("PAIR".to_string(), "%{NUM}=%{NUM}".to_string());
//!
//! let re = compile("%{PAIR:kv}", &patterns, &CompileOptions::default())?;
//! let caps = re.captures("3=14").unwrap();
//! assert_eq!(&caps["kv"], "3=14");
//! # Ok::<(), patrex::PatrexError>(())
//! ```
//!
//! Or loaded from pattern files on disk, with the built-ins merged in:
//!
//! ```no_run
//! use patrex::{CompileOptions, LoadOptions, PatternStore};
//!
//! let store = PatternStore::load(&["./my-patterns"], &LoadOptions::default())?;
//! let re = store.compile(
//!     "%{TIMESTAMP_ISO8601:ts} %{LOGLEVEL:level} %{GREEDYDATA:message}",
//!     &CompileOptions::default(),
//! )?;
//! # Ok::<(), patrex::PatrexError>(())
//! ```
//!
//! # Failure Model
//!
//! A cyclic dictionary is rejected before substitution starts
//! ([`PatrexError::CyclicPattern`]); syntax errors from the regex engine
//! propagate once the expanded pattern is submitted
//! ([`PatrexError::InvalidPatternSyntax`]). References to names the
//! dictionary does not define pass through verbatim by default and only
//! become errors under [`CompileOptions::strict`].

pub mod core;
pub mod expand;
pub mod graph;
pub mod store;
pub mod token;

// test_utils is available to unit tests and, via the `test-utils` feature,
// to the integration suite.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use crate::core::{PatrexError, Result};
pub use crate::expand::{CompileOptions, compile, expand};
pub use crate::graph::PatternGraph;
pub use crate::store::{LoadOptions, PatternMap, PatternStore};
