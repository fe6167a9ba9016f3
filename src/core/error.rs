//! Error handling for patrex.
//!
//! All fallible operations in this crate return [`PatrexError`] through the
//! crate-wide [`Result`] alias. The taxonomy mirrors the pipeline stages:
//! load-time I/O failures, compile-time cycle detection, strict-mode
//! resolution failures, and syntax errors surfaced by the regex engine once
//! the fully expanded pattern is submitted for compilation.
//!
//! Two failure classes are deliberately *not* errors:
//!
//! - **Malformed definition lines** in pattern files are skipped silently
//!   and reported on the `tracing` diagnostics channel only.
//! - **Unresolved references** (`%{NAME}` where `NAME` is not in the
//!   dictionary) are left verbatim in the expanded pattern by default;
//!   they become [`PatrexError::UnresolvedReference`] only when the caller
//!   opts into strict expansion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, PatrexError>;

/// The error type for pattern loading, expansion, and compilation.
///
/// Each variant carries the context needed to act on the failure: the
/// offending path for I/O errors, the implicated pattern name for cycle and
/// resolution errors, and the underlying [`regex::Error`] for syntax errors.
#[derive(Error, Debug)]
pub enum PatrexError {
    /// A pattern directory could not be enumerated.
    ///
    /// Raised when a folder handed to the loader does not exist or cannot
    /// be read. Load-time I/O errors propagate immediately and are never
    /// retried.
    #[error("failed to read pattern directory {}", path.display())]
    PatternDirRead {
        /// The directory that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A pattern file inside a directory could not be read.
    #[error("failed to read pattern file {}", path.display())]
    PatternFileRead {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The pattern dictionary contains a reference cycle.
    ///
    /// Expanding a cyclic dictionary would never reach a fixed point, so
    /// compilation refuses to start. The named pattern is one node on the
    /// detected cycle.
    #[error("circular pattern reference detected involving '{name}'")]
    CyclicPattern {
        /// One pattern name implicated in the cycle.
        name: String,
    },

    /// A template referenced a name that is not in the dictionary.
    ///
    /// Only raised during strict expansion. The default policy leaves the
    /// literal token text in the expanded pattern instead.
    #[error("unresolved pattern reference '%{{{name}}}'")]
    UnresolvedReference {
        /// The name that could not be resolved.
        name: String,
    },

    /// The fully expanded pattern was rejected by the regex engine.
    ///
    /// Engine syntax errors (unbalanced groups, invalid escapes, duplicate
    /// group names, ...) propagate unchanged as the error source.
    #[error("expanded pattern is not valid regex syntax")]
    InvalidPatternSyntax {
        /// The rejection reported by the regex compiler.
        #[from]
        source: regex::Error,
    },
}
