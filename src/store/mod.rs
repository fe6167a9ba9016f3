//! Pattern store: materializes `name -> template` dictionaries from
//! pattern-definition files.
//!
//! # File Format
//!
//! Pattern files are plain text with one definition per line:
//!
//! ```text
//! NUM [0-9]+
//! PAIR %{NUM:left}=%{NUM:right}
//! ```
//!
//! A definition line is a `\w+` name, a single space, and the template
//! verbatim for the rest of the line (templates may contain placeholder
//! tokens and arbitrary regex syntax). Anything else — blank lines,
//! comments, malformed entries — is skipped silently; skipped lines are
//! visible on the `tracing` channel for callers who want diagnostics.
//!
//! Within a directory, only file names made of word characters and hyphens
//! are considered (`^[\w-]+$`), which excludes dotfiles and editor
//! droppings. Directories are scanned flat, without recursion.
//!
//! # Load Order
//!
//! Definitions obey last-write-wins: later files and later lines overwrite
//! earlier definitions of the same name, with no error on collision.
//! Caller folders are consulted first, in the order given; the built-in
//! set (when enabled via [`LoadOptions`]) is parsed last, as if it were an
//! additional final folder — so a built-in definition overrides a caller
//! definition of the same name.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::core::{PatrexError, Result};
use crate::expand::{self, CompileOptions};

mod builtins;

/// Dictionary mapping a pattern name to its raw template string.
///
/// Raw templates may themselves contain placeholder tokens; resolution
/// happens at compile time, not load time.
pub type PatternMap = HashMap<String, String>;

/// Accepts directory entries that look like pattern files.
static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w-]+$").expect("filename filter is valid regex"));

/// One definition per line: a `\w+` name, one space, the template verbatim.
static DEFINITION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>\w+) (?P<pattern>.+)$").expect("definition grammar is valid regex")
});

/// Options controlling how [`PatternStore::load`] assembles a dictionary.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Merge the built-in pattern set shipped with the crate.
    ///
    /// Built-ins are parsed after every caller-supplied folder, so under
    /// the last-write-wins rule a built-in definition overrides a caller
    /// definition of the same name.
    pub include_builtins: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            include_builtins: true,
        }
    }
}

/// Owns one pattern dictionary, from load to compile.
///
/// Every store allocates its own dictionary; stores never share state.
/// The dictionary is treated as read-only for the duration of a single
/// [`compile`](PatternStore::compile) call — callers needing concurrent
/// compiles should clone the store or serialize access externally.
///
/// # Examples
///
/// ```no_run
/// use patrex::{CompileOptions, LoadOptions, PatternStore};
///
/// let store = PatternStore::load(&["./patterns"], &LoadOptions::default())?;
/// let re = store.compile("%{IPORHOST:host} %{NUMBER:bytes}", &CompileOptions::default())?;
/// # Ok::<(), patrex::PatrexError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternStore {
    patterns: PatternMap,
}

impl PatternStore {
    /// Create an empty store with a freshly allocated dictionary.
    pub fn new() -> Self {
        Self {
            patterns: PatternMap::new(),
        }
    }

    /// Load pattern definitions from `folders`, in order.
    ///
    /// Each folder is scanned flat for pattern files (see the module docs
    /// for the filename filter and line format). After all caller folders,
    /// the built-in set is merged when `options.include_builtins` is set.
    ///
    /// # Errors
    ///
    /// [`PatrexError::PatternDirRead`] if a folder does not exist or
    /// cannot be enumerated, [`PatrexError::PatternFileRead`] if an
    /// accepted file cannot be read. Malformed lines inside readable files
    /// are never errors.
    pub fn load<P: AsRef<Path>>(folders: &[P], options: &LoadOptions) -> Result<Self> {
        let mut store = Self::new();
        for folder in folders {
            store.load_folder(folder.as_ref())?;
        }
        if options.include_builtins {
            store.merge_builtins();
        }
        debug!("pattern store loaded with {} definitions", store.len());
        Ok(store)
    }

    /// Scan one directory for pattern files and parse them.
    fn load_folder(&mut self, folder: &Path) -> Result<()> {
        let mut loaded = 0usize;
        for entry in WalkDir::new(folder).min_depth(1).max_depth(1).follow_links(false) {
            let entry = entry.map_err(|err| PatrexError::PatternDirRead {
                path: folder.to_path_buf(),
                source: err.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if !FILENAME_RE.is_match(&file_name) {
                trace!("skipping {}: not a pattern file name", entry.path().display());
                continue;
            }
            let text = fs::read_to_string(entry.path()).map_err(|source| {
                PatrexError::PatternFileRead {
                    path: entry.path().to_path_buf(),
                    source,
                }
            })?;
            let parsed = self.parse_definitions(&text);
            trace!("{}: {} definitions", entry.path().display(), parsed);
            loaded += parsed;
        }
        debug!("folder {} contributed {} definitions", folder.display(), loaded);
        Ok(())
    }

    /// Parse definition lines into the dictionary.
    ///
    /// Returns the number of lines that matched the definition grammar.
    /// Non-matching lines are skipped; non-blank ones are reported on the
    /// trace channel.
    fn parse_definitions(&mut self, text: &str) -> usize {
        let mut parsed = 0;
        for line in text.lines() {
            let Some(caps) = DEFINITION_RE.captures(line) else {
                if !line.trim().is_empty() {
                    trace!("skipping malformed definition line: {line:?}");
                }
                continue;
            };
            self.patterns.insert(caps["name"].to_string(), caps["pattern"].to_string());
            parsed += 1;
        }
        parsed
    }

    /// Parse the embedded built-in pattern files, in their shipped order.
    fn merge_builtins(&mut self) {
        for (file, text) in builtins::FILES {
            let parsed = self.parse_definitions(text);
            debug!("built-in pattern file '{file}' contributed {parsed} definitions");
        }
    }

    /// Look up the raw template for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.patterns.get(name).map(String::as_str)
    }

    /// Check whether `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }

    /// Define a pattern programmatically.
    ///
    /// Follows the same last-write-wins rule as file loading; the previous
    /// template is returned when `name` was already defined.
    pub fn insert(&mut self, name: impl Into<String>, template: impl Into<String>) -> Option<String> {
        self.patterns.insert(name.into(), template.into())
    }

    /// Number of defined patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if no patterns are defined.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate over the defined pattern names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// Borrow the underlying dictionary.
    pub fn patterns(&self) -> &PatternMap {
        &self.patterns
    }

    /// Consume the store, yielding the underlying dictionary.
    pub fn into_patterns(self) -> PatternMap {
        self.patterns
    }

    /// Expand `template` against this store's dictionary.
    ///
    /// See [`expand::expand`] for the substitution and strictness rules.
    pub fn expand(&self, template: &str, strict: bool) -> Result<String> {
        expand::expand(template, &self.patterns, strict)
    }

    /// Expand `template` against this store's dictionary and compile it.
    ///
    /// See [`expand::compile`] for the full contract.
    pub fn compile(&self, template: &str, options: &CompileOptions) -> Result<regex::Regex> {
        expand::compile(template, &self.patterns, options)
    }
}
