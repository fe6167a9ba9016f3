//! Built-in pattern set, embedded at compile time.
//!
//! The files under `patterns/` ship with the crate and cover the common
//! log-grammar vocabulary (numbers, words, timestamps, addresses). They
//! use the same line format as caller pattern files and are parsed with
//! the same parser; the only difference is that they arrive from the
//! binary instead of the filesystem.
//!
//! Every built-in template is written to be accepted by the `regex` crate:
//! no look-around, no backreferences, no atomic groups.

/// Built-in pattern files, in load order.
pub(crate) const FILES: &[(&str, &str)] = &[
    ("base", include_str!("../../patterns/base")),
    ("net", include_str!("../../patterns/net")),
];
