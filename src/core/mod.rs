//! Core types for patrex.
//!
//! This module holds the foundations shared by the rest of the crate:
//!
//! - [`PatrexError`] - enumerated error types for every failure mode in the
//!   load/expand/compile pipeline
//! - [`Result`] - crate-wide result alias over [`PatrexError`]
//!
//! Everything else in the crate returns these types; no operation panics on
//! bad input.

pub mod error;

pub use error::{PatrexError, Result};
