//! A wildcard-pattern compiler for shell-style globs.
//!
//! This crate translates shell glob syntax — brace expansion, extended
//! alternation groups (`?()`/`*()`/`+()`/`@()`/`!()`), POSIX character
//! classes, globstar (`**`), and negation — into the source text of a
//! standard regular expression, compiles it with [`regex`], and
//! optionally applies the result against real filesystem paths with
//! symlink-aware `**` semantics.
//!
//! ```
//! use wcglob::{compile, GlobFlags};
//!
//! let matcher = compile("src/**/*.rs", GlobFlags::GLOBSTAR).unwrap();
//! assert!(matcher.is_match("src/compiler.rs"));
//! assert!(matcher.is_match("src/nested/mod.rs"));
//! assert!(!matcher.is_match("README.md"));
//! ```
//!
//! # Flags
//!
//! Every compilation is governed by a [`GlobFlags`] bitset (case
//! sensitivity, brace expansion, globstar, extended matching, and so
//! on); see its documentation for the full set and their defaults.
//!
//! # Filesystem matching
//!
//! [`FilesystemMatcher`] wraps a compiled pattern with `REALPATH`
//! semantics: a path only matches if it exists, and — unless `FOLLOW`
//! is also set — a `**` segment will not walk through a symlinked
//! directory.
//!
//! # Caching
//!
//! Compiled regexes are cached process-wide, keyed on the translated
//! regex source and the flags used to build it, so repeated calls to
//! [`compile`] for the same pattern don't pay to rebuild the backend
//! automaton.

#[macro_use]
mod log_macros;

mod brace;
mod cache;
mod chars;
mod compiler;
mod error;
mod flags;
mod fs;
mod matcher;
mod path_split;
mod posix;
mod split_top;

pub use crate::brace::{BraceExpander, DefaultBraceExpander};
pub use crate::error::{Error, Result};
pub use crate::flags::{GlobFlags, Platform};
pub use crate::fs::FilesystemMatcher;
pub use crate::matcher::{compile, path_split, split, translate, CompiledMatcher};
pub use crate::path_split::{PathSplit, Segment};
