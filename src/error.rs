//! The error surface of this crate.
//!
//! Most of what can go "wrong" with a shell glob is handled internally as a
//! best-effort literal fallback (see [`crate::compiler`]): an unterminated
//! `[...]`, a dangling `\`, an impossible range. None of that surfaces here.
//! What remains is the handful of conditions a caller genuinely needs to
//! know about.

use std::path::PathBuf;

/// Errors produced while compiling a pattern or matching it against the
/// filesystem.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The backend regular-expression engine rejected the string this
    /// crate's compiler produced for `glob`. This should never happen for
    /// well-formed patterns; it indicates a pathological input (one that
    /// blows past the backend's size limits) or a misbehaving custom
    /// [`BraceExpander`](crate::brace::BraceExpander).
    #[error("'{glob}': failed to compile translated pattern: {source}")]
    Regex {
        /// The original glob pattern that triggered the failure.
        glob: String,
        #[source]
        source: regex::Error,
    },

    /// A filesystem probe (`lexists`, `islink`, `isdir`) failed while
    /// applying a [`FilesystemMatcher`](crate::fs::FilesystemMatcher). A
    /// missing path is not an error — it is simply "no match" — but
    /// permission errors and similar I/O failures propagate.
    #[error("failed to inspect {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
