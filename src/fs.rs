//! Symlink-aware matching against real filesystem paths (spec.md §4.8).
//!
//! A plain [`crate::matcher::CompiledMatcher`] only ever looks at a
//! path's text. `FilesystemMatcher` adds the two things that require
//! touching the filesystem: confirming the path actually exists when
//! `REALPATH` is set, and refusing to let a `**` segment walk through a
//! symlinked directory unless `FOLLOW` is also set — the same rule
//! shells apply so that a symlink loop can't turn a glob into an
//! infinite walk.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::brace::BraceExpander;
use crate::error::Error;
use crate::flags::GlobFlags;
use crate::matcher::CompiledMatcher;

/// Matches real filesystem paths against a compiled glob, applying
/// `REALPATH`/`FOLLOW` semantics.
pub struct FilesystemMatcher {
    matcher: CompiledMatcher,
    follow: bool,
    symlink_cache: RefCell<HashMap<PathBuf, bool>>,
}

impl FilesystemMatcher {
    /// Compiles `glob` and wraps it for filesystem-aware matching.
    pub fn new(glob: &str, flags: GlobFlags) -> Result<FilesystemMatcher, Error> {
        Self::new_with(glob, flags, &crate::brace::DefaultBraceExpander)
    }

    /// As [`FilesystemMatcher::new`], with a caller-supplied brace
    /// expander.
    pub fn new_with(
        glob: &str,
        flags: GlobFlags,
        brace_expander: &dyn BraceExpander,
    ) -> Result<FilesystemMatcher, Error> {
        let matcher = CompiledMatcher::new_with(glob, flags, brace_expander)?;
        Ok(FilesystemMatcher {
            follow: flags.contains(GlobFlags::FOLLOW),
            matcher,
            symlink_cache: RefCell::new(HashMap::new()),
        })
    }

    /// The underlying text matcher.
    pub fn matcher(&self) -> &CompiledMatcher {
        &self.matcher
    }

    /// Tests `path` against the compiled pattern.
    ///
    /// Under `REALPATH`, a path that does not exist never matches, and
    /// (absent `FOLLOW`) a path reached by crossing a symlinked
    /// directory under a `**` segment never matches either. Without
    /// `REALPATH`, this degrades to a plain text match and never
    /// touches the filesystem.
    pub fn is_match<P: AsRef<Path>>(&self, path: P) -> Result<bool, Error> {
        let path = path.as_ref();
        let text = path.to_string_lossy();
        if !self.matcher.is_match(text.as_ref()) {
            return Ok(false);
        }

        if !self.matcher.flags().contains(GlobFlags::REALPATH) {
            return Ok(true);
        }

        if std::fs::symlink_metadata(path).is_err() {
            return Ok(false);
        }

        if self.matcher.dir_only() && !std::fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
        {
            return Ok(false);
        }

        if self.follow {
            return Ok(true);
        }

        let crossed = if self.matcher.is_negated() {
            // The underlying regex didn't match (that's what makes a
            // negated pattern match) so it has no captures to scope a
            // check against — fall back to the conservative whole-path
            // walk.
            self.matcher.globstar_capture_count() > 0
                && self.crosses_symlinked_dir_all_ancestors(path)?
        } else {
            match self.matcher.captures(text.as_ref()) {
                Some(caps) => self.crosses_symlinked_dir_in_captures(&caps, text.as_ref())?,
                None => false,
            }
        };
        Ok(!crossed)
    }

    /// Checks each globstar capture group's matched span for a symlinked
    /// directory, rather than every ancestor of the whole path: a symlink
    /// sitting under a *literal* path component is allowed (spec.md §4.8
    /// step 4), only one reached by walking through a `**` span is
    /// refused.
    fn crosses_symlinked_dir_in_captures(
        &self,
        caps: &regex::Captures,
        full_text: &str,
    ) -> Result<bool, Error> {
        let sep = std::path::MAIN_SEPARATOR;
        for i in 1..=self.matcher.globstar_capture_count() {
            let Some(m) = caps.get(i) else { continue };
            let span = m.as_str();
            if span.is_empty() {
                continue;
            }
            let mut pos = m.start();
            for component in span.split(sep) {
                pos += component.len();
                if pos >= full_text.len() {
                    break;
                }
                let candidate = PathBuf::from(&full_text[..pos]);
                if self.is_symlinked_dir(&candidate)? {
                    return Ok(true);
                }
                pos += sep.len_utf8();
            }
        }
        Ok(false)
    }

    /// Walks `path`'s ancestor directories (excluding the path itself)
    /// checking whether any is a symlink. Used only as the negated-pattern
    /// fallback, where there's no match span to scope the check to.
    fn crosses_symlinked_dir_all_ancestors(&self, path: &Path) -> Result<bool, Error> {
        let mut current = PathBuf::new();
        let components: Vec<_> = path.components().collect();

        for component in components.iter().take(components.len().saturating_sub(1)) {
            current.push(component);
            if self.is_symlinked_dir(&current)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Checks whether `path` is a symlink, memoizing in
    /// [`Self::symlink_cache`] so repeated matches under a shared prefix
    /// don't re-stat it.
    fn is_symlinked_dir(&self, path: &Path) -> Result<bool, Error> {
        if let Some(&is_link) = self.symlink_cache.borrow().get(path) {
            return Ok(is_link);
        }
        let is_link = match std::fs::symlink_metadata(path) {
            Ok(meta) => meta.file_type().is_symlink(),
            Err(source) => return Err(Error::Io { path: path.to_path_buf(), source }),
        };
        self.symlink_cache.borrow_mut().insert(path.to_path_buf(), is_link);
        if is_link {
            debug!("globstar refused to cross symlinked dir: {}", path.display());
        }
        Ok(is_link)
    }
}
