//! Flag bitset and platform/case-sensitivity resolution.
//!
//! Mirrors `wcmatch._wcparse`'s flag table (spec.md §3): a public bitset a
//! caller composes, plus a handful of internal-only bits used for
//! inter-component communication (never part of the public surface a
//! caller sets directly).

use bitflags::bitflags;

bitflags! {
    /// Pattern-compilation flags. Values are implementation-defined; only
    /// the bit positions matter, not their numeric identity.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct GlobFlags: u32 {
        /// Case-sensitive match (overrides platform default).
        const FORCECASE   = 0x0001;
        /// Case-insensitive match.
        const IGNORECASE  = 0x0002;
        /// Interpret `\n`, `\t`, `\xNN`, `\uNNNN`, `\N{NAME}` escapes before parsing.
        const RAWCHARS    = 0x0004;
        /// Treat a leading `!` (or `-` with MINUSNEGATE) as "exclude this pattern".
        const NEGATE      = 0x0008;
        /// Use `-` instead of `!` as the negation sigil.
        const MINUSNEGATE = 0x0010;
        /// `*`, `?`, and character classes do not cross the path separator.
        const PATHNAME    = 0x0020;
        /// `*` and `?` at segment start may match a leading `.`.
        const DOTMATCH    = 0x0040;
        /// Enable `?(...)`, `*(...)`, `+(...)`, `@(...)`, `!(...)`.
        const EXTMATCH    = 0x0080;
        /// `**` as a whole path segment matches any number of segments.
        const GLOBSTAR    = 0x0100;
        /// Enable `{a,b,c}` / `{1..3}` brace expansion.
        const BRACE       = 0x0200;
        /// Matching consults the filesystem (existence + symlink check).
        const REALPATH    = 0x0400;
        /// When REALPATH is set, follow symlinks in globstar matches.
        const FOLLOW      = 0x0800;
        /// Top-level `|` splits a pattern into multiple sub-patterns.
        const SPLIT       = 0x1000;
        /// A pattern containing no separator implicitly matches the
        /// basename at any depth (prefix `**/`).
        const MATCHBASE   = 0x2000;
    }
}

bitflags! {
    /// Internal-only flags used for inter-component communication. Never
    /// exposed on the public `GlobFlags` surface a caller composes; see
    /// SPEC_FULL.md §3.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub(crate) struct InternalFlags: u32 {
        /// Forces Windows-style path handling regardless of the host
        /// platform or case flags.
        const FORCE_WIN    = 0x0001;
        /// The caller wants regex source text, not a compiled matcher.
        const TRANSLATE    = 0x0002;
        /// Strip a leading path separator before compiling.
        const ANCHOR       = 0x0004;
        /// Force the faster complementary negative form even under TRANSLATE.
        const NO_TRANSLATE = 0x0008;
    }
}

/// The host platform's path-separator convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn host() -> Platform {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

const CASE_FLAGS: GlobFlags = GlobFlags::FORCECASE.union(GlobFlags::IGNORECASE);

/// Resolves case sensitivity from flags and platform default.
///
/// `FORCECASE` always wins; otherwise `IGNORECASE` always wins; otherwise
/// the platform default applies (Windows and macOS default
/// case-insensitive, everything else case-sensitive).
pub fn case_sensitive(flags: GlobFlags, platform: Platform) -> bool {
    if !flags.intersects(CASE_FLAGS) {
        platform_default_case_sensitive(platform)
    } else {
        flags.contains(GlobFlags::FORCECASE)
    }
}

fn platform_default_case_sensitive(platform: Platform) -> bool {
    !matches!(platform, Platform::Windows) && !cfg!(target_os = "macos")
}

/// Resolves whether to use Unix-style (`/`) or Windows-style (`\`) path
/// handling. Mirrors `_wcparse.is_unix_style`.
pub(crate) fn is_unix_style(
    flags: GlobFlags,
    internal: InternalFlags,
    platform: Platform,
) -> bool {
    if internal.contains(InternalFlags::FORCE_WIN) {
        return false;
    }
    !matches!(platform, Platform::Windows)
        || (!flags.contains(GlobFlags::REALPATH) && case_sensitive(flags, platform))
}

/// The resolved path separator character for a given style.
pub(crate) fn separator(unix: bool) -> char {
    if unix {
        '/'
    } else {
        '\\'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forcecase_wins_over_platform_default() {
        assert!(case_sensitive(GlobFlags::FORCECASE, Platform::Windows));
    }

    #[test]
    fn ignorecase_wins_over_forcecase_absence() {
        assert!(!case_sensitive(GlobFlags::IGNORECASE, Platform::Unix));
    }

    #[test]
    fn platform_default_unix_is_case_sensitive() {
        assert!(case_sensitive(GlobFlags::empty(), Platform::Unix));
    }

    #[test]
    fn platform_default_windows_is_case_insensitive() {
        assert!(!case_sensitive(GlobFlags::empty(), Platform::Windows));
    }

    #[test]
    fn realpath_on_windows_forces_windows_style() {
        assert!(!is_unix_style(
            GlobFlags::REALPATH,
            InternalFlags::empty(),
            Platform::Windows
        ));
    }

    #[test]
    fn force_win_overrides_unix_host() {
        assert!(!is_unix_style(
            GlobFlags::empty(),
            InternalFlags::FORCE_WIN,
            Platform::Unix
        ));
    }
}
