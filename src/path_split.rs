//! Splits a pattern into path segments ahead of compilation (spec.md
//! §4.5; mirrors `wcmatch._wcparse.WcPathSplit`).
//!
//! Segmentation happens on the pattern *text*, independent of whatever
//! the compiler later decides is "magic" inside a segment: a `/` (or
//! `\` on Windows) outside an escape and outside a `[...]` sequence
//! always starts a new segment, a root or drive prefix is recognized
//! up front, and `MATCHBASE` synthesizes a leading `**` segment for
//! separator-free patterns.

use crate::flags::{self, GlobFlags, InternalFlags, Platform};

/// One path segment of a split pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The segment's pattern text (without surrounding separators).
    pub text: String,
    /// Whether the segment contains unescaped wildcard syntax.
    pub is_magic: bool,
    /// Whether the segment is exactly `**` with `GLOBSTAR` active.
    pub is_globstar: bool,
}

/// The result of splitting one pattern into a root/drive prefix plus a
/// sequence of path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSplit {
    /// `true` if the pattern is rooted (starts with a separator, or a
    /// drive/UNC prefix on Windows).
    pub is_absolute: bool,
    /// The literal root/drive prefix text, e.g. `/`, `C:\`, `\\server\share\`.
    /// Empty when `is_absolute` is `false`.
    pub root: String,
    /// The path segments following the root, in order.
    pub segments: Vec<Segment>,
    /// Whether the original pattern ended with a trailing separator,
    /// i.e. the match is constrained to directories.
    pub dir_only: bool,
}

/// Splits `pattern` into a [`PathSplit`], resolving platform path style
/// from `flags`/`internal`/`platform` the same way the compiler does.
pub fn path_split(
    pattern: &str,
    flags: GlobFlags,
    internal: InternalFlags,
    platform: Platform,
) -> PathSplit {
    let unix = flags::is_unix_style(flags, internal, platform);
    let sep = flags::separator(unix);

    let (root, rest) = split_root(pattern, unix);
    let dir_only = !rest.is_empty() && rest.ends_with(sep);
    let trimmed = rest.strip_suffix(sep).unwrap_or(rest);

    let mut segments: Vec<Segment> = Vec::new();
    if !trimmed.is_empty() {
        for part in split_unescaped(trimmed, sep) {
            segments.push(classify(part, flags));
        }
    }

    if flags.contains(GlobFlags::MATCHBASE) && root.is_empty() && segments.len() <= 1 {
        segments.insert(
            0,
            Segment { text: "**".to_string(), is_magic: true, is_globstar: true },
        );
    }

    PathSplit { is_absolute: !root.is_empty(), root, segments, dir_only }
}

/// Recognizes a rooted prefix: POSIX `/`, a Windows drive letter
/// (`C:\`), or a Windows UNC share (`\\server\share\`). Returns the
/// prefix text and the remainder of the pattern.
fn split_root(pattern: &str, unix: bool) -> (String, &str) {
    if unix {
        if let Some(rest) = pattern.strip_prefix('/') {
            return ("/".to_string(), rest);
        }
        return (String::new(), pattern);
    }

    let chars: Vec<char> = pattern.chars().collect();
    if chars.len() >= 2 && chars[1] == ':' && chars[0].is_ascii_alphabetic() {
        let mut end = 2;
        if chars.get(2) == Some(&'\\') || chars.get(2) == Some(&'/') {
            end = 3;
        }
        let prefix: String = chars[..end].iter().collect();
        return (prefix, &pattern[end.min(pattern.len())..]);
    }

    if chars.len() >= 2 && chars[0] == '\\' && chars[1] == '\\' {
        // UNC: \\server\share\...
        let mut idx = 2;
        let mut seen_seps = 0;
        while idx < chars.len() && seen_seps < 2 {
            if chars[idx] == '\\' || chars[idx] == '/' {
                seen_seps += 1;
            }
            idx += 1;
        }
        let prefix: String = chars[..idx].iter().collect();
        return (prefix, &pattern[idx.min(pattern.len())..]);
    }

    if let Some(rest) = pattern.strip_prefix('\\') {
        return ("\\".to_string(), rest);
    }
    (String::new(), pattern)
}

/// Splits `text` on `sep`, treating a `\` escape and a `[...]` sequence
/// as opaque to the separator (a literal separator character inside a
/// bracket sequence does not start a new segment).
fn split_unescaped(text: &str, sep: char) -> Vec<&str> {
    let chars: Vec<char> = text.chars().collect();
    let offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();

    let mut parts = Vec::new();
    let mut seg_start = 0usize;
    let mut i = 0usize;
    let mut in_bracket = false;

    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                i += 2;
                continue;
            }
            '[' if !in_bracket => {
                in_bracket = true;
            }
            ']' if in_bracket => {
                in_bracket = false;
            }
            c if c == sep && !in_bracket => {
                let end = offsets[i];
                parts.push(&text[offsets[seg_start]..end]);
                seg_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    let tail_start = offsets.get(seg_start).copied().unwrap_or(text.len());
    parts.push(&text[tail_start..]);
    parts
}

fn classify(text: &str, flags: GlobFlags) -> Segment {
    let is_globstar = text == "**" && flags.contains(GlobFlags::GLOBSTAR);
    let is_magic = is_globstar || contains_magic(text, flags);
    Segment { text: text.to_string(), is_magic, is_globstar }
}

fn contains_magic(text: &str, flags: GlobFlags) -> bool {
    let extmatch = flags.contains(GlobFlags::EXTMATCH);
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0usize;
    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => i += 1,
            '*' | '?' | '[' => return true,
            '(' if extmatch && i > 0 && matches!(chars[i - 1], '?' | '*' | '+' | '@' | '!') => {
                return true
            }
            _ => {}
        }
        i += 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_with(bits: GlobFlags) -> GlobFlags {
        bits
    }

    #[test]
    fn splits_plain_unix_segments() {
        let split = path_split("a/b/*.txt", flags_with(GlobFlags::empty()), InternalFlags::empty(), Platform::Unix);
        assert!(!split.is_absolute);
        assert_eq!(split.segments.len(), 3);
        assert!(split.segments[2].is_magic);
        assert!(!split.segments[0].is_magic);
    }

    #[test]
    fn recognizes_posix_root() {
        let split = path_split("/a/b", flags_with(GlobFlags::empty()), InternalFlags::empty(), Platform::Unix);
        assert!(split.is_absolute);
        assert_eq!(split.root, "/");
        assert_eq!(split.segments.len(), 2);
    }

    #[test]
    fn recognizes_windows_drive() {
        let split = path_split(
            "C:\\a\\b",
            GlobFlags::empty(),
            InternalFlags::FORCE_WIN,
            Platform::Windows,
        );
        assert!(split.is_absolute);
        assert_eq!(split.root, "C:\\");
        assert_eq!(split.segments.len(), 2);
    }

    #[test]
    fn recognizes_unc_share() {
        let split = path_split(
            "\\\\server\\share\\file.txt",
            GlobFlags::empty(),
            InternalFlags::FORCE_WIN,
            Platform::Windows,
        );
        assert!(split.is_absolute);
        assert_eq!(split.root, "\\\\server\\share\\");
        assert_eq!(split.segments.len(), 1);
    }

    #[test]
    fn detects_trailing_separator_as_dir_only() {
        let split = path_split("a/b/", GlobFlags::empty(), InternalFlags::empty(), Platform::Unix);
        assert!(split.dir_only);
        assert_eq!(split.segments.len(), 2);
    }

    #[test]
    fn globstar_segment_is_recognized_only_with_flag() {
        let with = path_split("a/**/b", GlobFlags::GLOBSTAR, InternalFlags::empty(), Platform::Unix);
        assert!(with.segments[1].is_globstar);

        let without = path_split("a/**/b", GlobFlags::empty(), InternalFlags::empty(), Platform::Unix);
        assert!(!without.segments[1].is_globstar);
        assert!(without.segments[1].is_magic);
    }

    #[test]
    fn matchbase_synthesizes_globstar_prefix_for_bare_pattern() {
        let split = path_split(
            "*.txt",
            GlobFlags::MATCHBASE | GlobFlags::GLOBSTAR,
            InternalFlags::empty(),
            Platform::Unix,
        );
        assert_eq!(split.segments.len(), 2);
        assert!(split.segments[0].is_globstar);
    }

    #[test]
    fn separator_inside_bracket_sequence_does_not_split() {
        let split = path_split("a[/]b/c", GlobFlags::empty(), InternalFlags::empty(), Platform::Unix);
        assert_eq!(split.segments.len(), 2);
        assert_eq!(split.segments[0].text, "a[/]b");
    }
}
