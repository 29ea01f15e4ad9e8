//! Top-level pattern splitting on unescaped `|` (spec.md §4.4, the
//! `SPLIT` flag; mirrors `wcmatch._wcparse.WcSplit`).
//!
//! A `|` only splits when it sits outside a `[...]` sequence and outside
//! an extended-match group `?(...)`/`*(...)`/`+(...)`/`@(...)`/`!(...)`.
//! Escaped pipes (`\|`) never split, regardless of nesting depth.

use crate::flags::GlobFlags;

/// Splits `pattern` on top-level `|` when `GlobFlags::SPLIT` is set.
/// Returns `vec![pattern]` unchanged otherwise, or if no top-level `|`
/// is present.
pub fn split<'a>(pattern: &'a str, flags: GlobFlags) -> Vec<&'a str> {
    if !flags.contains(GlobFlags::SPLIT) {
        return vec![pattern];
    }
    let extmatch = flags.contains(GlobFlags::EXTMATCH);
    let byte_offsets: Vec<usize> = pattern.char_indices().map(|(i, _)| i).collect();
    let chars: Vec<char> = pattern.chars().collect();

    let mut parts = Vec::new();
    let mut seg_start = 0usize;
    let mut i = 0usize;
    let mut bracket_depth = 0i32;
    let mut ext_depth = 0i32;

    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                i += 2;
                continue;
            }
            '[' if bracket_depth == 0 => {
                bracket_depth += 1;
            }
            '[' => {
                // nested literal `[` inside a sequence is just a member
            }
            ']' if bracket_depth > 0 => {
                bracket_depth -= 1;
            }
            '(' if extmatch
                && bracket_depth == 0
                && i > 0
                && matches!(chars[i - 1], '?' | '*' | '+' | '@' | '!') =>
            {
                ext_depth += 1;
            }
            '(' if ext_depth > 0 => {
                ext_depth += 1;
            }
            ')' if ext_depth > 0 => {
                ext_depth -= 1;
            }
            '|' if bracket_depth == 0 && ext_depth == 0 => {
                let end = byte_offsets[i];
                parts.push(&pattern[byte_offsets[seg_start]..end]);
                seg_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    let tail_start = byte_offsets.get(seg_start).copied().unwrap_or(pattern.len());
    parts.push(&pattern[tail_start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_top_level_pipe() {
        let out = split("a|b|c", GlobFlags::SPLIT);
        assert_eq!(out, vec!["a", "b", "c"]);
    }

    #[test]
    fn leaves_pattern_whole_without_split_flag() {
        let out = split("a|b", GlobFlags::empty());
        assert_eq!(out, vec!["a|b"]);
    }

    #[test]
    fn does_not_split_inside_bracket_sequence() {
        let out = split("[a|b]|c", GlobFlags::SPLIT);
        assert_eq!(out, vec!["[a|b]", "c"]);
    }

    #[test]
    fn does_not_split_inside_extmatch_group() {
        let out = split("@(a|b)|c", GlobFlags::SPLIT | GlobFlags::EXTMATCH);
        assert_eq!(out, vec!["@(a|b)", "c"]);
    }

    #[test]
    fn escaped_pipe_does_not_split() {
        let out = split(r"a\|b", GlobFlags::SPLIT);
        assert_eq!(out, vec![r"a\|b"]);
    }

    #[test]
    fn nested_extmatch_groups_track_depth() {
        let out = split("@(a|?(b|c))|d", GlobFlags::SPLIT | GlobFlags::EXTMATCH);
        assert_eq!(out, vec!["@(a|?(b|c))", "d"]);
    }
}
