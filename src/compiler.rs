//! Translates a shell glob pattern into the source text of a standard
//! regular expression (spec.md §4.6; mirrors the parsing core of
//! `wcmatch._wcparse.WcParse`).
//!
//! The pipeline, per pattern: strip a leading negation sigil, expand
//! braces, split on top-level `|`, split each resulting sub-pattern into
//! path segments, and translate each segment's wildcard syntax into a
//! regex fragment. Fragments are joined back with an explicit separator
//! regex between segments and combined with alternation across
//! sub-patterns.
//!
//! Segmentation splits the *pattern* text on the literal separator, not
//! what a compiled fragment can consume from the *subject* it's matched
//! against: a single-segment fragment still runs against the whole
//! subject string, so under `PATHNAME` each `*`/`?` explicitly excludes
//! the resolved separator from its own character class instead of
//! relying on segmentation to keep it out.

use crate::brace::{self, BraceExpander};
use crate::chars::{CharStream, Eos};
use crate::flags::{self, GlobFlags, InternalFlags, Platform};
use crate::path_split::{self, PathSplit};
use crate::posix;
use crate::split_top;

/// The regex source text produced for one pattern, plus whether the
/// pattern was negated (a leading `!`, or `-` under `MINUSNEGATE`).
pub struct Compiled {
    pub regex_source: String,
    pub negated: bool,
    /// Set when any alternative in the pattern ended with a trailing
    /// separator — the match is only valid against a directory.
    pub dir_only: bool,
    /// Number of globstar capturing groups in `regex_source`, in segment
    /// order. Zero unless `REALPATH` is set and `TRANSLATE` is not —
    /// see [`compile_path`].
    pub globstar_captures: usize,
}

/// Compiles `pattern` under `flags` into [`Compiled`] regex source.
pub fn compile_pattern(
    pattern: &str,
    flags: GlobFlags,
    internal: InternalFlags,
    platform: Platform,
    is_bytes: bool,
    brace_expander: &dyn BraceExpander,
) -> Compiled {
    let (body, negated) = strip_negate(pattern, flags);
    let body = apply_rawchars(body, flags);

    let expansions =
        brace::expand_if_enabled(&body, flags.contains(GlobFlags::BRACE), brace_expander);

    let mut fragments = Vec::new();
    let mut dir_only = false;
    let mut globstar_captures = 0usize;
    for variant in &expansions {
        for sub in split_top::split(variant, flags) {
            let split = path_split::path_split(sub, flags, internal, platform);
            dir_only |= split.dir_only;
            let (fragment, captures) = compile_path(&split, flags, internal, platform, is_bytes);
            globstar_captures += captures;
            fragments.push(fragment);
        }
    }

    let body_source = match fragments.len() {
        0 => String::new(),
        1 => fragments.into_iter().next().unwrap(),
        _ => format!("(?:{})", fragments.join(")|(?:")),
    };

    let mut regex_source = String::new();
    if !flags::case_sensitive(flags, platform) {
        regex_source.push_str("(?i)");
    }
    regex_source.push('^');
    regex_source.push_str(&body_source);
    regex_source.push('$');

    Compiled { regex_source, negated, dir_only, globstar_captures }
}

/// Strips a leading negation sigil, unless `EXTMATCH` is enabled and the
/// sigil is immediately followed by `(` — that's an inverse extended
/// group (`!(foo)`), not pattern negation.
fn strip_negate(pattern: &str, flags: GlobFlags) -> (String, bool) {
    if !flags.contains(GlobFlags::NEGATE) {
        return (pattern.to_string(), false);
    }
    let sigil = if flags.contains(GlobFlags::MINUSNEGATE) { '-' } else { '!' };
    let mut chars = pattern.chars();
    match chars.next() {
        Some(c) if c == sigil => {
            if sigil == '!' && flags.contains(GlobFlags::EXTMATCH) && chars.next() == Some('(') {
                (pattern.to_string(), false)
            } else {
                (pattern[sigil.len_utf8()..].to_string(), true)
            }
        }
        _ => (pattern.to_string(), false),
    }
}

/// Interprets `\n`, `\t`, `\r`, `\xHH`, and `\uHHHH` escapes before
/// parsing, when `RAWCHARS` is set. An escape that doesn't resolve is
/// left as-is for the glob parser to handle as a literal backslash.
fn apply_rawchars(pattern: &str, flags: GlobFlags) -> String {
    if !flags.contains(GlobFlags::RAWCHARS) {
        return pattern.to_string();
    }
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('n') => {
                chars.next();
                out.push('\n');
            }
            Some('t') => {
                chars.next();
                out.push('\t');
            }
            Some('r') => {
                chars.next();
                out.push('\r');
            }
            Some('0') => {
                chars.next();
                out.push('\0');
            }
            Some('x') => {
                chars.next();
                if let Some(c) = take_hex_escape(&mut chars, 2) {
                    out.push(c);
                } else {
                    out.push_str("\\x");
                }
            }
            Some('u') => {
                chars.next();
                if let Some(c) = take_hex_escape(&mut chars, 4) {
                    out.push(c);
                } else {
                    out.push_str("\\u");
                }
            }
            _ => out.push('\\'),
        }
    }
    out
}

fn take_hex_escape(chars: &mut std::iter::Peekable<std::str::Chars>, width: usize) -> Option<char> {
    let mut digits = String::with_capacity(width);
    for _ in 0..width {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                digits.push(*c);
                chars.next();
            }
            _ => return None,
        }
    }
    u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
}

/// Compiles one already path-split pattern into a regex fragment, joining
/// segments with an explicit separator regex and handling globstar
/// segments specially. Returns the fragment plus the number of globstar
/// capturing groups it emitted.
///
/// Globstar bodies are wrapped in a capturing group only when `REALPATH`
/// is set and the pattern isn't being compiled for `TRANSLATE` (spec.md
/// §3): `FilesystemMatcher` (`src/fs.rs`) uses those groups to validate
/// symlinks only within the span a `**` actually matched, rather than
/// across every ancestor of the whole path.
fn compile_path(
    split: &PathSplit,
    flags: GlobFlags,
    internal: InternalFlags,
    platform: Platform,
    is_bytes: bool,
) -> (String, usize) {
    let unix = flags::is_unix_style(flags, internal, platform);
    let sep_escaped = regex::escape(&flags::separator(unix).to_string());
    let capture_globstar =
        flags.contains(GlobFlags::REALPATH) && !internal.contains(InternalFlags::TRANSLATE);

    let mut out = String::new();
    if split.is_absolute {
        out.push_str(&regex::escape(&split.root));
    }

    let mut captures = 0usize;
    let len = split.segments.len();
    for (i, seg) in split.segments.iter().enumerate() {
        let last = i + 1 == len;
        if seg.is_globstar {
            let body = if capture_globstar {
                captures += 1;
                "(.*)".to_string()
            } else {
                ".*".to_string()
            };
            if last {
                out.push_str(&body);
            } else {
                out.push_str("(?:");
                out.push_str(&body);
                out.push_str(&sep_escaped);
                out.push_str(")?");
            }
        } else {
            out.push_str(&compile_segment(&seg.text, flags, is_bytes, &sep_escaped));
            if !last {
                out.push_str(&sep_escaped);
            }
        }
    }
    (out, captures)
}

/// Translates one path segment's wildcard syntax (no separators present)
/// into a regex fragment. `sep` is the resolved, already-escaped path
/// separator, needed so `*`/`?` can exclude it under `PATHNAME` even
/// though the segment text itself never contains one.
fn compile_segment(text: &str, flags: GlobFlags, is_bytes: bool, sep: &str) -> String {
    compile_fragment(text, flags, is_bytes, true, sep)
}

fn compile_fragment(text: &str, flags: GlobFlags, is_bytes: bool, leading: bool, sep: &str) -> String {
    let extmatch = flags.contains(GlobFlags::EXTMATCH);
    let dotmatch = flags.contains(GlobFlags::DOTMATCH);

    let mut stream = CharStream::new(text);
    let mut out = String::new();
    let mut first = leading;

    loop {
        let c = match stream.next() {
            Ok(c) => c,
            Err(Eos) => break,
        };
        match c {
            '\\' => match stream.next() {
                Ok(escaped) => out.push_str(&literal(escaped)),
                Err(Eos) => out.push_str(&literal('\\')),
            },
            ('*' | '?' | '+' | '@' | '!') if extmatch && stream.peek() == Ok('(') => {
                stream.next().ok();
                match read_balanced_parens(&mut stream) {
                    Some(content) => {
                        if c == '!' {
                            // The tail needs compiling once up front: the
                            // inverse group has to reject only when its
                            // alternatives are immediately followed by
                            // exactly this tail, not whenever they occur
                            // as a substring (see `compile_inverse_group`).
                            let tail_pattern = stream.remainder();
                            let tail_regex =
                                compile_fragment(&tail_pattern, flags, is_bytes, false, sep);
                            out.push_str(&compile_inverse_group(
                                &content, &tail_regex, sep, flags, is_bytes,
                            ));
                            out.push_str(&tail_regex);
                            break;
                        }
                        out.push_str(&compile_ext_group(c, &content, flags, is_bytes, sep));
                    }
                    None => {
                        out.push_str(&literal(c));
                        out.push_str(&literal('('));
                    }
                }
            }
            '*' => {
                let guard = if first && !dotmatch { r"(?!\.)" } else { "" };
                out.push_str(guard);
                if flags.contains(GlobFlags::PATHNAME) {
                    out.push_str(&format!("[^{sep}]*?"));
                } else {
                    out.push_str(".*");
                }
            }
            '?' => {
                let guard = if first && !dotmatch { r"(?!\.)" } else { "" };
                out.push_str(guard);
                if flags.contains(GlobFlags::PATHNAME) {
                    out.push_str(&format!("[^{sep}]"));
                } else {
                    out.push('.');
                }
            }
            '[' => match compile_bracket(&mut stream, is_bytes) {
                Some(fragment) => out.push_str(&fragment),
                None => out.push_str(&literal('[')),
            },
            c => out.push_str(&literal(c)),
        }
        first = false;
    }
    out
}

fn literal(c: char) -> String {
    regex::escape(&c.to_string())
}

/// Reads the content of an extended-match group, assuming the opening
/// `(` has already been consumed and the cursor sits just past it.
/// Returns `None` (and leaves the stream at end) when the group is
/// never closed — the caller falls back to treating the opener as a
/// literal.
fn read_balanced_parens(stream: &mut CharStream) -> Option<String> {
    let mut depth = 1i32;
    let mut content = String::new();
    loop {
        match stream.next() {
            Ok('\\') => {
                content.push('\\');
                match stream.next() {
                    Ok(c) => content.push(c),
                    Err(Eos) => return None,
                }
            }
            Ok('(') => {
                depth += 1;
                content.push('(');
            }
            Ok(')') => {
                depth -= 1;
                if depth == 0 {
                    return Some(content);
                }
                content.push(')');
            }
            Ok(c) => content.push(c),
            Err(Eos) => return None,
        }
    }
}

/// Splits extended-group content on top-level `|`, respecting nested
/// parens, brackets, and escapes.
fn split_alts(content: &str) -> Vec<&str> {
    let chars: Vec<char> = content.chars().collect();
    let offsets: Vec<usize> = content.char_indices().map(|(i, _)| i).collect();
    let mut parts = Vec::new();
    let mut seg_start = 0usize;
    let mut i = 0usize;
    let mut paren_depth = 0i32;
    let mut bracket_depth = 0i32;

    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                i += 2;
                continue;
            }
            '[' if bracket_depth == 0 => bracket_depth += 1,
            ']' if bracket_depth > 0 => bracket_depth -= 1,
            '(' if bracket_depth == 0 => paren_depth += 1,
            ')' if bracket_depth == 0 && paren_depth > 0 => paren_depth -= 1,
            '|' if bracket_depth == 0 && paren_depth == 0 => {
                let end = offsets[i];
                parts.push(&content[offsets[seg_start]..end]);
                seg_start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    let tail_start = offsets.get(seg_start).copied().unwrap_or(content.len());
    parts.push(&content[tail_start..]);
    parts
}

/// Compiles an extended-match group body (`?(...)`, `*(...)`, `+(...)`,
/// `@(...)`) into its regex equivalent. `!(...)` is handled separately
/// by [`compile_inverse_group`] — it needs the text that follows the
/// group, which this function doesn't have access to.
fn compile_ext_group(kind: char, content: &str, flags: GlobFlags, is_bytes: bool, sep: &str) -> String {
    let alts = split_alts(content);
    let compiled: Vec<String> =
        alts.iter().map(|a| compile_fragment(a, flags, is_bytes, false, sep)).collect();
    let joined = compiled.join("|");
    match kind {
        '?' => format!("(?:{joined})?"),
        '*' => format!("(?:{joined})*"),
        '+' => format!("(?:{joined})+"),
        '@' => format!("(?:{joined})"),
        _ => unreachable!("only ?*+@ open extended groups here"),
    }
}

/// Compiles an inverse extended-match group (`!(...)`) given the already
/// compiled regex for whatever follows it in the current scope
/// (`tail_regex`, from `stream.remainder()` at the point `!(...)` was
/// parsed).
///
/// Shell/`_wcparse` semantics (spec.md §4.6.2 `clean_up_inverse`) reject a
/// candidate only when one of the alternatives, followed by exactly the
/// rest of the pattern, accounts for the *whole* remaining input up to
/// the next segment boundary — not whenever an alternative merely occurs
/// somewhere inside it. A lookahead guarding a bare any-character repeat
/// with just `(?!(?:alts))` gets this wrong: `!(foo)` would reject `food`
/// and `xfoox`, since both contain `foo` as a substring, when shell
/// semantics only reject the exact alternative (`foo` itself). Folding
/// the tail and an end-of-segment boundary into the lookahead —
/// `(?!(?:alts)<tail>(?:<sep>|$))` — restores that: the guard only fires
/// when the alternative is followed by the same tail all the way to the
/// end of the segment (or the end of the subject), so `food` and `xfoox`
/// pass while bare `foo` doesn't.
fn compile_inverse_group(
    content: &str,
    tail_regex: &str,
    sep: &str,
    flags: GlobFlags,
    is_bytes: bool,
) -> String {
    let alts = split_alts(content);
    let compiled: Vec<String> =
        alts.iter().map(|a| compile_fragment(a, flags, is_bytes, false, sep)).collect();
    let joined = compiled.join("|");
    format!("(?:(?!(?:{joined}){tail_regex}(?:{sep}|$)).)*?")
}

/// One member of a `[...]` sequence before range-folding: either a single
/// character (literal or `\`-escaped — both can anchor a range) or an
/// already-expanded POSIX class, which cannot (spec.md §4.6.1).
enum Member {
    Char(char),
    Posix(String),
}

/// Compiles a `[...]` sequence, assuming `[` has already been consumed.
/// Returns `None` when the sequence is never closed, in which case the
/// stream is rewound so the caller can re-emit `[` as a literal and
/// continue scanning from there.
fn compile_bracket(stream: &mut CharStream, is_bytes: bool) -> Option<String> {
    let start_index = stream.index();
    let mut negate = false;
    match stream.peek() {
        Ok('!') | Ok('^') => {
            stream.next().ok();
            negate = true;
        }
        _ => {}
    }

    let mut members = Vec::new();
    let mut first_member = true;
    loop {
        let c = match stream.next() {
            Ok(c) => c,
            Err(Eos) => {
                stream.advance_to(start_index);
                return None;
            }
        };
        if c == ']' && !first_member {
            break;
        }
        first_member = false;

        if c == '[' {
            if let Some(name) = try_posix_class(stream) {
                if let Some(expanded) = posix::expand(&name, is_bytes) {
                    members.push(Member::Posix(expanded.to_string()));
                    continue;
                }
            }
            members.push(Member::Char('['));
            continue;
        }

        if c == '\\' {
            match stream.next() {
                Ok(escaped) => members.push(Member::Char(escaped)),
                Err(Eos) => {
                    stream.advance_to(start_index);
                    return None;
                }
            }
            continue;
        }

        members.push(Member::Char(c));
    }

    let body = fold_members(members);
    if body.is_empty() {
        // An empty class after impossible-range removal is either
        // guaranteed-impossible or guaranteed-matching, per spec.md
        // §4.6.1 — negating the sense flips which one it is.
        return Some(if negate { all_matching_class(is_bytes) } else { impossible_class(is_bytes) });
    }

    Some(if negate { format!("[^{body}]") } else { format!("[{body}]") })
}

/// Folds a flat member list into a class body, collapsing `a-b` triples
/// into regex ranges (dropping both endpoints if `b < a`, an impossible
/// range) and escaping everything else for safe use inside `[...]`.
fn fold_members(members: Vec<Member>) -> String {
    let mut body = String::new();
    let mut i = 0usize;
    while i < members.len() {
        match &members[i] {
            Member::Posix(expanded) => {
                body.push_str(expanded);
                i += 1;
                // A POSIX class can't anchor a range; an adjacent `-`
                // is just a literal dash.
                if matches!(members.get(i), Some(Member::Char('-'))) {
                    body.push_str("\\-");
                    i += 1;
                }
            }
            Member::Char(c1) if *c1 != '-' => {
                let range = match (members.get(i + 1), members.get(i + 2)) {
                    (Some(Member::Char('-')), Some(Member::Char(c2))) => Some(*c2),
                    _ => None,
                };
                match range {
                    Some(c2) if c2 < *c1 => {
                        // impossible range: drop both endpoints and the dash
                        i += 3;
                    }
                    Some(c2) => {
                        body.push_str(&bracket_char(*c1));
                        body.push('-');
                        body.push_str(&bracket_char(c2));
                        i += 3;
                    }
                    None => {
                        body.push_str(&bracket_char(*c1));
                        i += 1;
                    }
                }
            }
            Member::Char(c) => {
                body.push_str(&bracket_char(*c));
                i += 1;
            }
        }
    }
    body
}

/// A class body that can never match: the full byte or Unicode range,
/// negated.
fn impossible_class(is_bytes: bool) -> String {
    if is_bytes {
        "[^\\x00-\\xff]".to_string()
    } else {
        "[^\\x{0}-\\x{10FFFF}]".to_string()
    }
}

/// A class body that always matches: the inverse of [`impossible_class`].
fn all_matching_class(is_bytes: bool) -> String {
    if is_bytes {
        "[\\x00-\\xff]".to_string()
    } else {
        "[\\x{0}-\\x{10FFFF}]".to_string()
    }
}

/// Escapes a character for use inside a `[...]` class body, including the
/// set-operator characters (`&`, `|`, `~`) that some regex backends treat
/// specially when doubled, per spec.md §4.6.1.
fn bracket_char(c: char) -> String {
    match c {
        ']' => "\\]".to_string(),
        '\\' => "\\\\".to_string(),
        '^' => "\\^".to_string(),
        '-' => "\\-".to_string(),
        '&' => "\\&".to_string(),
        '|' => "\\|".to_string(),
        '~' => "\\~".to_string(),
        _ => c.to_string(),
    }
}

/// Recognizes `[:name:]` starting right after an inner `[` has been
/// consumed. Rewinds and returns `None` if this isn't a POSIX class
/// (either malformed or not a recognized name), leaving `[` to be
/// treated as a literal bracket member.
fn try_posix_class(stream: &mut CharStream) -> Option<String> {
    let save = stream.index();
    if stream.peek() != Ok(':') {
        return None;
    }
    stream.next().ok();

    let mut name = String::new();
    loop {
        match stream.next() {
            Ok(':') if stream.peek() == Ok(']') => {
                stream.next().ok();
                if posix::POSIX_NAMES.contains(&name.as_str()) {
                    return Some(name);
                }
                break;
            }
            Ok(c) => name.push(c),
            Err(Eos) => break,
        }
    }
    stream.advance_to(save);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn compile(pattern: &str, flags: GlobFlags) -> Compiled {
        compile_pattern(
            pattern,
            flags,
            InternalFlags::empty(),
            Platform::Unix,
            false,
            &brace::DefaultBraceExpander,
        )
    }

    #[test]
    fn literal_pattern_matches_only_itself() {
        let c = compile("file.txt", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("file.txt"));
        assert!(!re.is_match("file2.txt"));
    }

    #[test]
    fn star_does_not_cross_segment_and_skips_leading_dot() {
        let c = compile("*.txt", GlobFlags::PATHNAME);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("a.txt"));
        assert!(!re.is_match(".hidden.txt"));
    }

    #[test]
    fn pathname_star_does_not_cross_the_separator() {
        let c = compile("*.txt", GlobFlags::PATHNAME);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(!re.is_match("sub/a.txt"));
    }

    #[test]
    fn pathname_question_mark_does_not_cross_the_separator() {
        let c = compile("a?c", GlobFlags::PATHNAME);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("abc"));
        assert!(!re.is_match("a/c"));
    }

    #[test]
    fn without_pathname_star_freely_crosses_the_separator() {
        let c = compile("*.txt", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("sub/a.txt"));
    }

    #[test]
    fn dotmatch_allows_leading_dot() {
        let c = compile("*.txt", GlobFlags::DOTMATCH);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match(".hidden.txt"));
    }

    #[test]
    fn question_mark_matches_single_char() {
        let c = compile("a?c", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("abc"));
        assert!(!re.is_match("ac"));
        assert!(!re.is_match("abbc"));
    }

    #[test]
    fn bracket_sequence_matches_class() {
        let c = compile("[abc].txt", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("a.txt"));
        assert!(!re.is_match("d.txt"));
    }

    #[test]
    fn negated_bracket_sequence() {
        let c = compile("[!abc].txt", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("d.txt"));
        assert!(!re.is_match("a.txt"));
    }

    #[test]
    fn valid_range_matches_its_members() {
        let c = compile("[a-c].txt", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("b.txt"));
        assert!(!re.is_match("d.txt"));
    }

    #[test]
    fn impossible_range_collapses_to_a_class_matching_nothing() {
        let c = compile("[z-a]", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(!re.is_match("z"));
        assert!(!re.is_match("a"));
        assert!(!re.is_match("m"));
    }

    #[test]
    fn negated_impossible_range_matches_anything() {
        let c = compile("[!z-a]", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("m"));
        assert!(re.is_match("!"));
    }

    #[test]
    fn dash_adjacent_to_posix_class_is_literal() {
        let c = compile("[[:digit:]-]", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("5"));
        assert!(re.is_match("-"));
        assert!(!re.is_match("a"));
    }

    #[test]
    fn posix_class_inside_sequence() {
        let c = compile("[[:digit:]].txt", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("5.txt"));
        assert!(!re.is_match("a.txt"));
    }

    #[test]
    fn extmatch_at_least_one() {
        let c = compile("+(ab)c", GlobFlags::EXTMATCH);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("abc"));
        assert!(re.is_match("ababc"));
        assert!(!re.is_match("c"));
    }

    #[test]
    fn extmatch_alternation_group() {
        let c = compile("@(foo|bar).txt", GlobFlags::EXTMATCH);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("foo.txt"));
        assert!(re.is_match("bar.txt"));
        assert!(!re.is_match("baz.txt"));
    }

    #[test]
    fn globstar_matches_across_segments() {
        let c = compile("a/**/b", GlobFlags::GLOBSTAR);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("a/b"));
        assert!(re.is_match("a/x/y/b"));
        assert!(!re.is_match("a/b/c"));
    }

    #[test]
    fn globstar_without_realpath_emits_no_capture_group() {
        let c = compile("a/**/b", GlobFlags::GLOBSTAR);
        assert_eq!(c.globstar_captures, 0);
    }

    #[test]
    fn globstar_under_realpath_captures_its_span() {
        let c = compile("a/**/b", GlobFlags::GLOBSTAR | GlobFlags::REALPATH);
        assert_eq!(c.globstar_captures, 1);
        let re = Regex::new(&c.regex_source).unwrap();
        let caps = re.captures("a/x/y/b").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "x/y");
    }

    #[test]
    fn inverse_group_rejects_only_the_exact_alternative_not_any_substring() {
        // A bare negative-lookahead-per-char repeat would wrongly reject
        // any string merely *containing* "foo"; whole-tail semantics only
        // reject when an alternative, followed by the rest of the
        // pattern, accounts for the whole input.
        let c = compile("!(foo)", GlobFlags::EXTMATCH);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("food"));
        assert!(re.is_match("xfoox"));
        assert!(!re.is_match("foo"));
    }

    #[test]
    fn negate_sigil_is_stripped_and_reported() {
        let c = compile("!*.txt", GlobFlags::NEGATE);
        assert!(c.negated);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("a.txt"));
    }

    #[test]
    fn negate_sigil_yields_to_inverse_extmatch_group() {
        let c = compile("!(a)b", GlobFlags::NEGATE | GlobFlags::EXTMATCH);
        assert!(!c.negated);
    }

    #[test]
    fn brace_expansion_produces_alternation() {
        let c = compile("{a,b}.txt", GlobFlags::BRACE);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("a.txt"));
        assert!(re.is_match("b.txt"));
        assert!(!re.is_match("c.txt"));
    }

    #[test]
    fn case_insensitive_flag_widens_match() {
        let c = compile("FILE.txt", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(!re.is_match("file.txt"));

        let c = compile("FILE.txt", GlobFlags::IGNORECASE);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("file.txt"));
    }

    #[test]
    fn rawchars_interprets_escape_sequences() {
        let c = compile(r"a\tb", GlobFlags::RAWCHARS);
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("a\tb"));
    }

    #[test]
    fn unterminated_bracket_falls_back_to_literal() {
        let c = compile("a[bc", GlobFlags::empty());
        let re = Regex::new(&c.regex_source).unwrap();
        assert!(re.is_match("a[bc"));
    }
}
