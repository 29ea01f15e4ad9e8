//! Brace expansion: the `BraceExpander` collaborator of spec.md §4.3.
//!
//! Out of scope as an algorithm to get exactly right against every corner
//! case of shells' brace semantics (spec.md §1 lists it as delegated), but
//! this crate still needs a working default so `compile`/`translate` are
//! usable standalone. The trait lets a caller substitute their own (e.g. a
//! full `bracex`-equivalent) without touching the rest of the pipeline.

use std::borrow::Cow;

/// Expands brace syntax in one pattern into zero or more concrete
/// patterns. Must be order-stable. Infallible: a collaborator that cannot
/// make sense of its input should return `vec![pattern.to_string()]`
/// rather than panic — a failure here is swallowed by the default
/// expander and the original pattern is used verbatim (spec.md §7,
/// "pattern-fatal errors... are swallowed").
pub trait BraceExpander {
    fn expand(&self, pattern: &str) -> Vec<String>;
}

/// The built-in expander: supports `{a,b,c}` alternation and `{1..5}` /
/// `{a..z}` ranges, optionally stepped (`{1..10..2}`), with arbitrary
/// nesting. Backslash escapes are preserved verbatim (an escaped brace
/// does not open/close a group).
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultBraceExpander;

impl BraceExpander for DefaultBraceExpander {
    fn expand(&self, pattern: &str) -> Vec<String> {
        expand_braces(pattern)
    }
}

/// Expands a pattern containing zero or more (possibly nested) brace
/// groups into the cartesian product of their alternatives.
fn expand_braces(pattern: &str) -> Vec<String> {
    let chars: Vec<char> = pattern.chars().collect();
    match parse_term(&chars, 0) {
        Some((expansions, end)) if end == chars.len() => expansions,
        _ => vec![pattern.to_string()],
    }
}

/// Parses a run of literal/group segments up to `}`, `,`, or end of input,
/// returning the cartesian-product expansions and the index just past
/// what was consumed.
fn parse_term(chars: &[char], mut i: usize) -> Option<(Vec<String>, usize)> {
    let mut prefixes = vec![String::new()];
    while i < chars.len() {
        match chars[i] {
            '}' | ',' => break,
            '\\' if i + 1 < chars.len() => {
                push_literal(&mut prefixes, chars[i]);
                push_literal(&mut prefixes, chars[i + 1]);
                i += 2;
            }
            '{' => {
                let (group, end) = parse_group(chars, i)?;
                prefixes = cartesian(&prefixes, &group);
                i = end;
            }
            c => {
                push_literal(&mut prefixes, c);
                i += 1;
            }
        }
    }
    Some((prefixes, i))
}

/// Parses one `{...}` group starting at `chars[start] == '{'`, returning
/// its alternatives and the index just past the closing `}`.
fn parse_group(chars: &[char], start: usize) -> Option<(Vec<String>, usize)> {
    debug_assert_eq!(chars[start], '{');
    if let Some(result) = parse_range(chars, start) {
        return Some(result);
    }

    let mut alternatives = Vec::new();
    let mut i = start + 1;
    loop {
        let (term, end) = parse_term(chars, i)?;
        alternatives.extend(term);
        i = end;
        match chars.get(i) {
            Some(',') => {
                i += 1;
            }
            Some('}') => {
                i += 1;
                break;
            }
            _ => return None,
        }
    }
    // A group with no comma and exactly one alternative wasn't really an
    // alternation (e.g. a literal `{foo}` with no `,` and no `..`); treat
    // the braces as literal in that case by bailing out to the caller's
    // literal fallback. We detect that by requiring at least one `,` to
    // have been consumed, tracked implicitly: a single-alternative group
    // is only valid brace syntax if it came from at least one comma split.
    if alternatives.len() < 2 {
        return None;
    }
    Some((alternatives, i))
}

/// Recognizes `{start..end}` or `{start..end..step}` numeric/alpha ranges.
fn parse_range(chars: &[char], start: usize) -> Option<(Vec<String>, usize)> {
    let close = find_matching_brace(chars, start)?;
    let body: String = chars[start + 1..close].iter().collect();
    let parts: Vec<&str> = body.split("..").collect();
    if parts.len() < 2 || parts.len() > 3 {
        return None;
    }
    let step: i64 = match parts.get(2) {
        Some(s) => s.parse().ok()?,
        None => 1,
    };
    if step == 0 {
        return None;
    }

    if let (Ok(from), Ok(to)) = (parts[0].parse::<i64>(), parts[1].parse::<i64>()) {
        let width = if parts[0].starts_with('0') && parts[0].len() > 1 {
            parts[0].len()
        } else {
            0
        };
        let values = numeric_range(from, to, step)
            .into_iter()
            .map(|n| format!("{:0width$}", n, width = width))
            .collect();
        return Some((values, close + 1));
    }

    let from = single_char(parts[0])?;
    let to = single_char(parts[1])?;
    let values = alpha_range(from, to, step).into_iter().map(String::from).collect();
    Some((values, close + 1))
}

fn find_matching_brace(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < chars.len() {
        match chars[i] {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn single_char(s: &str) -> Option<char> {
    let mut it = s.chars();
    let c = it.next()?;
    if it.next().is_some() {
        None
    } else {
        Some(c)
    }
}

fn numeric_range(from: i64, to: i64, step: i64) -> Vec<i64> {
    let step = step.abs();
    let mut values = Vec::new();
    if from <= to {
        let mut v = from;
        while v <= to {
            values.push(v);
            v += step;
        }
    } else {
        let mut v = from;
        while v >= to {
            values.push(v);
            v -= step;
        }
    }
    values
}

fn alpha_range(from: char, to: char, step: i64) -> Vec<char> {
    let step = step.unsigned_abs() as u32;
    let step = step.max(1);
    let (from_code, to_code) = (from as u32, to as u32);
    let mut values = Vec::new();
    if from_code <= to_code {
        let mut v = from_code;
        while v <= to_code {
            if let Some(c) = char::from_u32(v) {
                values.push(c);
            }
            v += step;
        }
    } else {
        let mut v = from_code;
        while v >= to_code {
            if let Some(c) = char::from_u32(v) {
                values.push(c);
            }
            if v < step {
                break;
            }
            v -= step;
        }
    }
    values
}

fn push_literal(prefixes: &mut [String], c: char) {
    for p in prefixes.iter_mut() {
        p.push(c);
    }
}

fn cartesian(prefixes: &[String], suffixes: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(prefixes.len() * suffixes.len());
    for p in prefixes {
        for s in suffixes {
            out.push(format!("{p}{s}"));
        }
    }
    out
}

/// Expands `pattern` if `brace` is set, else yields it unchanged. Mirrors
/// `_wcparse.expand_braces`. Owned strings out, `Cow` in, to match the
/// "text or bytes, decoded to one code-unit-per-char view" framing of
/// spec.md §3 at the call sites that need it.
pub fn expand_if_enabled<'a>(
    pattern: &'a str,
    brace: bool,
    expander: &dyn BraceExpander,
) -> Vec<Cow<'a, str>> {
    if !brace {
        return vec![Cow::Borrowed(pattern)];
    }
    expander.expand(pattern).into_iter().map(Cow::Owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_simple_alternation() {
        let mut out = expand_braces("{a,b}.txt");
        out.sort();
        assert_eq!(out, vec!["a.txt".to_string(), "b.txt".to_string()]);
    }

    #[test]
    fn expands_numeric_range() {
        let out = expand_braces("f{1..3}.txt");
        assert_eq!(out, vec!["f1.txt", "f2.txt", "f3.txt"]);
    }

    #[test]
    fn expands_stepped_range() {
        let out = expand_braces("f{0..6..2}");
        assert_eq!(out, vec!["f0", "f2", "f4", "f6"]);
    }

    #[test]
    fn expands_alpha_range() {
        let out = expand_braces("{a..c}");
        assert_eq!(out, vec!["a", "b", "c"]);
    }

    #[test]
    fn pads_zero_prefixed_numeric_range() {
        let out = expand_braces("{01..03}");
        assert_eq!(out, vec!["01", "02", "03"]);
    }

    #[test]
    fn supports_nesting() {
        let mut out = expand_braces("{a,{b,c}}.txt");
        out.sort();
        assert_eq!(out, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn leaves_unbalanced_braces_untouched() {
        let out = expand_braces("a{b.txt");
        assert_eq!(out, vec!["a{b.txt"]);
    }

    #[test]
    fn leaves_non_alternating_single_group_untouched() {
        // no comma and no valid `..` range: not brace syntax
        let out = expand_braces("{onlyone}");
        assert_eq!(out, vec!["{onlyone}"]);
    }

    #[test]
    fn disabled_flag_yields_pattern_unchanged() {
        let out = expand_if_enabled("{a,b}", false, &DefaultBraceExpander);
        assert_eq!(out, vec![Cow::Borrowed("{a,b}")]);
    }
}
