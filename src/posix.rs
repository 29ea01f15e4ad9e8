//! POSIX character-class (`[:name:]`) expansion.
//!
//! `_wcparse.py` delegates this to `backrefs.uniprops.get_posix_property`,
//! an external Unicode-property database. That lookup is out of scope for
//! this crate's core (spec.md §1 lists "Unicode property lookup for POSIX
//! classes" as a delegated collaborator); what stays in scope is
//! recognizing the twelve POSIX class names and substituting a canonical
//! character-class body that the backend `regex` crate understands
//! natively via its own built-in Unicode class support for the ASCII-range
//! classes this crate targets.

/// Returns the canonical regex character-class *body* (without the
/// enclosing `[` `]`) for a POSIX class name, or `None` if `name` is not a
/// recognized POSIX class.
///
/// `is_bytes` selects the byte-oriented (Latin-1, `\x00`-`\xff`) range
/// instead of the Unicode one, matching spec.md §3's "Unicode version for
/// text patterns, byte version for byte patterns".
pub fn expand(name: &str, is_bytes: bool) -> Option<&'static str> {
    let class = match name {
        "alnum" => {
            if is_bytes {
                "0-9A-Za-z"
            } else {
                r"0-9A-Za-zª²³µ¹º¼-¾À-ÖØ-öø-ʯ"
            }
        }
        "alpha" => {
            if is_bytes {
                "A-Za-z"
            } else {
                r"A-Za-zªµºÀ-ÖØ-öø-ʯ"
            }
        }
        "ascii" => r"\x00-\x7f",
        "blank" => r" \t",
        "cntrl" => r"\x00-\x1f\x7f",
        "digit" => "0-9",
        "graph" => r"\x21-\x7e",
        "lower" => {
            if is_bytes {
                "a-z"
            } else {
                r"a-zµß-öø-ÿ"
            }
        }
        "print" => r"\x20-\x7e",
        "punct" => r"!-/:-@\[-`{-~",
        "space" => r" \t\r\n\v\f",
        "upper" => {
            if is_bytes {
                "A-Z"
            } else {
                r"A-ZÀ-ÖØ-Þ"
            }
        }
        "xdigit" => "0-9A-Fa-f",
        _ => return None,
    };
    Some(class)
}

/// Names recognized in `[:name:]`, used by the sequence parser to detect
/// `[:` ... `:]` before treating either character literally.
pub const POSIX_NAMES: &[&str] = &[
    "alnum", "alpha", "ascii", "blank", "cntrl", "digit", "graph", "lower", "print", "punct",
    "space", "upper", "xdigit",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_all_posix_names() {
        for name in POSIX_NAMES {
            assert!(expand(name, false).is_some());
            assert!(expand(name, true).is_some());
        }
    }

    #[test]
    fn rejects_unknown_name() {
        assert_eq!(expand("notaclass", false), None);
    }

    #[test]
    fn byte_and_unicode_variants_differ_for_alpha() {
        assert_ne!(expand("alpha", true), expand("alpha", false));
    }
}
