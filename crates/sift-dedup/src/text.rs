//! Small string helpers used alongside grouping.

use serde::Serialize;

/// Every substring enclosed by `start` and the next `end` marker.
///
/// Markers are not included in the results. An unterminated `start` ends
/// the search.
#[must_use]
pub fn find_between<'a>(value: &'a str, start: &str, end: &str) -> Vec<&'a str> {
    let mut found = Vec::new();
    if start.is_empty() || end.is_empty() {
        return found;
    }

    let mut rest = value;
    while let Some(open) = rest.find(start) {
        let after = &rest[open + start.len()..];
        let Some(close) = after.find(end) else {
            break;
        };
        found.push(&after[..close]);
        rest = &after[close + end.len()..];
    }

    found
}

/// Number of times `ch` occurs in `value`.
#[must_use]
pub fn char_count(value: &str, ch: char) -> usize {
    value.chars().filter(|&c| c == ch).count()
}

/// Cut `value` at the first character outside printable ASCII.
///
/// Useful for device output that trails control bytes, e.g. `"BTW-N5K\x06"`.
#[must_use]
pub fn strip_non_printable(value: &str) -> &str {
    let end = value
        .char_indices()
        .find(|&(_, c)| !matches!(c, ' '..='~'))
        .map_or(value.len(), |(i, _)| i);
    &value[..end]
}

/// Case-folded copy of `value` for caseless comparison.
///
/// Unicode lowercase plus the full folding expansions lowercase alone
/// misses, so `"STRASSE"` and `"straße"` fold to the same text.
#[must_use]
pub fn fold_case(value: &str) -> String {
    let mut folded = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            'ß' | 'ẞ' => folded.push_str("ss"),
            'ς' => folded.push('σ'),
            'ﬀ' => folded.push_str("ff"),
            'ﬁ' => folded.push_str("fi"),
            'ﬂ' => folded.push_str("fl"),
            'ﬃ' => folded.push_str("ffi"),
            'ﬄ' => folded.push_str("ffl"),
            'ﬅ' | 'ﬆ' => folded.push_str("st"),
            'ſ' => folded.push('s'),
            _ => folded.extend(c.to_lowercase()),
        }
    }
    folded
}

/// Letter case shared by a set of strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    /// Every cased character is uppercase.
    Upper,
    /// Every cased character is lowercase.
    Lower,
}

/// The case every string in `items` agrees on.
///
/// Strings without cased characters are ignored. Returns `None` when the
/// strings disagree, mix cases internally, or none has a cased character.
pub fn common_case<S: AsRef<str>>(items: &[S]) -> Option<Case> {
    let mut shared = None;

    for item in items {
        let item = item.as_ref();
        let has_upper = item.chars().any(char::is_uppercase);
        let has_lower = item.chars().any(char::is_lowercase);
        let case = match (has_upper, has_lower) {
            (false, false) => continue,
            (true, false) => Case::Upper,
            (false, true) => Case::Lower,
            (true, true) => return None,
        };
        match shared {
            None => shared = Some(case),
            Some(existing) if existing != case => return None,
            Some(_) => {}
        }
    }

    shared
}
