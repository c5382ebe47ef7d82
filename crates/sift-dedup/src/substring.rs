//! Longest common substring and common prefix.
//!
//! Comparison is per `char`, not per byte, so multi-byte text never splits
//! inside a code point.

/// Longest contiguous run of characters present in both `a` and `b`.
///
/// Ties resolve to the run that ends earliest in `a`, then earliest in `b`.
/// Returns an empty string when the inputs share no character.
///
/// Runs in O(|a|·|b|) time with two rows of working memory, which is fine
/// for the short strings this is meant for.
///
/// ```
/// use sift_dedup::longest_common_substring;
///
/// assert_eq!(longest_common_substring("abcdef", "zcdef"), "cdef");
/// assert_eq!(longest_common_substring("abc", "xyz"), "");
/// ```
#[must_use]
pub fn longest_common_substring(a: &str, b: &str) -> String {
    // Byte offset of every char boundary in `a`, plus the end.
    let a_bounds: Vec<usize> = a
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(a.len()))
        .collect();
    let b_chars: Vec<char> = b.chars().collect();

    let (len, end) = best_run(a.chars(), &b_chars);
    if len == 0 {
        return String::new();
    }

    // `end` is the char index in `a` one past the run.
    a[a_bounds[end - len]..a_bounds[end]].to_string()
}

/// Length in chars of the longest common substring of `a` and `b`.
#[must_use]
pub fn common_substring_len(a: &[char], b: &[char]) -> usize {
    best_run(a.iter().copied(), b).0
}

/// Returns `(length, end)` of the best run, `end` being exclusive and
/// counted in chars of the first input.
fn best_run(a: impl Iterator<Item = char>, b: &[char]) -> (usize, usize) {
    if b.is_empty() {
        return (0, 0);
    }

    // prev[j + 1] = length of the common suffix of a[..i] and b[..=j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    let mut best = (0, 0);

    for (i, ca) in a.enumerate() {
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            if cur[j + 1] > best.0 {
                best = (cur[j + 1], i + 1);
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}

/// Leading run shared by `a` and `b`, or `None` if the first characters differ.
#[must_use]
pub fn common_prefix<'a>(a: &'a str, b: &str) -> Option<&'a str> {
    let end = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, ca), cb)| ca == cb)
        .last()
        .map_or(0, |((i, ca), _)| i + ca.len_utf8());

    (end > 0).then(|| &a[..end])
}
