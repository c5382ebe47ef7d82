//! String grouping.
//!
//! Every mode partitions its input: each string lands in exactly one group,
//! groups keep their members in input order, and groups themselves are
//! ordered by their first member.

use crate::cluster::UnionFind;
use crate::substring::{common_substring_len, longest_common_substring};
use serde::{Deserialize, Serialize};
use sift_core::ValidationError;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Default minimum shared-substring length for [`GroupMode::CommonSubstring`].
pub const DEFAULT_THRESHOLD: usize = 3;

/// Default separator for [`GroupMode::Separator`].
pub const DEFAULT_SEPARATOR: &str = "-";

/// Default prefix length for [`GroupMode::Prefix`].
pub const DEFAULT_PREFIX_LENGTH: usize = 2;

/// How strings are considered to belong together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum GroupMode {
    /// Literal equality.
    Exact,
    /// Equality after full case folding (see [`fold_case`]). Output keeps
    /// the original casing.
    CaseInsensitive,
    /// Strings sharing a contiguous run of at least `threshold` characters,
    /// merged transitively.
    CommonSubstring { threshold: usize },
    /// Equal text before the first `separator` (the whole string when the
    /// separator does not occur).
    Separator {
        separator: String,
        case_insensitive: bool,
    },
    /// Equal first `length` characters.
    Prefix {
        length: usize,
        case_insensitive: bool,
    },
}

impl GroupMode {
    /// Canonical name of the mode.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case-insensitive",
            Self::CommonSubstring { .. } => "common-substring",
            Self::Separator { .. } => "separator",
            Self::Prefix { .. } => "prefix",
        }
    }

    /// Build a mode from its name, taking parameters from `options`.
    ///
    /// Names are matched case-insensitively and `_` is accepted for `-`.
    pub fn parse(name: &str, options: &GroupOptions) -> Result<Self, ValidationError> {
        let mode = match name.to_ascii_lowercase().replace('_', "-").as_str() {
            "exact" => Self::Exact,
            "case-insensitive" | "ci" => Self::CaseInsensitive,
            "common-substring" | "substring" => Self::CommonSubstring {
                threshold: options.threshold,
            },
            "separator" => Self::Separator {
                separator: options.separator.clone(),
                case_insensitive: options.case_insensitive,
            },
            "prefix" => Self::Prefix {
                length: options.length,
                case_insensitive: options.case_insensitive,
            },
            _ => return Err(ValidationError::UnsupportedMode(name.to_string())),
        };
        mode.validate()?;
        Ok(mode)
    }

    /// Check the mode's parameters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Self::CommonSubstring { threshold: 0 } => Err(ValidationError::Threshold(0)),
            Self::Separator { separator, .. } if separator.is_empty() => {
                Err(ValidationError::Separator)
            }
            Self::Prefix { length: 0, .. } => Err(ValidationError::PrefixLength(0)),
            _ => Ok(()),
        }
    }
}

/// Parameters used when building a [`GroupMode`] by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupOptions {
    /// Minimum shared-substring length.
    pub threshold: usize,
    /// Separator for separator grouping.
    pub separator: String,
    /// Prefix length for prefix grouping.
    pub length: usize,
    /// Compare case-insensitively in separator and prefix grouping.
    pub case_insensitive: bool,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            separator: DEFAULT_SEPARATOR.to_string(),
            length: DEFAULT_PREFIX_LENGTH,
            case_insensitive: false,
        }
    }
}

impl GroupOptions {
    /// Set the common-substring threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the prefix length.
    #[must_use]
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Enable or disable case-insensitive comparison.
    #[must_use]
    pub fn with_case_insensitive(mut self, enable: bool) -> Self {
        self.case_insensitive = enable;
        self
    }
}

/// A group of strings and the text that identifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StringGroup {
    /// Identifier of the group as it appears in its first member.
    ///
    /// For common-substring groups this is the longest substring shared by
    /// the first two members, or the member itself for a singleton.
    pub key: String,
    /// Members in input order.
    pub members: Vec<String>,
}

/// Partition `items` into groups according to `mode`.
///
/// Empty input yields an empty result. Invalid mode parameters are rejected
/// before any grouping happens.
///
/// ```
/// use sift_dedup::{group_strings, GroupMode};
///
/// let groups = group_strings(&["Cat", "cat", "dog"], &GroupMode::CaseInsensitive).unwrap();
/// assert_eq!(groups, vec![vec!["Cat", "cat"], vec!["dog"]]);
/// ```
pub fn group_strings<S: AsRef<str>>(
    items: &[S],
    mode: &GroupMode,
) -> Result<Vec<Vec<String>>, ValidationError> {
    Ok(group_strings_keyed(items, mode)?
        .into_iter()
        .map(|g| g.members)
        .collect())
}

/// Like [`group_strings`], but each group carries its identifier.
pub fn group_strings_keyed<S: AsRef<str>>(
    items: &[S],
    mode: &GroupMode,
) -> Result<Vec<StringGroup>, ValidationError> {
    mode.validate()?;

    let groups = match mode {
        GroupMode::Exact => group_by_key(items, false, |s| s),
        GroupMode::CaseInsensitive => group_by_key(items, true, |s| s),
        GroupMode::Separator {
            separator,
            case_insensitive,
        } => group_by_key(items, *case_insensitive, |s| {
            s.split_once(separator.as_str()).map_or(s, |(head, _)| head)
        }),
        GroupMode::Prefix {
            length,
            case_insensitive,
        } => group_by_key(items, *case_insensitive, |s| {
            s.char_indices().nth(*length).map_or(s, |(i, _)| &s[..i])
        }),
        GroupMode::CommonSubstring { threshold } => group_by_substring(items, *threshold),
    };

    debug!(
        items = items.len(),
        mode = mode.name(),
        groups = groups.len(),
        "group_strings"
    );
    Ok(groups)
}

fn group_by_key<S, F>(items: &[S], fold_case: bool, key_of: F) -> Vec<StringGroup>
where
    S: AsRef<str>,
    F: Fn(&str) -> &str,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<StringGroup> = Vec::new();

    for item in items {
        let item = item.as_ref();
        let key = key_of(item);
        let normalized = if fold_case {
            crate::text::fold_case(key)
        } else {
            key.to_string()
        };

        let slot = *slots.entry(normalized).or_insert_with(|| {
            groups.push(StringGroup {
                key: key.to_string(),
                members: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].members.push(item.to_string());
    }

    groups
}

fn group_by_substring<S: AsRef<str>>(items: &[S], threshold: usize) -> Vec<StringGroup> {
    let chars: Vec<Vec<char>> = items.iter().map(|s| s.as_ref().chars().collect()).collect();
    let mut uf = UnionFind::new(items.len());

    for i in 0..chars.len() {
        // A string shorter than the threshold can never link to anything.
        if chars[i].len() < threshold {
            continue;
        }
        for j in (i + 1)..chars.len() {
            if chars[j].len() < threshold || uf.connected(i, j) {
                continue;
            }
            if common_substring_len(&chars[i], &chars[j]) >= threshold {
                trace!(left = i, right = j, "linked by common substring");
                uf.union(i, j);
            }
        }
    }

    uf.groups()
        .into_iter()
        .map(|positions| {
            let members: Vec<String> = positions
                .iter()
                .map(|&i| items[i].as_ref().to_string())
                .collect();
            let key = match members.as_slice() {
                [first, second, ..] => longest_common_substring(first, second),
                [only] => only.clone(),
                [] => String::new(),
            };
            StringGroup { key, members }
        })
        .collect()
}
