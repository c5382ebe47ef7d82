//! Duplicate detection over ordered sequences.
//!
//! Every function here makes a single pass over its input, remembers where
//! each value was first seen, and keeps only values that occur at least
//! twice. Reports list values in first-occurrence order and positions in
//! ascending order.

use serde::Serialize;
use sift_core::{Record, Value};
use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// One duplicated value and every position it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup<T> {
    /// The repeated value.
    pub value: T,
    /// Zero-based positions, strictly increasing, at least two.
    pub indices: Vec<usize>,
}

/// Mapping from each duplicated value to its positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DuplicateReport<T> {
    groups: Vec<DuplicateGroup<T>>,
}

impl<T> DuplicateReport<T> {
    /// Number of distinct duplicated values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when every input element was distinct.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate groups in first-occurrence order.
    pub fn iter(&self) -> std::slice::Iter<'_, DuplicateGroup<T>> {
        self.groups.iter()
    }

    /// Duplicated values in first-occurrence order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.groups.iter().map(|g| &g.value)
    }

    /// Positions of `value`, if it was duplicated.
    ///
    /// Linear in the number of duplicated values.
    pub fn get<Q>(&self, value: &Q) -> Option<&[usize]>
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.groups
            .iter()
            .find(|g| Borrow::<Q>::borrow(&g.value) == value)
            .map(|g| g.indices.as_slice())
    }

    /// Flat `(index, value)` view: every duplicate position paired with its
    /// value, grouped by value in first-occurrence order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &T)> {
        self.groups
            .iter()
            .flat_map(|g| g.indices.iter().map(move |&i| (i, &g.value)))
    }

    /// Total number of positions covered by the report.
    #[must_use]
    pub fn duplicate_positions(&self) -> usize {
        self.groups.iter().map(|g| g.indices.len()).sum()
    }

    /// Consume the report into its groups.
    #[must_use]
    pub fn into_groups(self) -> Vec<DuplicateGroup<T>> {
        self.groups
    }

    fn from_positions<K, F>(positions: impl Iterator<Item = (usize, K)>, mut to_owned: F) -> Self
    where
        K: Eq + Hash,
        F: FnMut(&K) -> T,
    {
        let mut seen: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<DuplicateGroup<T>> = Vec::new();

        for (index, key) in positions {
            match seen.entry(key) {
                Entry::Occupied(slot) => groups[*slot.get()].indices.push(index),
                Entry::Vacant(slot) => {
                    groups.push(DuplicateGroup {
                        value: to_owned(slot.key()),
                        indices: vec![index],
                    });
                    slot.insert(groups.len() - 1);
                }
            }
        }

        groups.retain(|g| g.indices.len() >= 2);
        Self { groups }
    }
}

impl<'a, T> IntoIterator for &'a DuplicateReport<T> {
    type Item = &'a DuplicateGroup<T>;
    type IntoIter = std::slice::Iter<'a, DuplicateGroup<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Find every value that appears more than once in `items`.
///
/// ```
/// use sift_dedup::find_duplicates;
///
/// let report = find_duplicates(&["a", "b", "a", "c", "b", "a"]);
/// assert_eq!(report.get("a"), Some(&[0, 2, 5][..]));
/// assert_eq!(report.get("b"), Some(&[1, 4][..]));
/// assert_eq!(report.get("c"), None);
/// ```
#[must_use]
pub fn find_duplicates<T>(items: &[T]) -> DuplicateReport<T>
where
    T: Eq + Hash + Clone,
{
    let report = DuplicateReport::from_positions(items.iter().enumerate(), |v: &&T| (*v).clone());
    debug!(
        items = items.len(),
        duplicated_values = report.len(),
        "find_duplicates"
    );
    report
}

/// Find duplicates among the values projected out of each element.
///
/// Elements for which `project` returns `None` are skipped but still count
/// toward positions.
pub fn find_duplicates_by<I, T, F>(items: &[I], mut project: F) -> DuplicateReport<T>
where
    T: Eq + Hash + Clone,
    F: FnMut(&I) -> Option<T>,
{
    let positions = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| project(item).map(|v| (i, v)));
    let report = DuplicateReport::from_positions(positions, T::clone);
    debug!(
        items = items.len(),
        duplicated_values = report.len(),
        "find_duplicates_by"
    );
    report
}

/// Find duplicates by the element at `column` of each row.
///
/// Rows too short to have `column` are skipped.
#[must_use]
pub fn find_duplicates_at<R, T>(rows: &[R], column: usize) -> DuplicateReport<T>
where
    R: AsRef<[T]>,
    T: Eq + Hash + Clone,
{
    let positions = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.as_ref().get(column).map(|v| (i, v)));
    DuplicateReport::from_positions(positions, |v: &&T| (*v).clone())
}

/// Find records that share a value at `key`.
///
/// Equality is decided by the value at `key` alone; every other field is
/// ignored. Records without `key` are skipped.
#[must_use]
pub fn find_keyed_duplicates(items: &[Record], key: &str) -> DuplicateReport<Value> {
    let positions = items
        .iter()
        .enumerate()
        .filter_map(|(i, record)| record.get(key).map(|v| (i, v)));
    let report = DuplicateReport::from_positions(positions, |v: &&Value| (*v).clone());
    debug!(
        items = items.len(),
        key,
        duplicated_values = report.len(),
        "find_keyed_duplicates"
    );
    report
}
