//! # sift-dedup
//!
//! Duplicate detection and string grouping over lists and records.
//!
//! Every operation is a pure function over its arguments: no I/O, no shared
//! state, safe to call from any number of threads at once. Results always
//! carry original positions or preserve original order.
//!
//! ## Quick Start
//!
//! ```
//! use sift_dedup::{find_duplicates, group_strings, longest_common_substring, GroupMode};
//!
//! let report = find_duplicates(&["a", "b", "a"]);
//! assert_eq!(report.get("a"), Some(&[0, 2][..]));
//!
//! let groups = group_strings(&["Cat", "cat", "dog"], &GroupMode::CaseInsensitive).unwrap();
//! assert_eq!(groups.len(), 2);
//!
//! assert_eq!(longest_common_substring("abcdef", "zcdef"), "cdef");
//! ```
//!
//! ## Modules
//!
//! - [`duplicates`]: duplicate reports over scalars, projections and records
//! - [`records`]: duplicate removal over records
//! - [`grouping`]: string grouping modes
//! - [`substring`]: longest common substring and common prefix
//! - [`cluster`]: union-find used by substring grouping
//! - [`text`]: small string helpers
//! - [`io`]: file readers and writers for the CLI
//!
//! Engine functions emit `tracing` events at `debug` level; install a
//! subscriber to see them.

pub mod cluster;
pub mod duplicates;
pub mod grouping;
pub mod io;
pub mod records;
pub mod substring;
pub mod text;

pub use duplicates::{
    find_duplicates, find_duplicates_at, find_duplicates_by, find_keyed_duplicates,
    DuplicateGroup, DuplicateReport,
};
pub use grouping::{group_strings, group_strings_keyed, GroupMode, GroupOptions, StringGroup};
pub use io::{read_records, read_strings, read_values, write_records, InputFormat};
pub use records::{dedupe_json, dedupe_records, dedupe_records_by_key};
pub use substring::{common_prefix, longest_common_substring};
pub use text::{char_count, common_case, find_between, fold_case, strip_non_printable, Case};

pub use sift_core::{Record, SiftError, ValidationError, Value};
