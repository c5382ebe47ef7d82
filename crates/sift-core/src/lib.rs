//! # sift-core
//!
//! Core types shared by the sift crates.
//!
//! Provides:
//! - The error taxonomy ([`SiftError`], [`ValidationError`])
//! - Strict record values ([`Value`], [`Record`])

pub mod error;
pub mod types;

pub use error::{Result, SiftError, ValidationError};
pub use types::{json_kind, records_from_json, Record, Value};
