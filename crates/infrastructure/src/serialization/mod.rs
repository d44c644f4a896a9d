//! Deterministic JSON serialization for Clearsight data files.
//!
//! Keeps stored settings and scores stable across writes:
//! - Sorting object keys alphabetically (via `BTreeMap` in stored maps)
//! - Using 2-space indentation
//! - Adding trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
