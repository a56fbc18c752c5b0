//! # countlineslib
//!
//! A lines of code counter library that classifies every physical line of a
//! source tree as code, comment, or blank.
//!
//! ## Overview
//!
//! The library is made of four small parts:
//!
//! - **Filter** ([`filter`]): substring-based path exclusion and the set of
//!   recognized text extensions
//! - **Classifier** ([`classifier`]): a byte-level state machine that sorts
//!   lines using the `//` and `/* */` comment grammar
//! - **Counter** ([`counter`]): the directory walker that prunes excluded
//!   paths and aggregates per-file tallies
//! - **Report** ([`report`]): text and JSON rendering of the aggregate
//!
//! The same comment grammar is used for every file type. It is an
//! approximation: comment markers inside string literals are not recognized
//! as such.
//!
//! ## Example
//!
//! ```rust
//! use countlineslib::{count_directory, CountReport, ExclusionSet};
//! use std::fs;
//! use std::time::Duration;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("main.c"), "int main(void) {\n    return 0; // ok\n}\n").unwrap();
//! fs::create_dir(dir.path().join("node_modules")).unwrap();
//! fs::write(dir.path().join("node_modules/dep.js"), "var x;\n").unwrap();
//!
//! let result = count_directory(dir.path(), &ExclusionSet::with_defaults()).unwrap();
//! assert_eq!(result.file_count, 1);
//! assert_eq!(result.code(), 3);
//!
//! let report = CountReport::new(&result, "demo", Duration::ZERO);
//! assert!(report.to_string().contains("Code lines: 3"));
//! ```

pub mod classifier;
pub mod counter;
pub mod error;
pub mod filter;
pub mod report;
pub mod stats;

pub use classifier::{classify_bytes, classify_file, classify_str, LineClassifier, Mode};
pub use counter::{count_directory, count_file, validate_target, walk};
pub use error::CountError;
pub use filter::{is_excluded, is_text_file, ExclusionSet, DEFAULT_EXCLUDES, TEXT_EXTENSIONS};
pub use report::{Breakdown, CountReport};
pub use stats::{CountResult, FileTally, LineKind};

/// Result type for countlineslib operations
pub type Result<T> = std::result::Result<T, CountError>;
