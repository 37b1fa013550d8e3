//! # oxlint_bridge_report
//!
//! Translates the human-oriented text output of `oxlint` into bundler
//! diagnostics.
//!
//! This crate provides:
//! - Blank-line record grouping of a raw report
//! - The `default` (graphical) grammar, classified by glyph
//! - The `stylish` grammar, classified by per-line severity column
//!
//! Nothing here spawns processes or touches the filesystem, so every grammar
//! can be exercised directly from a string.
//!
//! ## Example
//!
//! ```rust
//! use oxlint_bridge_report::{ReportFormat, translate};
//!
//! let report = translate("\n  ⚠ eslint(no-debugger)\n  file.js:1:1\n\n", &ReportFormat::Default, "/p");
//! assert_eq!(report.warnings.len(), 1);
//! assert!(report.errors.is_empty());
//! ```

mod error;
mod format;
mod graphical;
mod group;
mod report;
mod stylish;

pub use error::ReportError;
pub use format::ReportFormat;
pub use graphical::{ERROR_GLYPH, WARNING_GLYPH};
pub use group::{RecordGroup, group_records};
pub use report::{Report, Severity, SkippedGroup, translate};
pub use stylish::BLANK_SPACE;
