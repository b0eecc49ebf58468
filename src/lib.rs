//! # blog_cleaner
//!
//! Rule-based cleanup of HTML-ish markup in tabular blog content, with
//! batch-level reduction statistics.
//!
//! ## Overview
//!
//! `blog_cleaner` takes one column of raw text values (blog bodies stored as
//! HTML-like markup) and runs each value through an ordered pipeline of
//! independently toggleable rewrite rules: block removal (`<script>`,
//! `<style>`, `<code>`/`<pre>`, comments, `<h2>`), tag unwrapping (`<a>`,
//! `<strong>`, `<em>`, `<span>`), paragraph handling, entity replacement,
//! attribute stripping, and terminal whitespace normalization.
//!
//! The pipeline is a best-effort pattern rewriter, not an HTML parser: it
//! builds no DOM, never fails on malformed markup, and applies each rule
//! exactly once per pass. Which rules run is controlled by a
//! [`CleaningOptions`] record; rule order is fixed and significant.
//!
//! The batch layer cleans a whole column in row order, reports one
//! [`CleaningResult`] per row plus a [`BatchSummary`] of the aggregate
//! reduction, and can shape the output into an export-ready [`ExportTable`].
//!
//! ## Quick start
//!
//! ```rust
//! use blog_cleaner::{process_column, CleaningOptions};
//!
//! let column = vec![
//!     Some("<h2>Title</h2><p>&nbsp;</p><p>Hello <strong>world</strong></p>"),
//!     None,
//! ];
//!
//! let (results, summary) = process_column(&column, &CleaningOptions::default());
//!
//! assert_eq!(results[0].cleaned_text, "<p>Hello world</p>");
//! assert_eq!(results[1].cleaned_text, "");
//! assert_eq!(summary.rows_processed, 2);
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `parallel` | **yes** | Enables [`process_column_parallel`], an order-preserving parallel batch entry point built on `rayon`. |

pub mod batch;
pub mod error;
pub mod options;
pub mod sanitizer;

#[cfg(feature = "parallel")]
pub use batch::process_column_parallel;
pub use batch::{
    BatchSummary, CleaningResult, ExportTable, export_table, process_column,
    process_column_with_cancel,
};
pub use error::{BlogCleanerError, Result};
pub use options::CleaningOptions;
pub use sanitizer::Cleaner;
