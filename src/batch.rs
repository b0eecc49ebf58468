//! Column-level batch processing and reduction statistics.
//!
//! This layer applies a [`Cleaner`] across every value of one column, in row
//! order, and aggregates per-row length deltas into a [`BatchSummary`]. All
//! lengths are character counts, so multibyte content does not distort the
//! statistics.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::error::{BlogCleanerError, Result};
use crate::options::CleaningOptions;
use crate::sanitizer::Cleaner;

/// Outcome of cleaning a single value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleaningResult {
    /// The value after every enabled rule has run.
    pub cleaned_text: String,
    /// Character count of the raw value (`0` for absent values).
    pub original_length: usize,
    /// Character count of `cleaned_text`.
    pub cleaned_length: usize,
}

/// Aggregate effect of one cleaning run over a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Input row count, including rows that produced empty output.
    pub rows_processed: usize,
    /// Sum of per-row `original - cleaned` deltas. Unclamped: a rule that
    /// inserts characters can drive an individual delta negative.
    pub total_chars_removed: i64,
    /// Mean of per-row reduction percentages. Rows with an original length
    /// of zero contribute no term; `0.0` when every row is excluded.
    pub average_reduction_percent: f64,
}

/// Export-ready table handed to the export collaborator for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    /// Column names, in order.
    pub headers: Vec<String>,
    /// One entry per input row, each the same length as `headers`.
    pub rows: Vec<Vec<String>>,
}

/// Clean every value of a column, in row order.
///
/// Returns one [`CleaningResult`] per input value (same order, same
/// cardinality, including zero rows) together with the batch summary.
///
/// # Example
///
/// ```
/// use blog_cleaner::{process_column, CleaningOptions};
///
/// let column = vec![Some("<h2>Title</h2>Intro"), None, Some("plain")];
/// let (results, summary) = process_column(&column, &CleaningOptions::default());
///
/// assert_eq!(results.len(), 3);
/// assert_eq!(results[0].cleaned_text, "Intro");
/// assert_eq!(results[1].cleaned_text, "");
/// assert_eq!(summary.rows_processed, 3);
/// ```
pub fn process_column<S: AsRef<str>>(
    column: &[Option<S>],
    options: &CleaningOptions,
) -> (Vec<CleaningResult>, BatchSummary) {
    let cleaner = Cleaner::new(options.clone());
    let results: Vec<CleaningResult> = column
        .iter()
        .map(|value| clean_row(&cleaner, value))
        .collect();
    let summary = summarize(&results);
    tracing::debug!(
        rows = summary.rows_processed,
        chars_removed = summary.total_chars_removed,
        "processed column"
    );
    (results, summary)
}

/// Like [`process_column`], but checks a cancellation flag between row
/// boundaries.
///
/// When the flag becomes `true`, partial results are discarded and
/// [`BlogCleanerError::Cancelled`] is returned.
pub fn process_column_with_cancel<S: AsRef<str>>(
    column: &[Option<S>],
    options: &CleaningOptions,
    cancel: &AtomicBool,
) -> Result<(Vec<CleaningResult>, BatchSummary)> {
    let cleaner = Cleaner::new(options.clone());
    let mut results = Vec::with_capacity(column.len());
    for value in column {
        if cancel.load(Ordering::Relaxed) {
            tracing::debug!(
                rows_done = results.len(),
                rows_total = column.len(),
                "batch cancelled, discarding partial results"
            );
            return Err(BlogCleanerError::Cancelled {
                rows_done: results.len(),
                rows_total: column.len(),
            });
        }
        results.push(clean_row(&cleaner, value));
    }
    let summary = summarize(&results);
    Ok((results, summary))
}

/// Parallel variant of [`process_column`].
///
/// Rows are cleaned on the rayon thread pool; output order still matches
/// input order, and the summary is computed from final totals only, so the
/// reported mean cannot depend on completion order.
#[cfg(feature = "parallel")]
pub fn process_column_parallel<S: AsRef<str> + Sync>(
    column: &[Option<S>],
    options: &CleaningOptions,
) -> (Vec<CleaningResult>, BatchSummary) {
    use rayon::prelude::*;

    let cleaner = Cleaner::new(options.clone());
    let results: Vec<CleaningResult> = column
        .par_iter()
        .map(|value| clean_row(&cleaner, value))
        .collect();
    let summary = summarize(&results);
    tracing::debug!(
        rows = summary.rows_processed,
        chars_removed = summary.total_chars_removed,
        "processed column in parallel"
    );
    (results, summary)
}

/// Build the export-ready table from a processed column.
///
/// With `original_name` set, the table pairs each raw value (absent rows
/// coerced to `""`) with its cleaned text under the columns
/// `(original_name, "cleaned_content")`; otherwise it carries the single
/// `cleaned_content` column. Row order matches the input.
pub fn export_table<S: AsRef<str>>(
    original_name: Option<&str>,
    column: &[Option<S>],
    results: &[CleaningResult],
) -> ExportTable {
    match original_name {
        Some(name) => ExportTable {
            headers: vec![name.to_string(), "cleaned_content".to_string()],
            rows: column
                .iter()
                .zip(results)
                .map(|(value, result)| {
                    let original = value
                        .as_ref()
                        .map_or_else(String::new, |text| text.as_ref().to_string());
                    vec![original, result.cleaned_text.clone()]
                })
                .collect(),
        },
        None => ExportTable {
            headers: vec!["cleaned_content".to_string()],
            rows: results
                .iter()
                .map(|result| vec![result.cleaned_text.clone()])
                .collect(),
        },
    }
}

fn clean_row<S: AsRef<str>>(cleaner: &Cleaner, value: &Option<S>) -> CleaningResult {
    let raw = value.as_ref().map(|text| text.as_ref());
    let original_length = raw.map_or(0, |text| text.chars().count());
    let cleaned_text = cleaner.clean_value(raw);
    let cleaned_length = cleaned_text.chars().count();
    CleaningResult {
        cleaned_text,
        original_length,
        cleaned_length,
    }
}

fn summarize(results: &[CleaningResult]) -> BatchSummary {
    let mut total_chars_removed = 0i64;
    let mut reduction_sum = 0f64;
    let mut measured_rows = 0usize;

    for result in results {
        let removed = result.original_length as i64 - result.cleaned_length as i64;
        total_chars_removed += removed;
        if result.original_length > 0 {
            reduction_sum += removed as f64 / result.original_length as f64 * 100.0;
            measured_rows += 1;
        }
    }

    let average_reduction_percent = if measured_rows == 0 {
        0.0
    } else {
        reduction_sum / measured_rows as f64
    };

    BatchSummary {
        rows_processed: results.len(),
        total_chars_removed,
        average_reduction_percent,
    }
}
