//! Error types for the `blog_cleaner` crate.

/// All errors that can occur during cleaning operations.
#[derive(Debug, thiserror::Error)]
pub enum BlogCleanerError {
    /// The caller cancelled a batch between row boundaries.
    #[error("Batch cancelled after {rows_done} of {rows_total} rows")]
    Cancelled {
        /// Rows cleaned before the cancellation flag was observed.
        rows_done: usize,
        /// Total rows in the cancelled batch.
        rows_total: usize,
    },

    /// A flag name passed to the strict options constructor does not match
    /// any known rule toggle.
    #[error("Unknown cleaning flag: {0}")]
    UnknownFlag(String),
}

/// A type alias for `Result<T, BlogCleanerError>`.
pub type Result<T> = std::result::Result<T, BlogCleanerError>;
