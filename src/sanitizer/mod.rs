//! The rule-based cleaning pipeline.
//!
//! Cleaning is an ordered sequence of independently toggleable rewrite
//! rules, applied by a [`Cleaner`] to one text value at a time:
//!
//! 1. strip `<script>` / `<style>` / `<code>` + `<pre>` blocks and comments
//! 2. strip `<h2>` blocks and `<img>` tags, turn `<br>` into a space
//! 3. unwrap `<a>`, `<strong>` / `<b>`, `<em>` / `<i>`, `<span>`
//! 4. strip all paragraph tags, or only empty paragraphs
//! 5. replace `&nbsp;`, strip remaining attributes, normalize whitespace
//!
//! Rules are best-effort pattern rewrites, not a parser: malformed or
//! unbalanced markup never fails, it just passes through unchanged.

mod rules;
mod whitespace;

use crate::options::CleaningOptions;

/// Applies the enabled subset of rewrite rules, in registry order, to text
/// values.
///
/// Construction resolves the option flags once, including the
/// `remove_all_p` / `remove_empty_p` conflict; the same `Cleaner` can then be
/// reused across any number of values. Cleaning is pure and deterministic.
///
/// # Example
///
/// ```
/// use blog_cleaner::{Cleaner, CleaningOptions};
///
/// let cleaner = Cleaner::new(CleaningOptions::default());
/// assert_eq!(
///     cleaner.clean("<script>alert(1)</script><p>Safe text</p>"),
///     "<p>Safe text</p>",
/// );
/// ```
pub struct Cleaner {
    options: CleaningOptions,
}

impl Cleaner {
    /// Create a cleaner for the given options.
    pub fn new(options: CleaningOptions) -> Self {
        Self {
            options: options.resolve(),
        }
    }

    /// Run every enabled rule, in order, over the given text. Disabled rules
    /// are skipped entirely.
    pub fn clean(&self, text: &str) -> String {
        rules::registry()
            .iter()
            .filter(|rule| rule.applies(&self.options))
            .fold(text.to_string(), |acc, rule| {
                tracing::trace!(rule = rule.id, "applying rewrite rule");
                rule.apply(&acc)
            })
    }

    /// Clean one raw value; absent values come back as the empty string.
    pub fn clean_value(&self, value: Option<&str>) -> String {
        match value {
            Some(text) => self.clean(text),
            None => String::new(),
        }
    }

    /// The effective options in force, after conflict resolution.
    pub fn options(&self) -> &CleaningOptions {
        &self.options
    }
}
