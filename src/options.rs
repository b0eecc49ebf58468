//! The closed record of per-rule toggles and its conflict resolution.

use serde::{Deserialize, Serialize};

use crate::error::{BlogCleanerError, Result};

/// Per-rule enablement flags for the cleaning pipeline.
///
/// One boolean per rewrite rule, in a fixed struct rather than a dynamic map
/// so a misspelled flag cannot silently come into existence. The default
/// configuration enables everything except `remove_all_p`.
///
/// `remove_all_p` and `remove_empty_p` are mutually exclusive: when both are
/// set, `remove_all_p` takes precedence and `remove_empty_p` is treated as
/// disabled for that run.
///
/// # Example
///
/// ```
/// use blog_cleaner::CleaningOptions;
///
/// let options = CleaningOptions {
///     remove_strong: false,
///     remove_em: false,
///     ..CleaningOptions::default()
/// };
/// assert!(options.remove_h2);
/// assert!(!options.remove_strong);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Strip `<script>` blocks, tag and content.
    pub remove_script: bool,
    /// Strip `<style>` blocks, tag and content.
    pub remove_style: bool,
    /// Strip `<code>` and `<pre>` blocks, tag and content.
    pub remove_code: bool,
    /// Strip HTML comments.
    pub remove_comments: bool,
    /// Strip `<h2>` blocks, tag and content.
    pub remove_h2: bool,
    /// Strip `<img>` tags.
    pub remove_images: bool,
    /// Replace `<br>` tags with a single space.
    pub remove_br: bool,
    /// Unwrap `<a>` tags, keeping the link text.
    pub remove_links: bool,
    /// Unwrap `<strong>` and `<b>` tags, keeping the inner text.
    pub remove_strong: bool,
    /// Unwrap `<em>` and `<i>` tags, keeping the inner text.
    pub remove_em: bool,
    /// Unwrap `<span>` tags, keeping the inner text.
    pub remove_spans: bool,
    /// Strip every paragraph tag: opening tags are removed, closing tags
    /// become a space. Overrides `remove_empty_p`.
    pub remove_all_p: bool,
    /// Remove paragraphs whose content is only whitespace and/or `&nbsp;`.
    pub remove_empty_p: bool,
    /// Replace `&nbsp;` entities with a literal space.
    pub remove_nbsp: bool,
    /// Strip attributes from any remaining tag, keeping the tag name.
    pub remove_attributes: bool,
    /// Collapse blank-line and whitespace runs and trim the result.
    pub normalize_whitespace: bool,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            remove_all_p: false,
            ..Self::all()
        }
    }
}

impl CleaningOptions {
    /// Every rule enabled, including `remove_all_p`.
    pub fn all() -> Self {
        Self {
            remove_script: true,
            remove_style: true,
            remove_code: true,
            remove_comments: true,
            remove_h2: true,
            remove_images: true,
            remove_br: true,
            remove_links: true,
            remove_strong: true,
            remove_em: true,
            remove_spans: true,
            remove_all_p: true,
            remove_empty_p: true,
            remove_nbsp: true,
            remove_attributes: true,
            normalize_whitespace: true,
        }
    }

    /// Every rule disabled.
    pub fn none() -> Self {
        Self {
            remove_script: false,
            remove_style: false,
            remove_code: false,
            remove_comments: false,
            remove_h2: false,
            remove_images: false,
            remove_br: false,
            remove_links: false,
            remove_strong: false,
            remove_em: false,
            remove_spans: false,
            remove_all_p: false,
            remove_empty_p: false,
            remove_nbsp: false,
            remove_attributes: false,
            normalize_whitespace: false,
        }
    }

    /// Build options from raw `(flag, enabled)` pairs as produced by a
    /// toggle UI. Flags not mentioned stay disabled; unrecognized names are
    /// ignored, so newer front-ends can send flags this version does not
    /// know about.
    ///
    /// # Example
    ///
    /// ```
    /// use blog_cleaner::CleaningOptions;
    ///
    /// let options = CleaningOptions::from_flags([
    ///     ("remove_h2", true),
    ///     ("remove_hologram", true), // ignored
    /// ]);
    /// assert!(options.remove_h2);
    /// assert!(!options.remove_script);
    /// ```
    pub fn from_flags<'a, I>(flags: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut options = Self::none();
        for (name, enabled) in flags {
            let _ = options.set(name, enabled);
        }
        options
    }

    /// Like [`from_flags`](Self::from_flags) but rejects unrecognized flag
    /// names, catching misspellings at construction time.
    pub fn from_flags_strict<'a, I>(flags: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut options = Self::none();
        for (name, enabled) in flags {
            if !options.set(name, enabled) {
                return Err(BlogCleanerError::UnknownFlag(name.to_string()));
            }
        }
        Ok(options)
    }

    /// Set one flag by name. Returns `false` for unrecognized names.
    fn set(&mut self, name: &str, enabled: bool) -> bool {
        match name {
            "remove_script" => self.remove_script = enabled,
            "remove_style" => self.remove_style = enabled,
            "remove_code" => self.remove_code = enabled,
            "remove_comments" => self.remove_comments = enabled,
            "remove_h2" => self.remove_h2 = enabled,
            "remove_images" => self.remove_images = enabled,
            "remove_br" => self.remove_br = enabled,
            "remove_links" => self.remove_links = enabled,
            "remove_strong" => self.remove_strong = enabled,
            "remove_em" => self.remove_em = enabled,
            "remove_spans" => self.remove_spans = enabled,
            "remove_all_p" => self.remove_all_p = enabled,
            "remove_empty_p" => self.remove_empty_p = enabled,
            "remove_nbsp" => self.remove_nbsp = enabled,
            "remove_attributes" => self.remove_attributes = enabled,
            "normalize_whitespace" => self.normalize_whitespace = enabled,
            _ => return false,
        }
        true
    }

    /// The effective enablement used by the pipeline: `remove_empty_p` is
    /// forced off while `remove_all_p` is set.
    pub(crate) fn resolve(&self) -> Self {
        let mut effective = self.clone();
        if effective.remove_all_p {
            effective.remove_empty_p = false;
        }
        effective
    }
}
