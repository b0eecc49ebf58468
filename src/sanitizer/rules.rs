//! The ordered registry of rewrite rules.
//!
//! Rule order is significant: block removal runs before the
//! content-preserving unwraps, attribute stripping runs after them, and
//! whitespace normalization runs last. The registry is compiled once and
//! shared read-only across all invocations.
//!
//! Every pattern matches case-insensitively and, where content is involved,
//! spans line breaks. No rule raises on malformed markup; an unmatched
//! opening or closing tag is left untouched. Each rule runs exactly once per
//! pass, so deeply nested same-tag structures may not fully unwrap.

use std::sync::OnceLock;

use regex::Regex;

use super::whitespace;
use crate::options::CleaningOptions;

/// A single named rewrite with a fixed position in the pipeline.
pub(crate) struct Rule {
    /// Stable identifier, used in trace output.
    pub(crate) id: &'static str,
    applies_when: fn(&CleaningOptions) -> bool,
    action: Action,
}

/// What a rule does to the text when it is enabled.
enum Action {
    /// Regex rewrites applied in order, each on the output of the previous.
    Rewrite(Vec<(Regex, &'static str)>),
    /// A hand-written transform for what a single rewrite expresses poorly.
    Transform(fn(&str) -> String),
}

impl Rule {
    /// Whether this rule is enabled under the given (resolved) options.
    pub(crate) fn applies(&self, options: &CleaningOptions) -> bool {
        (self.applies_when)(options)
    }

    /// Run the rule over the text, returning the rewritten result.
    pub(crate) fn apply(&self, text: &str) -> String {
        match &self.action {
            Action::Rewrite(rewrites) => {
                rewrites
                    .iter()
                    .fold(text.to_string(), |acc, (pattern, replacement)| {
                        pattern.replace_all(&acc, *replacement).into_owned()
                    })
            }
            Action::Transform(transform) => transform(text),
        }
    }
}

static REGISTRY: OnceLock<Vec<Rule>> = OnceLock::new();

/// The canonical rule sequence, compiled on first use.
pub(crate) fn registry() -> &'static [Rule] {
    REGISTRY.get_or_init(build_registry)
}

fn rewrite(pattern: &str, replacement: &'static str) -> (Regex, &'static str) {
    (
        Regex::new(pattern).expect("invalid rewrite pattern"),
        replacement,
    )
}

fn build_registry() -> Vec<Rule> {
    vec![
        Rule {
            id: "strip-script",
            applies_when: |o| o.remove_script,
            action: Action::Rewrite(vec![rewrite(r"(?is)<script\b[^>]*>.*?</script>", "")]),
        },
        Rule {
            id: "strip-style",
            applies_when: |o| o.remove_style,
            action: Action::Rewrite(vec![rewrite(r"(?is)<style\b[^>]*>.*?</style>", "")]),
        },
        Rule {
            id: "strip-code",
            applies_when: |o| o.remove_code,
            action: Action::Rewrite(vec![
                rewrite(r"(?is)<pre\b[^>]*>.*?</pre>", ""),
                rewrite(r"(?is)<code\b[^>]*>.*?</code>", ""),
            ]),
        },
        Rule {
            id: "strip-comments",
            applies_when: |o| o.remove_comments,
            action: Action::Rewrite(vec![rewrite(r"(?s)<!--.*?-->", "")]),
        },
        Rule {
            id: "strip-h2",
            applies_when: |o| o.remove_h2,
            action: Action::Rewrite(vec![rewrite(r"(?is)<h2\b[^>]*>.*?</h2>", "")]),
        },
        Rule {
            id: "strip-images",
            applies_when: |o| o.remove_images,
            action: Action::Rewrite(vec![rewrite(r"(?i)<img\b[^>]*>", "")]),
        },
        Rule {
            id: "break-to-space",
            applies_when: |o| o.remove_br,
            action: Action::Rewrite(vec![rewrite(r"(?i)<br\s*/?>", " ")]),
        },
        Rule {
            id: "unwrap-links",
            applies_when: |o| o.remove_links,
            action: Action::Rewrite(vec![rewrite(r"(?is)<a\b[^>]*>(.*?)</a>", "$1")]),
        },
        Rule {
            id: "unwrap-strong",
            applies_when: |o| o.remove_strong,
            action: Action::Rewrite(vec![
                rewrite(r"(?is)<strong\b[^>]*>(.*?)</strong>", "$1"),
                rewrite(r"(?is)<b\b[^>]*>(.*?)</b>", "$1"),
            ]),
        },
        Rule {
            id: "unwrap-em",
            applies_when: |o| o.remove_em,
            action: Action::Rewrite(vec![
                rewrite(r"(?is)<em\b[^>]*>(.*?)</em>", "$1"),
                rewrite(r"(?is)<i\b[^>]*>(.*?)</i>", "$1"),
            ]),
        },
        Rule {
            id: "unwrap-spans",
            applies_when: |o| o.remove_spans,
            action: Action::Rewrite(vec![rewrite(r"(?is)<span\b[^>]*>(.*?)</span>", "$1")]),
        },
        // The resolver guarantees at most one of the two paragraph rules is
        // enabled for a run.
        Rule {
            id: "strip-paragraphs",
            applies_when: |o| o.remove_all_p,
            action: Action::Rewrite(vec![
                rewrite(r"(?i)<p\b[^>]*>", ""),
                rewrite(r"(?i)</p>", " "),
            ]),
        },
        Rule {
            id: "strip-empty-paragraphs",
            applies_when: |o| o.remove_empty_p,
            action: Action::Rewrite(vec![rewrite(r"(?i)<p\b[^>]*>\s*(?:&nbsp;)?\s*</p>", "")]),
        },
        Rule {
            id: "nbsp-to-space",
            applies_when: |o| o.remove_nbsp,
            action: Action::Rewrite(vec![rewrite(r"(?i)&nbsp;", " ")]),
        },
        Rule {
            id: "strip-attributes",
            applies_when: |o| o.remove_attributes,
            action: Action::Rewrite(vec![rewrite(
                r"(?s)<([A-Za-z][A-Za-z0-9]*)\s+[^>]*?(/?)>",
                "<$1$2>",
            )]),
        },
        Rule {
            id: "normalize-whitespace",
            applies_when: |o| o.normalize_whitespace,
            action: Action::Transform(whitespace::normalize),
        },
    ]
}
