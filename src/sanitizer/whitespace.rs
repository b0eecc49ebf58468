//! Terminal whitespace normalization.

use std::sync::OnceLock;

use regex::Regex;

struct Patterns {
    /// Horizontal whitespace immediately before a line break.
    trailing: Regex,
    /// Runs of two or more horizontal whitespace characters.
    runs: Regex,
    /// Three or more consecutive newlines.
    blank_lines: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        trailing: Regex::new(r"[ \t]+\n").expect("invalid rewrite pattern"),
        runs: Regex::new(r"[ \t]{2,}").expect("invalid rewrite pattern"),
        blank_lines: Regex::new(r"\n{3,}").expect("invalid rewrite pattern"),
    })
}

/// Strip horizontal whitespace before line breaks, collapse horizontal runs
/// to one space, collapse newline runs to a single blank line, and trim the
/// whole text. Idempotent.
pub(crate) fn normalize(text: &str) -> String {
    let p = patterns();
    let text = p.trailing.replace_all(text, "\n");
    let text = p.runs.replace_all(&text, " ");
    let text = p.blank_lines.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_horizontal_runs() {
        assert_eq!(normalize("a   b\tc \t d"), "a b\tc d");
    }

    #[test]
    fn strips_trailing_whitespace_before_breaks() {
        assert_eq!(normalize("line one   \nline two"), "line one\nline two");
    }

    #[test]
    fn collapses_newline_runs_to_one_blank_line() {
        assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn trims_leading_and_trailing_whitespace() {
        assert_eq!(normalize("  \n  body  \n  "), "body");
    }

    #[test]
    fn idempotent_on_already_normalized_text() {
        let normalized = normalize("  a   b \n\n\n\n c  ");
        assert_eq!(normalize(&normalized), normalized);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t  "), "");
    }
}
